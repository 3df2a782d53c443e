use axum::extract::State;
use axum::response::Response;
use serde::Serialize;
use tracing::warn;

use crate::error::AppError;
use crate::handlers::json_response;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SizeResponse {
    pub size: usize,
}

/// Current queue length. A failed read reports zero.
pub async fn queue_size(State(state): State<AppState>) -> Result<Response, AppError> {
    let size = match state.store.len(&state.queue_key).await {
        Ok(size) => size,
        Err(e) => {
            warn!(error = %e, "Failed to read queue size");
            0
        }
    };

    json_response(&SizeResponse { size })
}
