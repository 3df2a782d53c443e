use axum::extract::State;
use axum::http::StatusCode;

use crate::error::AppError;
use crate::state::AppState;

pub async fn healthz(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    if state.health.is_healthy() {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::ServiceUnavailable("server is not ready".into()))
    }
}
