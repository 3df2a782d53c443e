use std::path::Path;

use axum::http::StatusCode;
use axum::{middleware::from_fn, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use types::config::REQUEST_TIMEOUT;

use crate::handlers::{health, histogram, size};
use crate::middleware::{access_log, request_id};
use crate::state::AppState;

/// Build the dashboard router.
///
/// Interceptors run outermost first: request id, access log, timeout. Paths
/// other than the JSON routes fall through to files under `static_dir`.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let interceptors = ServiceBuilder::new()
        .layer(from_fn(request_id))
        .layer(access_log())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ));

    Router::new()
        .route("/size", get(size::queue_size))
        .route("/histogram", get(histogram::next_tick))
        .route("/healthz", get(health::healthz))
        .fallback_service(ServeDir::new(static_dir))
        .layer(interceptors)
        .with_state(state)
}
