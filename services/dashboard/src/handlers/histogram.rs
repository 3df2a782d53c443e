use axum::extract::State;
use axum::response::Response;
use tracing::{debug, warn};
use types::histogram::HistogramEntry;

use crate::error::AppError;
use crate::handlers::json_response;
use crate::state::AppState;

/// Pop the oldest buffered entry and return it as a tick.
///
/// Each call consumes one entry. When the buffer is empty, or the popped entry
/// is not a tick (sellers write batch sizes into the same buffer), the body is
/// `null`.
pub async fn next_tick(State(state): State<AppState>) -> Result<Response, AppError> {
    let tick = match state.store.pop_tail(&state.histogram_key).await {
        Ok(Some(raw)) => {
            debug!(ticker = %raw, "Popped histogram entry");
            match HistogramEntry::decode(&raw) {
                Ok(entry) => {
                    let tick = entry.as_tick().copied();
                    if tick.is_none() {
                        warn!(ticker = %raw, "Histogram entry is not a ticker");
                    }
                    tick
                }
                Err(e) => {
                    warn!(error = %e, ticker = %raw, "Failed to unmarshal ticker");
                    None
                }
            }
        }
        Ok(None) => {
            warn!("Histogram buffer is empty");
            None
        }
        Err(e) => {
            warn!(error = %e, "Failed to read histogram");
            None
        }
    };

    json_response(&tick)
}
