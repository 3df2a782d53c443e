use runtime::HealthFlag;
use store::SharedStore;
use types::keys::{HISTOGRAM_KEY, QUEUE_KEY};

/// Handles shared by every request handler and the background generator.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub health: HealthFlag,
    pub queue_key: String,
    pub histogram_key: String,
}

impl AppState {
    pub fn new(store: SharedStore, health: HealthFlag) -> Self {
        Self {
            store,
            health,
            queue_key: QUEUE_KEY.to_string(),
            histogram_key: HISTOGRAM_KEY.to_string(),
        }
    }
}
