//! Timing and capacity constants shared by all services.

use std::time::Duration;

/// Period of the seller, buyer and synthetic generator timers.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Number of histogram entries kept after a trim (indices `0..=100`).
pub const HISTOGRAM_CAPACITY: usize = 101;

/// Exclusive upper bound of a seller batch (batches are `0..=9`).
pub const MAX_BATCH: u32 = 10;

/// Base offset of the synthetic price series.
pub const SEED_BASE: f64 = 200.0;

/// Exclusive upper bound of a synthetic price step (steps are `0..=4`).
pub const MAX_STEP: u32 = 5;

/// How long in-flight HTTP requests may run after shutdown starts.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Upper bound on a single HTTP request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default store address for every process.
pub const DEFAULT_REDIS_ADDR: &str = "localhost:6379";

/// Default dashboard listen address.
pub const DEFAULT_BINDING: &str = "0.0.0.0:5000";

/// Last index `LTRIM` keeps for a histogram holding `capacity` entries.
pub fn histogram_trim_stop(capacity: usize) -> isize {
    capacity as isize - 1
}
