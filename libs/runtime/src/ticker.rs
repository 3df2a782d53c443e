//! Periodic tick loop
//!
//! The one concurrency shape every service shares: wait for whichever comes
//! first, the next timer fire or cancellation. A tick that is already running
//! is allowed to finish; cancellation is only observed between ticks.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Run `on_tick` every `period` until `stop` is cancelled.
///
/// The first tick fires one full `period` after the call. A slow tick delays
/// the following ones instead of bursting to catch up. Returns the number of
/// ticks that ran.
pub async fn run_every<F, Fut>(period: Duration, stop: CancellationToken, mut on_tick: F) -> u64
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks = 0u64;

    loop {
        tokio::select! {
            biased;
            _ = stop.cancelled() => break,
            _ = ticker.tick() => {
                on_tick().await;
                ticks += 1;
            }
        }
    }

    debug!(ticks, "Ticker stopped");
    ticks
}
