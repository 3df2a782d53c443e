//! Synthetic market series
//!
//! Produces one OHLC tick per timer fire and pushes it onto the histogram
//! buffer. The series is a random walk: each tick's close becomes the seed
//! for the next one.
//!
//! For a seed `S`, every tick satisfies:
//! - `open` and `close` lie in `[S - (max_step - 1), S + (max_step - 1)]`
//! - `high >= max(open, close)` and `low <= min(open, close)`

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use runtime::{run_every, CancellationToken};
use store::SharedStore;
use tracing::{debug, error, info};
use types::config::{MAX_STEP, SEED_BASE, TICK_INTERVAL};
use types::errors::StoreError;
use types::histogram::HistogramEntry;
use types::keys::HISTOGRAM_KEY;
use types::tick::{unix_now, MarketTick};

/// Errors that lose a generated tick.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to serialise ticker: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write ticker: {0}")]
    Store(#[from] StoreError),
}

/// Configuration for the synthetic feed.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub interval: Duration,
    pub histogram_key: String,
    /// Base offset of the initial seed.
    pub seed_base: f64,
    /// Exclusive upper bound on a single step.
    pub max_step: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            interval: TICK_INTERVAL,
            histogram_key: HISTOGRAM_KEY.to_string(),
            seed_base: SEED_BASE,
            max_step: MAX_STEP,
        }
    }
}

/// Random-walk OHLC generator.
#[derive(Debug)]
pub struct TickGenerator<R> {
    rng: R,
    seed: f64,
    max_step: u32,
}

impl<R: Rng> TickGenerator<R> {
    /// Start from an explicit seed.
    pub fn with_seed(rng: R, seed: f64, max_step: u32) -> Self {
        Self {
            rng,
            seed,
            max_step,
        }
    }

    /// Start from `seed_base` plus a random fraction in `[0, 1)`.
    pub fn new(mut rng: R, seed_base: f64, max_step: u32) -> Self {
        let seed = seed_base + rng.gen::<f64>();
        Self::with_seed(rng, seed, max_step)
    }

    /// The seed the next tick will be built from (the previous close).
    pub fn seed(&self) -> f64 {
        self.seed
    }

    /// Whole-number step in `0..max_step`, with a random sign.
    fn signed_step(&mut self) -> f64 {
        let direction = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let magnitude = self.rng.gen_range(0..self.max_step) as f64;
        direction * magnitude
    }

    /// Build the next tick and carry its close forward as the new seed.
    pub fn next_tick(&mut self, timestamp: i64) -> MarketTick {
        let seed = self.seed;
        let open = seed + self.signed_step();
        let close = seed + self.signed_step();
        let wick = open + self.signed_step();

        let high = open.max(close).max(wick);
        let low = open.min(close).min(wick);

        self.seed = close;
        MarketTick::new(timestamp, open, close, high, low)
    }
}

/// Background task pushing generated ticks into the histogram buffer.
pub struct SyntheticFeed<R = StdRng> {
    store: SharedStore,
    config: GeneratorConfig,
    generator: Mutex<TickGenerator<R>>,
    published: AtomicU64,
    lost: AtomicU64,
}

impl SyntheticFeed<StdRng> {
    pub fn from_entropy(store: SharedStore, config: GeneratorConfig) -> Self {
        Self::new(store, config, StdRng::from_entropy())
    }
}

impl<R: Rng + Send> SyntheticFeed<R> {
    pub fn new(store: SharedStore, config: GeneratorConfig, rng: R) -> Self {
        let generator = TickGenerator::new(rng, config.seed_base, config.max_step);
        Self {
            store,
            config,
            generator: Mutex::new(generator),
            published: AtomicU64::new(0),
            lost: AtomicU64::new(0),
        }
    }

    /// Generate a tick stamped `timestamp` and push it.
    pub async fn publish_at(&self, timestamp: i64) -> Result<MarketTick, FeedError> {
        let tick = {
            let mut generator = self.generator.lock().unwrap_or_else(|e| e.into_inner());
            generator.next_tick(timestamp)
        };

        let payload = HistogramEntry::from(tick).encode()?;
        self.store
            .push_head(&self.config.histogram_key, &payload)
            .await?;

        self.published.fetch_add(1, Ordering::Relaxed);
        Ok(tick)
    }

    /// One timer fire: publish a tick stamped with the current time.
    pub async fn tick(&self) {
        debug!("Getting tickers...");
        match self.publish_at(unix_now()).await {
            Ok(tick) => debug!(
                open = tick.open,
                close = tick.close,
                high = tick.high,
                low = tick.low,
                "Published ticker"
            ),
            Err(e) => {
                self.lost.fetch_add(1, Ordering::Relaxed);
                error!(error = %e, "Ticker lost");
            }
        }
    }

    /// Tick until `stop` is cancelled. Returns the number of ticks run.
    pub async fn run(&self, stop: CancellationToken) -> u64 {
        info!(
            interval_ms = self.config.interval.as_millis() as u64,
            histogram = %self.config.histogram_key,
            "Synthetic feed started"
        );
        let ticks = run_every(self.config.interval, stop, move || self.tick()).await;
        info!(
            ticks,
            published = self.published(),
            lost = self.lost(),
            "Synthetic feed stopped"
        );
        ticks
    }

    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    pub fn lost(&self) -> u64 {
        self.lost.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_initial_seed_offset() {
        let generator = TickGenerator::new(StdRng::seed_from_u64(5), 200.0, 5);
        assert!(generator.seed() >= 200.0 && generator.seed() < 201.0);
    }

    #[test]
    fn test_close_becomes_next_seed() {
        let mut generator = TickGenerator::with_seed(StdRng::seed_from_u64(8), 200.5, 5);
        let first = generator.next_tick(1);
        assert_eq!(generator.seed(), first.close);

        let second = generator.next_tick(2);
        assert!((second.open - first.close).abs() <= 4.0);
        assert!((second.close - first.close).abs() <= 4.0);
    }

    #[test]
    fn test_zero_rng_gives_flat_tick() {
        // An all-zero rng draws magnitude 0 every time.
        let mut generator = TickGenerator::with_seed(StepRng::new(0, 0), 200.0, 5);
        let tick = generator.next_tick(0);
        assert_eq!(tick.open, 200.0);
        assert_eq!(tick.close, 200.0);
        assert_eq!(tick.high, 200.0);
        assert_eq!(tick.low, 200.0);
    }

    #[test]
    fn test_steps_are_whole_numbers() {
        let mut generator = TickGenerator::with_seed(StdRng::seed_from_u64(21), 200.0, 5);
        for ts in 0..200 {
            let seed = generator.seed();
            let tick = generator.next_tick(ts);
            assert_eq!((tick.open - seed).fract(), 0.0);
            assert_eq!((tick.close - seed).fract(), 0.0);
        }
    }
}
