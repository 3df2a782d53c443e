//! Seller (producer)
//!
//! Once per tick, draws a batch size in `0..max_batch`, pushes that many order
//! units onto the queue, records the batch size in the histogram buffer and
//! trims the buffer back to its capacity.
//!
//! A failed store call abandons the rest of the tick. Nothing is retried; the
//! next tick starts from scratch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use runtime::{run_every, CancellationToken};
use store::SharedStore;
use tracing::{error, info};
use types::config::{histogram_trim_stop, HISTOGRAM_CAPACITY, MAX_BATCH, TICK_INTERVAL};
use types::errors::StoreError;
use types::histogram::HistogramEntry;
use types::keys::{HISTOGRAM_KEY, ORDER_UNIT, QUEUE_KEY};

/// Errors that abort a seller tick.
#[derive(Debug, thiserror::Error)]
pub enum SellError {
    #[error("pushed {pushed} of {count} orders: {source}")]
    Queue {
        pushed: u32,
        count: u32,
        #[source]
        source: StoreError,
    },

    #[error("failed to record batch of {count}: {source}")]
    Histogram {
        count: u32,
        #[source]
        source: StoreError,
    },

    #[error("failed to encode batch size: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Configuration for the seller.
#[derive(Debug, Clone)]
pub struct SellerConfig {
    pub interval: Duration,
    pub queue_key: String,
    pub histogram_key: String,
    /// Exclusive upper bound on the batch size.
    pub max_batch: u32,
    /// Histogram entries kept after each trim.
    pub histogram_capacity: usize,
}

impl Default for SellerConfig {
    fn default() -> Self {
        Self {
            interval: TICK_INTERVAL,
            queue_key: QUEUE_KEY.to_string(),
            histogram_key: HISTOGRAM_KEY.to_string(),
            max_batch: MAX_BATCH,
            histogram_capacity: HISTOGRAM_CAPACITY,
        }
    }
}

/// Periodic producer of order batches.
pub struct Seller<R = StdRng> {
    store: SharedStore,
    config: SellerConfig,
    rng: Mutex<R>,
    /// Ticks that completed without a store failure.
    batches_sold: AtomicU64,
    /// Total order units pushed.
    orders_pushed: AtomicU64,
    /// Ticks abandoned on a store failure.
    ticks_failed: AtomicU64,
}

impl Seller<StdRng> {
    /// Seller seeded from OS entropy.
    pub fn from_entropy(store: SharedStore, config: SellerConfig) -> Self {
        Self::new(store, config, StdRng::from_entropy())
    }
}

impl<R: Rng + Send> Seller<R> {
    pub fn new(store: SharedStore, config: SellerConfig, rng: R) -> Self {
        Self {
            store,
            config,
            rng: Mutex::new(rng),
            batches_sold: AtomicU64::new(0),
            orders_pushed: AtomicU64::new(0),
            ticks_failed: AtomicU64::new(0),
        }
    }

    /// Draw the next batch size, uniform in `0..max_batch`.
    pub fn draw_batch(&self) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..self.config.max_batch)
    }

    /// Push `count` orders, record `count` in the histogram, trim the histogram.
    pub async fn sell_batch(&self, count: u32) -> Result<(), SellError> {
        for pushed in 0..count {
            if let Err(source) = self
                .store
                .push_head(&self.config.queue_key, ORDER_UNIT)
                .await
            {
                self.orders_pushed.fetch_add(pushed as u64, Ordering::Relaxed);
                return Err(SellError::Queue {
                    pushed,
                    count,
                    source,
                });
            }
        }
        self.orders_pushed.fetch_add(count as u64, Ordering::Relaxed);

        let record = HistogramEntry::BatchSize(count).encode()?;
        self.store
            .push_head(&self.config.histogram_key, &record)
            .await
            .map_err(|source| SellError::Histogram { count, source })?;

        let stop = histogram_trim_stop(self.config.histogram_capacity);
        self.store
            .trim(&self.config.histogram_key, 0, stop)
            .await
            .map_err(|source| SellError::Histogram { count, source })?;

        self.batches_sold.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Draw a batch size and sell it. Returns the batch size.
    pub async fn sell(&self) -> Result<u32, SellError> {
        let count = self.draw_batch();
        self.sell_batch(count).await?;
        Ok(count)
    }

    /// One timer fire: sell and log the outcome.
    pub async fn tick(&self) {
        info!("Selling...");
        match self.sell().await {
            Ok(count) => info!(count, "Sold batch"),
            Err(e) => {
                self.ticks_failed.fetch_add(1, Ordering::Relaxed);
                error!(error = %e, "Failed to sell");
            }
        }
    }

    /// Tick until `stop` is cancelled. Returns the number of ticks run.
    pub async fn run(&self, stop: CancellationToken) -> u64 {
        info!(
            interval_ms = self.config.interval.as_millis() as u64,
            queue = %self.config.queue_key,
            histogram = %self.config.histogram_key,
            "Seller started"
        );
        let ticks = run_every(self.config.interval, stop, move || self.tick()).await;
        info!(
            ticks,
            batches_sold = self.batches_sold(),
            orders_pushed = self.orders_pushed(),
            ticks_failed = self.ticks_failed(),
            "Seller stopped"
        );
        ticks
    }

    pub fn batches_sold(&self) -> u64 {
        self.batches_sold.load(Ordering::Relaxed)
    }

    pub fn orders_pushed(&self) -> u64 {
        self.orders_pushed.load(Ordering::Relaxed)
    }

    pub fn ticks_failed(&self) -> u64 {
        self.ticks_failed.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use std::sync::Arc;
    use store::MemoryStore;

    fn seller_with(rng: StepRng) -> Seller<StepRng> {
        Seller::new(
            Arc::new(MemoryStore::new()),
            SellerConfig::default(),
            rng,
        )
    }

    #[test]
    fn test_draw_batch_in_range() {
        let seller = seller_with(StepRng::new(0, 0x9E37_79B9_7F4A_7C15));
        for _ in 0..1000 {
            assert!(seller.draw_batch() < MAX_BATCH);
        }
    }

    #[test]
    fn test_default_config() {
        let config = SellerConfig::default();
        assert_eq!(config.queue_key, "acme:queue");
        assert_eq!(config.histogram_key, "acme:histogram");
        assert_eq!(config.max_batch, 10);
        assert_eq!(config.histogram_capacity, 101);
        assert_eq!(config.interval, Duration::from_secs(1));
    }

    #[test]
    fn test_error_display_reports_progress() {
        let err = SellError::Queue {
            pushed: 3,
            count: 7,
            source: StoreError::command("LPUSH", "acme:queue", "timeout"),
        };
        assert!(err.to_string().starts_with("pushed 3 of 7 orders"));
    }
}
