//! Buyer (consumer)
//!
//! Pops exactly one order from the head of the queue per tick. An empty queue
//! is the normal idle state, not an error; a popped order is logged and
//! dropped. There is no acknowledgement or redelivery.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use runtime::{run_every, CancellationToken};
use store::SharedStore;
use tracing::{info, warn};
use types::config::TICK_INTERVAL;
use types::errors::StoreError;
use types::keys::QUEUE_KEY;

/// Configuration for the buyer.
#[derive(Debug, Clone)]
pub struct BuyerConfig {
    pub interval: Duration,
    pub queue_key: String,
}

impl Default for BuyerConfig {
    fn default() -> Self {
        Self {
            interval: TICK_INTERVAL,
            queue_key: QUEUE_KEY.to_string(),
        }
    }
}

/// What a single buy attempt produced.
#[derive(Debug, Clone, PartialEq)]
pub enum BuyOutcome {
    /// An order was popped; carries its raw value.
    Bought(String),
    /// The queue was empty.
    Empty,
    /// The store call failed.
    Failed(StoreError),
}

/// Periodic consumer of orders.
pub struct Buyer {
    store: SharedStore,
    config: BuyerConfig,
    bought: AtomicU64,
    idle: AtomicU64,
    failed: AtomicU64,
}

impl Buyer {
    pub fn new(store: SharedStore, config: BuyerConfig) -> Self {
        Self {
            store,
            config,
            bought: AtomicU64::new(0),
            idle: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    /// Pop one order from the queue head.
    pub async fn buy(&self) -> BuyOutcome {
        match self.store.pop_head(&self.config.queue_key).await {
            Ok(Some(order)) => {
                self.bought.fetch_add(1, Ordering::Relaxed);
                BuyOutcome::Bought(order)
            }
            Ok(None) => {
                self.idle.fetch_add(1, Ordering::Relaxed);
                BuyOutcome::Empty
            }
            Err(e) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                BuyOutcome::Failed(e)
            }
        }
    }

    /// One timer fire: buy and log the outcome.
    pub async fn tick(&self) -> BuyOutcome {
        info!("Buying...");
        let outcome = self.buy().await;
        match &outcome {
            BuyOutcome::Bought(order) => info!(order = %order, "Bought"),
            BuyOutcome::Empty => info!("Nothing to buy"),
            BuyOutcome::Failed(e) => warn!(error = %e, "Nothing to buy"),
        }
        outcome
    }

    /// Tick until `stop` is cancelled. Returns the number of ticks run.
    pub async fn run(&self, stop: CancellationToken) -> u64 {
        info!(
            interval_ms = self.config.interval.as_millis() as u64,
            queue = %self.config.queue_key,
            "Buyer started"
        );
        let ticks = run_every(self.config.interval, stop, move || async move {
            self.tick().await;
        })
        .await;
        info!(
            ticks,
            bought = self.bought(),
            idle = self.idle(),
            failed = self.failed(),
            "Buyer stopped"
        );
        ticks
    }

    pub fn bought(&self) -> u64 {
        self.bought.load(Ordering::Relaxed)
    }

    pub fn idle(&self) -> u64 {
        self.idle.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}
