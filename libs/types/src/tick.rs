//! Synthetic market tick
//!
//! One OHLC sample produced by the dashboard's generator. On the wire it is a
//! bare 5-element JSON array `[timestamp, open, close, high, low]`, which is
//! what the front-end gauge consumes, so the struct serializes through
//! `[f64; 5]` rather than as an object.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single synthetic OHLC tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 5]", from = "[f64; 5]")]
pub struct MarketTick {
    /// Unix timestamp in seconds.
    pub timestamp: f64,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
}

impl MarketTick {
    pub fn new(timestamp: i64, open: f64, close: f64, high: f64, low: f64) -> Self {
        Self {
            timestamp: timestamp as f64,
            open,
            close,
            high,
            low,
        }
    }

    /// Validate OHLC invariants.
    pub fn is_valid(&self) -> bool {
        self.high >= self.open
            && self.high >= self.close
            && self.high >= self.low
            && self.low <= self.open
            && self.low <= self.close
    }
}

impl From<MarketTick> for [f64; 5] {
    fn from(tick: MarketTick) -> Self {
        [tick.timestamp, tick.open, tick.close, tick.high, tick.low]
    }
}

impl From<[f64; 5]> for MarketTick {
    fn from([timestamp, open, close, high, low]: [f64; 5]) -> Self {
        Self {
            timestamp,
            open,
            close,
            high,
            low,
        }
    }
}

/// Current unix time in whole seconds.
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}
