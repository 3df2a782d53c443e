//! Histogram buffer entries
//!
//! The buffer is shared by two writers with different record shapes: the
//! seller pushes raw batch sizes, the dashboard's generator pushes synthetic
//! ticks. Readers have to cope with either.

use serde::{Deserialize, Serialize};

use crate::tick::MarketTick;

/// One decoded histogram buffer entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistogramEntry {
    /// Number of orders a seller tick produced.
    BatchSize(u32),
    /// A synthetic OHLC tick.
    Tick(MarketTick),
}

impl HistogramEntry {
    /// Encode for storage. Batch sizes are stored as plain decimal integers.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode a raw stored value.
    pub fn decode(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// The tick, if this entry is one.
    pub fn as_tick(&self) -> Option<&MarketTick> {
        match self {
            HistogramEntry::Tick(tick) => Some(tick),
            HistogramEntry::BatchSize(_) => None,
        }
    }
}

impl From<MarketTick> for HistogramEntry {
    fn from(tick: MarketTick) -> Self {
        HistogramEntry::Tick(tick)
    }
}
