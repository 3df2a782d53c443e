//! Types library for the acme order queue
//!
//! Shared between the seller, buyer and dashboard processes. The processes
//! never talk to each other directly, so the key names and record encodings
//! defined here are the whole wire contract between them.
//!
//! # Modules
//! - `keys`: Store key names (queue and histogram lists)
//! - `config`: Timing and capacity constants
//! - `tick`: Synthetic market tick (`[timestamp, open, close, high, low]`)
//! - `histogram`: Histogram buffer entries (batch sizes and ticks)
//! - `errors`: Store error taxonomy

pub mod config;
pub mod errors;
pub mod histogram;
pub mod keys;
pub mod tick;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::errors::*;
    pub use crate::histogram::*;
    pub use crate::keys::*;
    pub use crate::tick::*;
}
