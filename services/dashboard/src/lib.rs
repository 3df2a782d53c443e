//! Dashboard Service
//!
//! Read-mostly HTTP front-end over the shared store, plus a background
//! generator that feeds synthetic market ticks into the histogram buffer.
//!
//! # Routes
//!
//! ```text
//! GET /size        → {"size": <queue length>}
//! GET /histogram   → [timestamp, open, close, high, low]   (pops one entry)
//! GET /healthz     → 204 ready | 503 draining
//! GET /*           → bundled static front-end
//! ```
//!
//! Every request passes through the interceptor stack built in
//! [`router::create_router`]: request id, access log, timeout.

pub mod error;
pub mod generator;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod state;

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";
