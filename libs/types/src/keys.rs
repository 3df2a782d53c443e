//! Store key names
//!
//! Every process must agree on these; changing one silently splits the
//! system in two.

/// List used as a LIFO stack of pending orders.
pub const QUEUE_KEY: &str = "acme:queue";

/// Bounded list of recent batch sizes and synthetic ticks.
pub const HISTOGRAM_KEY: &str = "acme:histogram";

/// Value pushed onto the queue for one order.
pub const ORDER_UNIT: &str = "1";
