//! Readiness flag
//!
//! Starts unhealthy. The dashboard flips it on once its listener is bound and
//! off again as the very first step of draining.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct HealthFlag(Arc<AtomicBool>);

impl HealthFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_healthy(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn set_unhealthy(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_healthy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
