//! Queue store clients
//!
//! Every bit of shared state lives in an external list store. Services talk to
//! it through [`QueueStore`], which mirrors the handful of Redis list commands
//! the system relies on:
//!
//! | method      | command |
//! |-------------|---------|
//! | `push_head` | `LPUSH` |
//! | `pop_head`  | `LPOP`  |
//! | `pop_tail`  | `RPOP`  |
//! | `len`       | `LLEN`  |
//! | `trim`      | `LTRIM` |
//! | `ping`      | `PING`  |
//!
//! The store is trusted to make each call atomic; nothing here adds locking
//! across calls.

pub mod memory;
pub mod redis_store;

use std::sync::Arc;

use async_trait::async_trait;
use types::errors::StoreError;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Shared, type-erased handle used by services.
pub type SharedStore = Arc<dyn QueueStore>;

/// Atomic list operations on a named key.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Round-trip to verify the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Push `value` at the head of `key`, returning the new length.
    async fn push_head(&self, key: &str, value: &str) -> Result<usize, StoreError>;

    /// Pop from the head of `key`. `None` when the list is empty or missing.
    async fn pop_head(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Pop from the tail of `key`. `None` when the list is empty or missing.
    async fn pop_tail(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Length of `key`; a missing key has length zero.
    async fn len(&self, key: &str) -> Result<usize, StoreError>;

    /// Keep only the inclusive index range `start..=stop` of `key`.
    /// Negative indices count from the tail, as in `LTRIM`.
    async fn trim(&self, key: &str, start: isize, stop: isize) -> Result<(), StoreError>;
}
