//! In-memory list store
//!
//! Reproduces Redis list semantics closely enough to stand in for a live
//! server in tests and local runs. Each key is a `VecDeque` whose front is the
//! list head.

use std::collections::VecDeque;

use async_trait::async_trait;
use dashmap::DashMap;
use types::errors::StoreError;

use crate::QueueStore;

/// Process-local list store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    lists: DashMap<String, VecDeque<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `key` from head to tail.
    pub fn contents(&self, key: &str) -> Vec<String> {
        self.lists
            .get(key)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Drop any list that became empty, as Redis deletes empty keys.
    fn reap(&self, key: &str) {
        self.lists.remove_if(key, |_, list| list.is_empty());
    }
}

/// Resolve an `LTRIM`-style index against a list of length `len`.
fn resolve_index(index: isize, len: usize) -> isize {
    if index < 0 {
        len as isize + index
    } else {
        index
    }
}

fn trim_list(list: &mut VecDeque<String>, start: isize, stop: isize) {
    let len = list.len();
    let start = resolve_index(start, len).max(0);
    let stop = resolve_index(stop, len);

    if start > stop || start >= len as isize {
        list.clear();
        return;
    }

    let stop = (stop as usize).min(len - 1);
    list.truncate(stop + 1);
    list.drain(..start as usize);
}

#[async_trait]
impl QueueStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn push_head(&self, key: &str, value: &str) -> Result<usize, StoreError> {
        let mut list = self.lists.entry(key.to_string()).or_default();
        list.push_front(value.to_string());
        Ok(list.len())
    }

    async fn pop_head(&self, key: &str) -> Result<Option<String>, StoreError> {
        let popped = self
            .lists
            .get_mut(key)
            .and_then(|mut list| list.pop_front());
        self.reap(key);
        Ok(popped)
    }

    async fn pop_tail(&self, key: &str) -> Result<Option<String>, StoreError> {
        let popped = self.lists.get_mut(key).and_then(|mut list| list.pop_back());
        self.reap(key);
        Ok(popped)
    }

    async fn len(&self, key: &str) -> Result<usize, StoreError> {
        Ok(self.lists.get(key).map(|list| list.len()).unwrap_or(0))
    }

    async fn trim(&self, key: &str, start: isize, stop: isize) -> Result<(), StoreError> {
        if let Some(mut list) = self.lists.get_mut(key) {
            trim_list(&mut list, start, stop);
        }
        self.reap(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: &[&str]) -> VecDeque<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_trim_keeps_inclusive_prefix() {
        let mut l = list(&["a", "b", "c", "d"]);
        trim_list(&mut l, 0, 1);
        assert_eq!(l, list(&["a", "b"]));
    }

    #[test]
    fn test_trim_stop_past_end_is_noop() {
        let mut l = list(&["a", "b", "c"]);
        trim_list(&mut l, 0, 100);
        assert_eq!(l, list(&["a", "b", "c"]));
    }

    #[test]
    fn test_trim_negative_indices() {
        let mut l = list(&["a", "b", "c", "d", "e"]);
        trim_list(&mut l, -3, -1);
        assert_eq!(l, list(&["c", "d", "e"]));

        let mut l = list(&["a", "b", "c"]);
        trim_list(&mut l, -10, 0);
        assert_eq!(l, list(&["a"]));
    }

    #[test]
    fn test_trim_empty_range_clears() {
        let mut l = list(&["a", "b", "c"]);
        trim_list(&mut l, 2, 1);
        assert!(l.is_empty());

        let mut l = list(&["a", "b", "c"]);
        trim_list(&mut l, 5, 10);
        assert!(l.is_empty());
    }
}
