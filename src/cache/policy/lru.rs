//! LRU Policy Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use crate::cache::entry::EntryId;

use super::order::OrderedIds;
use super::EvictionPolicy;

// == LRU Policy ==
/// Tracks access order for LRU eviction strategy.
///
/// Ids are kept in recency order where:
/// - Front = Least recently used
/// - Back = Most recently used
#[derive(Debug, Default)]
pub struct LruPolicy {
    order: OrderedIds,
}

impl LruPolicy {
    // == Constructor ==
    /// Creates a new empty LRU policy.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks an id as most recently used, tracking it if new.
    fn touch(&mut self, id: EntryId) {
        self.order.push_back(id);
    }
}

impl EvictionPolicy for LruPolicy {
    fn on_insert(&mut self, id: EntryId) {
        self.touch(id);
    }

    fn on_access(&mut self, id: EntryId) {
        if self.order.contains(id) {
            self.touch(id);
        }
    }

    fn on_remove(&mut self, id: EntryId) {
        self.order.remove(id);
    }

    // == Select Victim ==
    /// Returns the least recently used id.
    fn select_victim(&mut self) -> Option<EntryId> {
        self.order.front()
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn contains(&self, id: EntryId) -> bool {
        self.order.contains(id)
    }
}
