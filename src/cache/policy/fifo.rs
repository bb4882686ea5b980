//! FIFO Policy Module
//!
//! Evicts in insertion order. Lookups do not reorder.

use crate::cache::entry::EntryId;

use super::order::OrderedIds;
use super::EvictionPolicy;

#[derive(Debug, Default)]
pub struct FifoPolicy {
    order: OrderedIds,
}

impl FifoPolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EvictionPolicy for FifoPolicy {
    fn on_insert(&mut self, id: EntryId) {
        self.order.push_back(id);
    }

    fn on_access(&mut self, _id: EntryId) {}

    fn on_remove(&mut self, id: EntryId) {
        self.order.remove(id);
    }

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
