//! LFU Policy Module
//!
//! Implements Least Frequently Used tracking for cache eviction.
//!
//! Each tracked id carries an access counter and the sequence number of its
//! (most recent) insertion. Ids are kept in a set ordered by
//! `(counter, insertion sequence)`, so the minimum element is the least
//! frequently used id, and among equally used ids the one inserted first.

use std::collections::{BTreeSet, HashMap};

use crate::cache::entry::EntryId;

use super::EvictionPolicy;

#[derive(Debug, Copy, Clone)]
struct LfuMeta {
    frequency: u64,
    inserted_seq: u64,
}

// == LFU Policy ==
#[derive(Debug, Default)]
pub struct LfuPolicy {
    next_seq: u64,
    meta: HashMap<EntryId, LfuMeta>,
    // (frequency, inserted_seq, id); first element is the victim
    order: BTreeSet<(u64, u64, EntryId)>,
}

impl LfuPolicy {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn frequency(&self, id: EntryId) -> Option<u64> {
        self.meta.get(&id).map(|m| m.frequency)
    }
}

impl EvictionPolicy for LfuPolicy {
    // == On Insert ==
    /// Starts `id` at frequency zero with the newest insertion sequence.
    ///
    /// A replaced entry loses its accumulated frequency.
    fn on_insert(&mut self, id: EntryId) {
        self.on_remove(id);

        let meta = LfuMeta {
            frequency: 0,
            inserted_seq: self.next_seq,
        };
        self.next_seq += 1;
        self.order.insert((meta.frequency, meta.inserted_seq, id));
        self.meta.insert(id, meta);
    }

    // == On Access ==
    fn on_access(&mut self, id: EntryId) {
        if let Some(meta) = self.meta.get_mut(&id) {
            self.order.remove(&(meta.frequency, meta.inserted_seq, id));
            meta.frequency = meta.frequency.saturating_add(1);
            self.order.insert((meta.frequency, meta.inserted_seq, id));
        }
    }

    fn on_remove(&mut self, id: EntryId) {
        if let Some(meta) = self.meta.remove(&id) {
            self.order.remove(&(meta.frequency, meta.inserted_seq, id));
        }
    }

    // == Select Victim ==
    /// Returns the id with the lowest counter, oldest insertion first on ties.
    fn select_victim(&mut self) -> Option<EntryId> {
        self.order.first().map(|&(_, _, id)| id)
    }

    fn len(&self) -> usize {
        self.meta.len()
    }

    fn contains(&self, id: EntryId) -> bool {
        self.meta.contains_key(&id)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> EntryId {
        EntryId(n)
    }

    #[test]
    fn test_lfu_new_ids_start_at_zero() {
        let mut lfu = LfuPolicy::new();
        lfu.on_insert(id(1));
        assert_eq!(lfu.frequency(id(1)), Some(0));
        assert_eq!(lfu.frequency(id(2)), None);
    }

    #[test]
    fn test_lfu_evicts_least_frequent() {
        let mut lfu = LfuPolicy::new();
        lfu.on_insert(id(1));
        lfu.on_insert(id(2));

        lfu.on_access(id(1));
        lfu.on_access(id(1));
        lfu.on_access(id(1));

        assert_eq!(lfu.frequency(id(1)), Some(3));
        assert_eq!(lfu.select_victim(), Some(id(2)));
    }

    #[test]
    fn test_lfu_ties_broken_by_oldest_insert() {
        let mut lfu = LfuPolicy::new();
        lfu.on_insert(id(3));
        lfu.on_insert(id(1));
        lfu.on_insert(id(2));

        // All at zero: first inserted wins regardless of id value
        assert_eq!(lfu.select_victim(), Some(id(3)));

        lfu.on_access(id(3));
        assert_eq!(lfu.select_victim(), Some(id(1)));
    }

    #[test]
    fn test_lfu_reinsert_resets_frequency() {
        let mut lfu = LfuPolicy::new();
        lfu.on_insert(id(1));
        lfu.on_insert(id(2));
        lfu.on_access(id(1));
        lfu.on_access(id(2));

        // Replacing 1 treats it as a fresh insert: frequency 0, newest
        lfu.on_insert(id(1));
        assert_eq!(lfu.frequency(id(1)), Some(0));
        assert_eq!(lfu.len(), 2);
        assert_eq!(lfu.select_victim(), Some(id(1)));
    }

    #[test]
    fn test_lfu_remove_clears_metadata() {
        let mut lfu = LfuPolicy::new();
        lfu.on_insert(id(1));
        lfu.on_access(id(1));
        lfu.on_remove(id(1));

        assert!(lfu.is_empty());
        assert!(lfu.order.is_empty());
        assert_eq!(lfu.select_victim(), None);

        // Access after removal must not resurrect the id
        lfu.on_access(id(1));
        assert!(!lfu.contains(id(1)));
    }
}
