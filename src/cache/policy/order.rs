//! Ordered id sequence shared by the LRU and FIFO policies.

use std::collections::{BTreeMap, HashMap};

use crate::cache::entry::EntryId;

/// Ids ordered by the tick at which they were last pushed.
///
/// Front = oldest tick, back = newest. Push, remove and front are all
/// logarithmic in the number of ids.
#[derive(Debug, Default)]
pub(crate) struct OrderedIds {
    next_tick: u64,
    by_tick: BTreeMap<u64, EntryId>,
    ticks: HashMap<EntryId, u64>,
}

impl OrderedIds {
    /// Moves `id` to the back, inserting it if absent.
    pub(crate) fn push_back(&mut self, id: EntryId) {
        if let Some(tick) = self.ticks.remove(&id) {
            self.by_tick.remove(&tick);
        }
        let tick = self.next_tick;
        self.next_tick += 1;
        self.by_tick.insert(tick, id);
        self.ticks.insert(id, tick);
    }

    pub(crate) fn remove(&mut self, id: EntryId) -> bool {
        match self.ticks.remove(&id) {
            Some(tick) => {
                self.by_tick.remove(&tick);
                true
            }
            None => false,
        }
    }

    pub(crate) fn front(&self) -> Option<EntryId> {
        self.by_tick.first_key_value().map(|(_, id)| *id)
    }

    pub(crate) fn len(&self) -> usize {
        self.ticks.len()
    }

    pub(crate) fn contains(&self, id: EntryId) -> bool {
        self.ticks.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_back_moves_existing() {
        let mut ids = OrderedIds::default();
        ids.push_back(EntryId(1));
        ids.push_back(EntryId(2));
        ids.push_back(EntryId(1));

        assert_eq!(ids.len(), 2);
        assert_eq!(ids.front(), Some(EntryId(2)));
    }

    #[test]
    fn test_remove() {
        let mut ids = OrderedIds::default();
        ids.push_back(EntryId(1));
        ids.push_back(EntryId(2));

        assert!(ids.remove(EntryId(1)));
        assert!(!ids.remove(EntryId(1)));
        assert!(!ids.contains(EntryId(1)));
        assert_eq!(ids.front(), Some(EntryId(2)));
    }
}
