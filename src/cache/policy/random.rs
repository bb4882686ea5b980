//! Random Policy Module
//!
//! Picks a uniformly random victim among tracked ids.
//!
//! Ids live in a dense vector so a victim is one index away; removal swaps
//! the last id into the vacated slot and fixes its position in the map.

use std::collections::HashMap;

use crate::cache::entry::EntryId;

use super::EvictionPolicy;

const DEFAULT_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug)]
pub struct RandomPolicy {
    ids: Vec<EntryId>,
    positions: HashMap<EntryId, usize>,
    /// XorShift64 state, never zero
    rng_state: u64,
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            ids: Vec::new(),
            positions: HashMap::new(),
            rng_state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    fn next_random(&mut self) -> u64 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng_state = x;
        x
    }
}

impl EvictionPolicy for RandomPolicy {
    fn on_insert(&mut self, id: EntryId) {
        if !self.positions.contains_key(&id) {
            self.positions.insert(id, self.ids.len());
            self.ids.push(id);
        }
    }

    fn on_access(&mut self, _id: EntryId) {}

    fn on_remove(&mut self, id: EntryId) {
        let Some(idx) = self.positions.remove(&id) else {
            return;
        };
        self.ids.swap_remove(idx);
        if let Some(&moved) = self.ids.get(idx) {
            self.positions.insert(moved, idx);
        }
    }

    fn select_victim(&mut self) -> Option<EntryId> {
        if self.ids.is_empty() {
            return None;
        }
        let idx = (self.next_random() % self.ids.len() as u64) as usize;
        Some(self.ids[idx])
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn contains(&self, id: EntryId) -> bool {
        self.positions.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_random_victim_is_tracked() {
        let mut policy = RandomPolicy::with_seed(42);
        for n in 0..10 {
            policy.on_insert(EntryId(n));
        }
        for _ in 0..100 {
            let victim = policy.select_victim().unwrap();
            assert!(policy.contains(victim));
        }
    }

    #[test]
    fn test_random_remove_keeps_positions_consistent() {
        let mut policy = RandomPolicy::with_seed(1);
        for n in 0..5 {
            policy.on_insert(EntryId(n));
        }
        policy.on_remove(EntryId(0));
        policy.on_remove(EntryId(3));
        policy.on_remove(EntryId(42));

        assert_eq!(policy.len(), 3);
        for (idx, id) in policy.ids.iter().enumerate() {
            assert_eq!(policy.positions[id], idx);
        }
    }

    #[test]
    fn test_random_reaches_every_id() {
        let mut policy = RandomPolicy::with_seed(7);
        for n in 0..4 {
            policy.on_insert(EntryId(n));
        }
        let seen: HashSet<_> = (0..200).filter_map(|_| policy.select_victim()).collect();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_random_same_seed_same_sequence() {
        let mut a = RandomPolicy::with_seed(99);
        let mut b = RandomPolicy::with_seed(99);
        for n in 0..8 {
            a.on_insert(EntryId(n));
            b.on_insert(EntryId(n));
        }
        for _ in 0..20 {
            assert_eq!(a.select_victim(), b.select_victim());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut policy = RandomPolicy::with_seed(0);
        policy.on_insert(EntryId(1));
        policy.on_insert(EntryId(2));
        assert!(policy.select_victim().is_some());
    }
}
