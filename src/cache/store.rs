//! Content Store Module
//!
//! Name-indexed cache of data objects combining the name index, the active
//! eviction policy and the freshness tracker.
//!
//! The entry map, the name index and the policy metadata always hold the same
//! set of ids. Every path that creates or destroys an entry goes through
//! `insert_entry` or `remove_entry`, which update all of them before
//! returning.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::clock::{Clock, SystemClock, Timestamp};
use crate::cache::entry::{CacheEntry, EntryId, Payload};
use crate::cache::freshness::{Freshness, FreshnessTracker};
use crate::cache::name::Name;
use crate::cache::name_index::NameIndex;
use crate::cache::policy::{EvictionPolicy, Policy, PolicyKind};
use crate::cache::stats::CsStats;
use crate::config::StoreConfig;
use crate::packet::{DataObject, Request};

// == Add Outcome ==
/// Result of offering a data object to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Stored under a name that had no entry
    Inserted,
    /// Replaced the entry already stored under the name
    Replaced,
    /// Refused; any existing entry for the name is unchanged
    Declined(DeclineReason),
    /// Capacity is zero, nothing is ever retained
    NotRetained,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclineReason {
    PayloadTooLarge { size: usize, limit: usize },
    /// Freshness of zero or less
    AlreadyStale,
}

// == Content Store ==
#[derive(Debug)]
pub struct ContentStore {
    entries: HashMap<EntryId, CacheEntry>,
    index: NameIndex,
    policy: Policy,
    freshness: FreshnessTracker,
    stats: CsStats,
    clock: Arc<dyn Clock>,
    max_size: usize,
    max_payload_size: Option<usize>,
    next_id: u64,
}

impl ContentStore {
    // == Constructor ==
    /// Creates a store that reads time from the system clock.
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Creates a store driven by the given clock.
    pub fn with_clock(config: &StoreConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            index: NameIndex::new(),
            policy: Policy::new(config.policy, config.random_seed),
            freshness: FreshnessTracker::new(),
            stats: CsStats::new(),
            clock,
            max_size: config.max_size,
            max_payload_size: config.max_payload_size,
            next_id: 0,
        }
    }

    // == Add ==
    /// Offers a data object to the store.
    ///
    /// An object whose name is already stored replaces that entry in place and
    /// is treated as a fresh insert by the policy. Otherwise, when the store is
    /// full, one entry is evicted first: an expired one if any exists, else
    /// the policy's victim.
    pub fn add(&mut self, data: DataObject) -> AddOutcome {
        if self.max_size == 0 {
            debug!("CS disabled, not retaining {}", data.name);
            return AddOutcome::NotRetained;
        }

        if let Some(limit) = self.max_payload_size {
            let size = data.payload.len();
            if size > limit {
                warn!("Declining {}: payload of {} bytes exceeds {}", data.name, size, limit);
                self.stats.record_decline();
                return AddOutcome::Declined(DeclineReason::PayloadTooLarge { size, limit });
            }
        }

        let now = self.clock.now();
        let deadline = match Freshness::at_insertion(now, data.freshness) {
            Freshness::Unbounded => None,
            Freshness::Until(deadline) => Some(deadline),
            Freshness::Stale => {
                debug!("Declining {}: freshness already elapsed", data.name);
                self.stats.record_decline();
                return AddOutcome::Declined(DeclineReason::AlreadyStale);
            }
        };

        if let Some(id) = self.index.lookup_exact(&data.name) {
            if let Some(entry) = self.entries.get_mut(&id) {
                entry.refresh(data.payload, deadline, now);
                self.freshness.track(id, deadline);
                self.policy.on_insert(id);
                self.stats.record_replacement();
                debug!("Replaced {} ({})", data.name, id);
                return AddOutcome::Replaced;
            }
        }

        while self.entries.len() >= self.max_size {
            if !self.evict_one(now) {
                break;
            }
        }

        let id = self.insert_entry(data.name, data.payload, deadline, now);
        self.stats.record_insertion();
        debug!("Inserted {}", id);
        AddOutcome::Inserted
    }

    // == Lookup ==
    /// Returns the payload stored under the request's exact name.
    ///
    /// An entry whose deadline has passed is removed and reported as a miss.
    pub fn lookup(&mut self, request: &Request) -> Option<Payload> {
        let Some(id) = self.index.lookup_exact(&request.name) else {
            self.stats.record_miss();
            debug!("CS miss {}", request.name);
            return None;
        };

        let now = self.clock.now();
        if self.freshness.is_expired(id, now) {
            self.remove_entry(id);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            debug!("CS miss {} (expired)", request.name);
            return None;
        }

        let entry = self.entries.get_mut(&id)?;
        entry.record_access(now);
        self.policy.on_access(id);
        self.stats.record_hit();
        debug!("CS hit {}", request.name);
        Some(Arc::clone(&entry.payload))
    }

    // == Remove ==
    /// Removes the entry stored under `name`. Absent names are a no-op.
    ///
    /// Returns true if an entry was removed.
    pub fn remove(&mut self, name: &Name) -> bool {
        match self.index.lookup_exact(name) {
            Some(id) => self.remove_entry(id).is_some(),
            None => false,
        }
    }

    // == Set Max Size ==
    /// Changes the capacity, evicting synchronously until the store fits.
    ///
    /// Returns the number of entries evicted.
    pub fn set_max_size(&mut self, max_size: usize) -> usize {
        let previous = self.max_size;
        self.max_size = max_size;

        let now = self.clock.now();
        let mut evicted = 0;
        while self.entries.len() > max_size && self.evict_one(now) {
            evicted += 1;
        }

        info!(
            "CS max size changed {} -> {}, evicted {} entries",
            previous, max_size, evicted
        );
        evicted
    }

    // == Purge Expired ==
    /// Removes every entry whose deadline has passed at the clock's current time.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        self.purge_expired_at(now)
    }

    /// Removes every entry whose deadline has passed at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired_at(&mut self, now: Timestamp) -> usize {
        let expired = self.freshness.expired(now);
        let count = expired.len();
        for id in expired {
            self.remove_entry(id);
        }
        self.stats.record_expirations(count);
        count
    }

    // == Contains ==
    /// Checks for a fresh entry under `name` without touching any state.
    pub fn contains(&self, name: &Name) -> bool {
        match self.index.lookup_exact(name) {
            Some(id) => !self.freshness.is_expired(id, self.clock.now()),
            None => false,
        }
    }

    /// Returns the current number of entries. Never triggers expiration.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    // == Stats ==
    pub fn stats(&self) -> CsStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    fn insert_entry(
        &mut self,
        name: Name,
        payload: Payload,
        deadline: Option<Timestamp>,
        now: Timestamp,
    ) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;

        self.index.insert(&name, id);
        self.freshness.track(id, deadline);
        self.policy.on_insert(id);
        self.entries
            .insert(id, CacheEntry::new(id, name, payload, deadline, now));
        self.stats.set_total_entries(self.entries.len());
        id
    }

    fn remove_entry(&mut self, id: EntryId) -> Option<CacheEntry> {
        let entry = self.entries.remove(&id)?;
        self.index.remove(&entry.name);
        self.policy.on_remove(id);
        self.freshness.untrack(id);
        self.stats.set_total_entries(self.entries.len());
        Some(entry)
    }

    // == Evict One ==
    /// Removes one entry to make room, preferring expired entries over the
    /// policy's victim. Returns false only if the store is empty.
    fn evict_one(&mut self, now: Timestamp) -> bool {
        if self.entries.is_empty() {
            return false;
        }

        if let Some(id) = self.freshness.first_expired(now) {
            if let Some(entry) = self.remove_entry(id) {
                self.stats.record_expirations(1);
                debug!("Dropped expired {} to make room", entry.name);
                return true;
            }
        }

        let Some(victim) = self.policy.select_victim() else {
            panic!(
                "{} policy tracks no entries while the store holds {}",
                self.policy.kind(),
                self.entries.len()
            );
        };
        if let Some(entry) = self.remove_entry(victim) {
            self.stats.record_eviction();
            debug!("Evicted {} ({} policy)", entry.name, self.policy.kind());
        }
        true
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert!(self.entries.len() <= self.max_size, "capacity exceeded");
        assert_eq!(self.index.len(), self.entries.len(), "index out of step");
        assert_eq!(self.policy.len(), self.entries.len(), "policy out of step");
        for (id, entry) in &self.entries {
            assert_eq!(self.index.lookup_exact(&entry.name), Some(*id));
            assert!(self.policy.contains(*id));
            assert_eq!(self.freshness.deadline(*id), entry.freshness_deadline);
        }
        assert!(self.freshness.len() <= self.entries.len());
    }
}
