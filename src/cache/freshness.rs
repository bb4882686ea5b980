//! Freshness Tracker Module
//!
//! Bookkeeping of producer-supplied freshness deadlines, ordered by deadline
//! so the earliest expired entry and the full expired set are found without
//! scanning the store.

use std::collections::{BTreeSet, HashMap};

use chrono::Duration;

use crate::cache::clock::Timestamp;
use crate::cache::entry::EntryId;

// == Freshness ==
/// Validity of a data object at insertion time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// No freshness duration was supplied; never expires by time.
    Unbounded,
    /// Valid for lookups strictly before the deadline.
    Until(Timestamp),
    /// Zero or negative duration; the object is expired on arrival.
    Stale,
}

impl Freshness {
    /// Computes the deadline for an object inserted at `inserted_at`.
    ///
    /// Positive durations shorter than a millisecond round up to one.
    pub fn at_insertion(inserted_at: Timestamp, duration: Option<Duration>) -> Self {
        match duration {
            None => Freshness::Unbounded,
            Some(d) if d <= Duration::zero() => Freshness::Stale,
            Some(d) => {
                let ms = d.num_milliseconds().max(1) as u64;
                Freshness::Until(inserted_at.adding(ms))
            }
        }
    }
}

// == Freshness Tracker ==
#[derive(Debug, Default)]
pub struct FreshnessTracker {
    deadlines: BTreeSet<(Timestamp, EntryId)>,
    by_id: HashMap<EntryId, Timestamp>,
}

impl FreshnessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // == Track ==
    /// Sets the deadline of `id`, replacing any previous one. `None` stops tracking.
    pub fn track(&mut self, id: EntryId, deadline: Option<Timestamp>) {
        self.untrack(id);
        if let Some(deadline) = deadline {
            self.deadlines.insert((deadline, id));
            self.by_id.insert(id, deadline);
        }
    }

    pub fn untrack(&mut self, id: EntryId) {
        if let Some(deadline) = self.by_id.remove(&id) {
            self.deadlines.remove(&(deadline, id));
        }
    }

    pub fn deadline(&self, id: EntryId) -> Option<Timestamp> {
        self.by_id.get(&id).copied()
    }

    // == Is Expired ==
    pub fn is_expired(&self, id: EntryId, now: Timestamp) -> bool {
        self.deadline(id).is_some_and(|deadline| now >= deadline)
    }

    // == First Expired ==
    /// Returns the id whose deadline passed earliest, if any has passed.
    pub fn first_expired(&self, now: Timestamp) -> Option<EntryId> {
        self.deadlines
            .first()
            .filter(|(deadline, _)| now >= *deadline)
            .map(|&(_, id)| id)
    }

    // == Expired ==
    /// Returns every id whose deadline has passed, earliest first.
    pub fn expired(&self, now: Timestamp) -> Vec<EntryId> {
        self.deadlines
            .iter()
            .take_while(|(deadline, _)| now >= *deadline)
            .map(|&(_, id)| id)
            .collect()
    }

    /// Number of entries carrying a deadline.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
