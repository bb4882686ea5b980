//! Cache Entry Module
//!
//! Defines the record for one cached data object with its freshness deadline
//! and usage metadata.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::cache::clock::Timestamp;
use crate::cache::name::Name;

/// Immutable payload bytes. Callers receive a shared view and cannot mutate
/// the store's copy.
pub type Payload = Arc<[u8]>;

// == Entry Id ==
/// Store-local identifier. The name index and eviction policies refer to
/// entries only through this id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntryId(pub(crate) u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// == Cache Entry ==
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub id: EntryId,
    pub name: Name,
    pub payload: Payload,
    /// None = never expires by time
    pub freshness_deadline: Option<Timestamp>,
    pub inserted_at: Timestamp,
    pub last_accessed_at: Timestamp,
    pub access_count: u64,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(
        id: EntryId,
        name: Name,
        payload: Payload,
        freshness_deadline: Option<Timestamp>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            payload,
            freshness_deadline,
            inserted_at: now,
            last_accessed_at: now,
            access_count: 0,
        }
    }

    /// Replaces payload and deadline in place, as if the object had just been inserted.
    pub fn refresh(&mut self, payload: Payload, freshness_deadline: Option<Timestamp>, now: Timestamp) {
        self.payload = payload;
        self.freshness_deadline = freshness_deadline;
        self.inserted_at = now;
        self.last_accessed_at = now;
        self.access_count = 0;
    }

    pub fn record_access(&mut self, now: Timestamp) {
        self.last_accessed_at = now;
        self.access_count += 1;
    }
}
