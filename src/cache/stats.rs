//! Content Store Statistics Module
//!
//! Tracks cache activity: hits, misses, insertions, evictions and expirations.

use serde::Serialize;

// == Cs Stats ==
/// Tracks content store performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CsStats {
    /// Lookups answered from the store
    pub hits: u64,
    /// Lookups for absent or expired names
    pub misses: u64,
    /// Data objects stored under a new name
    pub insertions: u64,
    /// Data objects that replaced an entry with the same name
    pub replacements: u64,
    /// Policy victims removed to make room
    pub evictions: u64,
    /// Entries removed because their freshness deadline passed, lazily, by a
    /// sweep, or in place of a policy victim
    pub expirations: u64,
    /// Data objects the store refused to retain
    pub declined: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl CsStats {
    // == Constructor ==
    /// Creates a new CsStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    pub fn record_replacement(&mut self) {
        self.replacements += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn record_decline(&mut self) {
        self.declined += 1;
    }

    // == Update Entry Count ==
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
