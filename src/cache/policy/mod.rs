//! Eviction Policy Module
//!
//! Strategies that track per-entry usage metadata and pick a victim when the
//! store overflows. The store holds exactly one [`Policy`], built once from a
//! [`PolicyKind`] and never re-resolved per call.
//!
//! Policies only see [`EntryId`]s. Their metadata is created by `on_insert`
//! and destroyed by `on_remove`, in lockstep with the store's entries.

mod fifo;
mod lfu;
mod lru;
mod order;
mod random;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::entry::EntryId;
use crate::error::CsError;

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;

// == Eviction Policy Trait ==
pub trait EvictionPolicy {
    /// Starts tracking `id`, or resets its metadata as a fresh insert if already tracked.
    fn on_insert(&mut self, id: EntryId);

    /// Records a successful lookup of `id`.
    fn on_access(&mut self, id: EntryId);

    /// Stops tracking `id`. Untracked ids are a no-op.
    fn on_remove(&mut self, id: EntryId);

    /// Picks the next victim without removing it.
    ///
    /// Returns None only when nothing is tracked; callers must check `len`
    /// before evicting.
    fn select_victim(&mut self) -> Option<EntryId>;

    /// Returns the number of tracked ids.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: EntryId) -> bool;
}

// == Policy Kind ==
/// Closed set of eviction strategies selectable by configuration.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Lfu,
    Lru,
    Fifo,
    Random,
}

impl FromStr for PolicyKind {
    type Err = CsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lfu" => Ok(PolicyKind::Lfu),
            "lru" => Ok(PolicyKind::Lru),
            "fifo" => Ok(PolicyKind::Fifo),
            "random" => Ok(PolicyKind::Random),
            other => Err(CsError::InvalidConfig(format!(
                "unknown eviction policy '{}', expected one of lfu, lru, fifo, random",
                other
            ))),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyKind::Lfu => "lfu",
            PolicyKind::Lru => "lru",
            PolicyKind::Fifo => "fifo",
            PolicyKind::Random => "random",
        };
        f.write_str(name)
    }
}

// == Policy ==
/// The active eviction strategy of one store.
#[derive(Debug)]
pub enum Policy {
    Lfu(LfuPolicy),
    Lru(LruPolicy),
    Fifo(FifoPolicy),
    Random(RandomPolicy),
}

impl Policy {
    /// Builds the strategy for `kind`. `random_seed` only affects [`PolicyKind::Random`].
    pub fn new(kind: PolicyKind, random_seed: u64) -> Self {
        match kind {
            PolicyKind::Lfu => Policy::Lfu(LfuPolicy::new()),
            PolicyKind::Lru => Policy::Lru(LruPolicy::new()),
            PolicyKind::Fifo => Policy::Fifo(FifoPolicy::new()),
            PolicyKind::Random => Policy::Random(RandomPolicy::with_seed(random_seed)),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::Lfu(_) => PolicyKind::Lfu,
            Policy::Lru(_) => PolicyKind::Lru,
            Policy::Fifo(_) => PolicyKind::Fifo,
            Policy::Random(_) => PolicyKind::Random,
        }
    }

    fn inner(&self) -> &dyn EvictionPolicy {
        match self {
            Policy::Lfu(p) => p,
            Policy::Lru(p) => p,
            Policy::Fifo(p) => p,
            Policy::Random(p) => p,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn EvictionPolicy {
        match self {
            Policy::Lfu(p) => p,
            Policy::Lru(p) => p,
            Policy::Fifo(p) => p,
            Policy::Random(p) => p,
        }
    }
}

impl EvictionPolicy for Policy {
    fn on_insert(&mut self, id: EntryId) {
        self.inner_mut().on_insert(id)
    }

    fn on_access(&mut self, id: EntryId) {
        self.inner_mut().on_access(id)
    }

    fn on_remove(&mut self, id: EntryId) {
        self.inner_mut().on_remove(id)
    }

    fn select_victim(&mut self) -> Option<EntryId> {
        self.inner_mut().select_victim()
    }

    fn len(&self) -> usize {
        self.inner().len()
    }

    fn contains(&self, id: EntryId) -> bool {
        self.inner().contains(id)
    }
}
