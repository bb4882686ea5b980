//! Cache Module
//!
//! Per-node content store: name index, eviction policies, freshness tracking
//! and the store that keeps them in step.

mod clock;
mod entry;
mod freshness;
mod name;
mod name_index;
mod policy;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use entry::{CacheEntry, EntryId, Payload};
pub use freshness::{Freshness, FreshnessTracker};
pub use name::{Name, NameComponent};
pub use name_index::NameIndex;
pub use policy::{
    EvictionPolicy, FifoPolicy, LfuPolicy, LruPolicy, Policy, PolicyKind, RandomPolicy,
};
pub use stats::CsStats;
pub use store::{AddOutcome, ContentStore, DeclineReason};
