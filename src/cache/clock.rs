//! Clock Module
//!
//! Time source for insertion stamps and freshness deadlines.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

// == Timestamp ==
/// Milliseconds since the Unix epoch.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Timestamp {
    pub ms_since_1970: u64,
}

impl Timestamp {
    pub const fn from_millis(ms_since_1970: u64) -> Self {
        Self { ms_since_1970 }
    }

    pub fn adding(&self, ms: u64) -> Self {
        Self {
            ms_since_1970: self.ms_since_1970.saturating_add(ms),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.ms_since_1970)
    }
}

// == Clock Trait ==
/// A source of monotonically non-decreasing time.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> Timestamp;
}

// == System Clock ==
/// Wall clock that never reports a time earlier than one it already reported.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicU64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let wall = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let previous = self.last.fetch_max(wall, Ordering::AcqRel);
        Timestamp::from_millis(previous.max(wall))
    }
}

// == Manual Clock ==
/// Clock advanced explicitly by its owner. Clones share the same time.
///
/// Used by simulations driven by an external scheduler and by tests.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start.ms_since_1970)),
        }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.now.load(Ordering::Acquire))
    }
}
