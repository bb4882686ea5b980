//! Background Tasks Module
//!
//! Timers that run periodically during node operation.
//!
//! # Tasks
//! - Expiration sweep: purges expired entries from a node's store
//! - Size reporter: logs the occupancy of every node

mod reporter;
mod sweep;
mod timer;

pub use reporter::spawn_size_reporter;
pub use sweep::spawn_expiration_sweep;
pub use timer::{spawn_repeating, TimerHandle};
