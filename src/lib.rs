//! NDN Content Store - per-node in-network cache for Named Data Networking
//!
//! Exact-name data caching with pluggable eviction (LFU, LRU, FIFO, Random),
//! freshness-based expiration and an HTTP admin surface.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod node;
pub mod packet;
pub mod tasks;

pub use api::AppState;
pub use cache::{AddOutcome, ContentStore, Name, PolicyKind};
pub use config::Config;
pub use error::{CsError, Result};
pub use node::{Node, NodeSet};
pub use packet::{DataObject, Request};
pub use tasks::{spawn_expiration_sweep, spawn_size_reporter, TimerHandle};
