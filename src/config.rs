//! Configuration Module
//!
//! Handles loading and managing node and content store configuration from
//! environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::PolicyKind;
use crate::error::{CsError, Result};

// == Defaults ==
/// Capacity used for nodes listed without an explicit size
pub const DEFAULT_MAX_SIZE: usize = 100;

/// Largest payload accepted by default (NDN maximum packet size)
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 8800;

pub const DEFAULT_RANDOM_SEED: u64 = 0x5eed_0f_c0ffee;

const DEFAULT_NODES: &str = "consumer:1,router:2,producer:100000";

// == Store Config ==
/// Typed configuration of a single content store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of entries; 0 disables caching
    pub max_size: usize,
    pub policy: PolicyKind,
    /// Payloads larger than this are declined; None = unlimited
    pub max_payload_size: Option<usize>,
    pub random_seed: u64,
}

impl StoreConfig {
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_payload_size(mut self, max_payload_size: Option<usize>) -> Self {
        self.max_payload_size = max_payload_size;
        self
    }

    pub fn with_random_seed(mut self, random_seed: u64) -> Self {
        self.random_seed = random_seed;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            policy: PolicyKind::default(),
            max_payload_size: Some(DEFAULT_MAX_PAYLOAD_SIZE),
            random_seed: DEFAULT_RANDOM_SEED,
        }
    }
}

// == Expiration Mode ==
/// How expired entries are removed. Lookups always check freshness; the
/// eager mode additionally sweeps on a timer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpirationMode {
    Lazy,
    Eager { interval: Duration },
}

// == Node Config ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    pub name: String,
    pub max_size: usize,
}

// == Config ==
/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub nodes: Vec<NodeConfig>,
    pub default_max_size: usize,
    pub policy: PolicyKind,
    pub max_payload_size: Option<usize>,
    pub expiration: ExpirationMode,
    /// Interval between size reports; None disables reporting
    pub report_interval: Option<Duration>,
    pub random_seed: u64,
    /// HTTP admin port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CS_NODES` - `node:max_size` list (default: `consumer:1,router:2,producer:100000`)
    /// - `CS_MAX_SIZE` - Capacity for nodes without explicit size (default: 100)
    /// - `CS_POLICY` - `lfu`, `lru`, `fifo` or `random` (default: lfu)
    /// - `CS_MAX_PAYLOAD` - Maximum payload bytes, 0 = unlimited (default: 8800)
    /// - `CS_SWEEP_INTERVAL` - Seconds between expiration sweeps, 0 = lazy only (default: 1)
    /// - `CS_REPORT_INTERVAL` - Seconds between size reports, 0 = off (default: 100)
    /// - `CS_RANDOM_SEED` - Seed for the random policy
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_max_size = parsed(&lookup, "CS_MAX_SIZE", DEFAULT_MAX_SIZE);

        let policy = match lookup("CS_POLICY") {
            Some(value) => value.parse()?,
            None => PolicyKind::default(),
        };

        let nodes = parse_nodes(
            lookup("CS_NODES").as_deref().unwrap_or(DEFAULT_NODES),
            default_max_size,
        )?;

        let max_payload_size = match parsed(&lookup, "CS_MAX_PAYLOAD", DEFAULT_MAX_PAYLOAD_SIZE) {
            0 => None,
            limit => Some(limit),
        };

        let expiration = match parsed(&lookup, "CS_SWEEP_INTERVAL", 1u64) {
            0 => ExpirationMode::Lazy,
            secs => ExpirationMode::Eager {
                interval: Duration::from_secs(secs),
            },
        };

        let report_interval = match parsed(&lookup, "CS_REPORT_INTERVAL", 100u64) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Self {
            nodes,
            default_max_size,
            policy,
            max_payload_size,
            expiration,
            report_interval,
            random_seed: parsed(&lookup, "CS_RANDOM_SEED", DEFAULT_RANDOM_SEED),
            server_port: parsed(&lookup, "SERVER_PORT", 3000),
        })
    }

    /// Returns the store configuration for one node.
    pub fn store_config(&self, node: &NodeConfig) -> StoreConfig {
        StoreConfig::default()
            .with_max_size(node.max_size)
            .with_policy(self.policy)
            .with_max_payload_size(self.max_payload_size)
            .with_random_seed(self.random_seed)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nodes: vec![
                NodeConfig {
                    name: "consumer".to_string(),
                    max_size: 1,
                },
                NodeConfig {
                    name: "router".to_string(),
                    max_size: 2,
                },
                NodeConfig {
                    name: "producer".to_string(),
                    max_size: 100_000,
                },
            ],
            default_max_size: DEFAULT_MAX_SIZE,
            policy: PolicyKind::default(),
            max_payload_size: Some(DEFAULT_MAX_PAYLOAD_SIZE),
            expiration: ExpirationMode::Eager {
                interval: Duration::from_secs(1),
            },
            report_interval: Some(Duration::from_secs(100)),
            random_seed: DEFAULT_RANDOM_SEED,
            server_port: 3000,
        }
    }
}

// Malformed values fall back to the default.
fn parsed<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_nodes(list: &str, default_max_size: usize) -> Result<Vec<NodeConfig>> {
    let mut nodes: Vec<NodeConfig> = Vec::new();

    for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, max_size) = match item.split_once(':') {
            Some((name, size)) => {
                let size = size.trim().parse().map_err(|_| {
                    CsError::InvalidConfig(format!("bad max size in CS_NODES item '{}'", item))
                })?;
                (name.trim(), size)
            }
            None => (item, default_max_size),
        };

        if name.is_empty() {
            return Err(CsError::InvalidConfig(format!(
                "empty node name in CS_NODES item '{}'",
                item
            )));
        }
        if nodes.iter().any(|n| n.name == name) {
            return Err(CsError::InvalidConfig(format!(
                "duplicate node '{}' in CS_NODES",
                name
            )));
        }

        nodes.push(NodeConfig {
            name: name.to_string(),
            max_size,
        });
    }

    if nodes.is_empty() {
        return Err(CsError::InvalidConfig("CS_NODES lists no nodes".to_string()));
    }
    Ok(nodes)
}
