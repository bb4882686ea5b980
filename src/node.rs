//! Node Module
//!
//! Named handles to per-node content stores and the explicit collection of
//! handles that telemetry iterates over.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::cache::{ContentStore, PolicyKind};
use crate::config::Config;
use crate::error::{CsError, Result};

/// A content store shared between the forwarding plane, timers and the admin API.
///
/// Every store operation runs under this lock as one atomic unit.
pub type SharedStore = Arc<RwLock<ContentStore>>;

// == Node ==
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    store: SharedStore,
}

impl Node {
    pub fn new(name: impl Into<String>, store: ContentStore) -> Self {
        Self {
            name: name.into(),
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Reads the node's size without touching cache state.
    pub async fn size(&self) -> NodeSize {
        let store = self.store.read().await;
        NodeSize {
            node: self.name.clone(),
            size: store.size(),
            max_size: store.max_size(),
            policy: store.policy_kind(),
        }
    }
}

// == Node Size ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSize {
    pub node: String,
    pub size: usize,
    pub max_size: usize,
    pub policy: PolicyKind,
}

// == Size Report ==
/// Snapshot of every node's store occupancy.
#[derive(Debug, Clone, Serialize)]
pub struct SizeReport {
    /// ISO 8601 time the report was taken
    pub timestamp: String,
    pub nodes: Vec<NodeSize>,
    pub total_entries: usize,
}

// == Node Set ==
/// Ordered collection of node handles, owned by the process that runs them.
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    nodes: Vec<Node>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one node per configured entry, each with its own store.
    pub fn from_config(config: &Config) -> Self {
        let mut set = Self::new();
        for node in &config.nodes {
            let store = ContentStore::new(&config.store_config(node));
            info!(
                "Node '{}' content store: max_size={}, policy={}",
                node.name, node.max_size, config.policy
            );
            set.nodes.push(Node::new(node.name.clone(), store));
        }
        set
    }

    pub fn get(&self, name: &str) -> Result<&Node> {
        self.nodes
            .iter()
            .find(|n| n.name == name)
            .ok_or_else(|| CsError::NodeNotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // == Size Report ==
    /// Collects the size of every node's store.
    pub async fn size_report(&self) -> SizeReport {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            nodes.push(node.size().await);
        }
        let total_entries = nodes.iter().map(|n| n.size).sum();

        SizeReport {
            timestamp: chrono::Utc::now().to_rfc3339(),
            nodes,
            total_entries,
        }
    }
}
