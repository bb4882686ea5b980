//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{AddOutcome, CsStats, DeclineReason, Payload, PolicyKind};

/// Response body for an add (PUT /nodes/:node/data)
#[derive(Debug, Clone, Serialize)]
pub struct AddDataResponse {
    pub node: String,
    pub name: String,
    /// One of `inserted`, `replaced`, `declined`, `not_retained`
    pub outcome: String,
    /// Why the store declined, when it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AddDataResponse {
    pub fn new(node: impl Into<String>, name: impl Into<String>, outcome: &AddOutcome) -> Self {
        let (label, reason) = match outcome {
            AddOutcome::Inserted => ("inserted", None),
            AddOutcome::Replaced => ("replaced", None),
            AddOutcome::NotRetained => ("not_retained", None),
            AddOutcome::Declined(DeclineReason::PayloadTooLarge { size, limit }) => (
                "declined",
                Some(format!("payload of {size} bytes exceeds limit of {limit}")),
            ),
            AddOutcome::Declined(DeclineReason::AlreadyStale) => {
                ("declined", Some("freshness period is not positive".to_string()))
            }
        };

        Self {
            node: node.into(),
            name: name.into(),
            outcome: label.to_string(),
            reason,
        }
    }
}

/// Response body for a lookup (GET /nodes/:node/data/*name)
///
/// A miss is a normal outcome and carries `hit: false`.
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    pub name: String,
    pub hit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl LookupResponse {
    pub fn new(name: impl Into<String>, payload: Option<Payload>) -> Self {
        Self {
            name: name.into(),
            hit: payload.is_some(),
            payload: payload.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()),
        }
    }
}

/// Response body for a removal (DELETE /nodes/:node/data/*name)
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    pub name: String,
    pub removed: bool,
}

/// Response body for a capacity change (PUT /nodes/:node/max-size)
#[derive(Debug, Clone, Serialize)]
pub struct MaxSizeResponse {
    pub node: String,
    pub max_size: usize,
    /// Entries evicted to fit the new capacity
    pub evicted: usize,
}

/// Response body for the stats endpoint (GET /nodes/:node/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub node: String,
    pub policy: PolicyKind,
    pub max_size: usize,
    #[serde(flatten)]
    pub stats: CsStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(node: impl Into<String>, policy: PolicyKind, max_size: usize, stats: CsStats) -> Self {
        Self {
            node: node.into(),
            policy,
            max_size,
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
