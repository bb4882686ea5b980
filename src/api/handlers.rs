//! API Handlers
//!
//! HTTP request handlers for the per-node content store admin endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::cache::{AddOutcome, DeclineReason, Name};
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    AddDataRequest, AddDataResponse, HealthResponse, LookupResponse, MaxSizeResponse,
    RemoveResponse, SetMaxSizeRequest, StatsResponse,
};
use crate::node::{NodeSet, SizeReport};
use crate::packet::Request;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub nodes: NodeSet,
}

impl AppState {
    pub fn new(nodes: NodeSet) -> Self {
        Self { nodes }
    }

    /// Creates one content store per configured node.
    pub fn from_config(config: &Config) -> Self {
        Self::new(NodeSet::from_config(config))
    }
}

/// Wildcard path segments arrive without their leading slash.
fn parse_path_name(raw: &str) -> Result<Name> {
    if raw.starts_with('/') {
        raw.parse()
    } else {
        format!("/{raw}").parse()
    }
}

/// Handler for PUT /nodes/:node/data
///
/// Offers a data object to the node's store. Declined objects are reported
/// with a client error status; nothing is retained for them.
pub async fn add_data_handler(
    State(state): State<AppState>,
    Path(node): Path<String>,
    Json(req): Json<AddDataRequest>,
) -> Result<(StatusCode, Json<AddDataResponse>)> {
    let node = state.nodes.get(&node)?;
    let data = req.into_data_object()?;
    let name = data.name.to_string();

    let outcome = node.store().write().await.add(data);
    debug!("add {} on '{}': {:?}", name, node.name(), outcome);

    let status = match &outcome {
        AddOutcome::Declined(DeclineReason::PayloadTooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
        AddOutcome::Declined(DeclineReason::AlreadyStale) => StatusCode::UNPROCESSABLE_ENTITY,
        AddOutcome::Inserted | AddOutcome::Replaced | AddOutcome::NotRetained => StatusCode::OK,
    };

    Ok((status, Json(AddDataResponse::new(node.name(), name, &outcome))))
}

/// Handler for GET /nodes/:node/data/*name
///
/// Exact-name lookup. A miss answers 404 with `hit: false`.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path((node, name)): Path<(String, String)>,
) -> Result<(StatusCode, Json<LookupResponse>)> {
    let node = state.nodes.get(&node)?;
    let name = parse_path_name(&name)?;

    // Write lock: a hit updates policy metadata, an expired entry is removed
    let payload = node.store().write().await.lookup(&Request::new(name.clone()));

    let status = if payload.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Json(LookupResponse::new(name.to_string(), payload))))
}

/// Handler for DELETE /nodes/:node/data/*name
///
/// Removing an absent name is not an error.
pub async fn remove_handler(
    State(state): State<AppState>,
    Path((node, name)): Path<(String, String)>,
) -> Result<Json<RemoveResponse>> {
    let node = state.nodes.get(&node)?;
    let name = parse_path_name(&name)?;

    let removed = node.store().write().await.remove(&name);

    Ok(Json(RemoveResponse {
        name: name.to_string(),
        removed,
    }))
}

/// Handler for PUT /nodes/:node/max-size
pub async fn set_max_size_handler(
    State(state): State<AppState>,
    Path(node): Path<String>,
    Json(req): Json<SetMaxSizeRequest>,
) -> Result<Json<MaxSizeResponse>> {
    let node = state.nodes.get(&node)?;

    let evicted = node.store().write().await.set_max_size(req.max_size);

    Ok(Json(MaxSizeResponse {
        node: node.name().to_string(),
        max_size: req.max_size,
        evicted,
    }))
}

/// Handler for GET /nodes/:node/stats
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(node): Path<String>,
) -> Result<Json<StatsResponse>> {
    let node = state.nodes.get(&node)?;

    let store = node.store().read().await;
    Ok(Json(StatsResponse::new(
        node.name(),
        store.policy_kind(),
        store.max_size(),
        store.stats(),
    )))
}

/// Handler for GET /nodes
///
/// Current size of every node's store.
pub async fn nodes_handler(State(state): State<AppState>) -> Json<SizeReport> {
    Json(state.nodes.size_report().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CsError;

    fn test_state() -> AppState {
        AppState::from_config(&Config::default())
    }

    fn add_request(name: &str, payload: &str, freshness_ms: Option<i64>) -> AddDataRequest {
        AddDataRequest {
            name: name.to_string(),
            payload: payload.to_string(),
            freshness_ms,
        }
    }

    #[tokio::test]
    async fn test_add_and_lookup_handler() {
        let state = test_state();

        let (status, response) = add_data_handler(
            State(state.clone()),
            Path("router".to_string()),
            Json(add_request("/prefix/0", "hello", None)),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.outcome, "inserted");

        let (status, response) = lookup_handler(
            State(state),
            Path(("router".to_string(), "prefix/0".to_string())),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.payload.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_lookup_miss() {
        let (status, response) = lookup_handler(
            State(test_state()),
            Path(("router".to_string(), "nonexistent".to_string())),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!response.hit);
    }

    #[tokio::test]
    async fn test_unknown_node() {
        let result = stats_handler(State(test_state()), Path("nowhere".to_string())).await;
        assert!(matches!(result, Err(CsError::NodeNotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_handler() {
        let state = test_state();
        add_data_handler(
            State(state.clone()),
            Path("producer".to_string()),
            Json(add_request("/to/delete", "value", None)),
        )
        .await
        .unwrap();

        let path = || Path(("producer".to_string(), "to/delete".to_string()));
        let response = remove_handler(State(state.clone()), path()).await.unwrap();
        assert!(response.removed);

        // Second removal is a no-op
        let response = remove_handler(State(state), path()).await.unwrap();
        assert!(!response.removed);
    }

    #[tokio::test]
    async fn test_add_stale_is_declined() {
        let (status, response) = add_data_handler(
            State(test_state()),
            Path("router".to_string()),
            Json(add_request("/stale", "x", Some(0))),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.outcome, "declined");
    }

    #[tokio::test]
    async fn test_set_max_size_handler() {
        let state = test_state();
        for n in 0..5 {
            add_data_handler(
                State(state.clone()),
                Path("producer".to_string()),
                Json(add_request(&format!("/p/{n}"), "v", None)),
            )
            .await
            .unwrap();
        }

        let response = set_max_size_handler(
            State(state.clone()),
            Path("producer".to_string()),
            Json(SetMaxSizeRequest { max_size: 2 }),
        )
        .await
        .unwrap();
        assert_eq!(response.evicted, 3);

        let stats = stats_handler(State(state), Path("producer".to_string())).await.unwrap();
        assert_eq!(stats.stats.total_entries, 2);
        assert_eq!(stats.max_size, 2);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
