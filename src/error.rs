//! Error types for the content store
//!
//! Provides unified error handling using thiserror. Cache misses, adds to a
//! zero-capacity store and removal of absent names are not errors and never
//! surface here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Content Store Error Enum ==
/// Unified error type for the content store and its admin surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsError {
    /// A name could not be parsed from its URI form
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No node with the given identifier is registered
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Configuration value could not be interpreted
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CsError {
    fn into_response(self) -> Response {
        let status = match &self {
            CsError::InvalidName(_) | CsError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CsError::NodeNotFound(_) => StatusCode::NOT_FOUND,
            CsError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the content store.
pub type Result<T> = std::result::Result<T, CsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let resp = CsError::InvalidName("bad".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = CsError::NodeNotFound("router".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = CsError::InvalidConfig("CS_POLICY".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_display() {
        let err = CsError::NodeNotFound("router".into());
        assert_eq!(err.to_string(), "Node not found: router");
    }
}
