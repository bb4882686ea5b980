//! API Routes
//!
//! Configures the Axum router with the admin endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_data_handler, health_handler, lookup_handler, nodes_handler, remove_handler,
    set_max_size_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check endpoint
/// - `GET /nodes` - Size of every node's store
/// - `PUT /nodes/:node/data` - Offer a data object
/// - `GET /nodes/:node/data/*name` - Exact-name lookup
/// - `DELETE /nodes/:node/data/*name` - Remove a name
/// - `PUT /nodes/:node/max-size` - Change capacity
/// - `GET /nodes/:node/stats` - Store statistics
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/nodes", get(nodes_handler))
        .route("/nodes/:node/data", put(add_data_handler))
        .route(
            "/nodes/:node/data/*name",
            get(lookup_handler).delete(remove_handler),
        )
        .route("/nodes/:node/max-size", put(set_max_size_handler))
        .route("/nodes/:node/stats", get(stats_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
