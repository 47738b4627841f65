//! HTTP exposure for the query executor
//!
//! This is the transport bridge: it decodes a request body into a
//! (root field, arguments, selection tree) triple, invokes the executor, and
//! encodes the result envelope unchanged. It carries no resolution logic of
//! its own.

use axum::{
    Json, Router,
    extract::Extension,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::engine::QueryExecutor;
use crate::schema::SelectionNode;

/// Decoded query request body
#[derive(Debug, Deserialize)]
struct QueryRequestBody {
    /// Root field name
    query: String,

    /// Arguments for the root field's resolver
    #[serde(default)]
    args: Map<String, Value>,

    /// Selection tree under the root field
    #[serde(default)]
    selection: Vec<SelectionNode>,
}

/// HTTP exposure implementation
///
/// Consumes an executor and produces an axum `Router`; the executor is
/// shared across requests without locking.
pub struct QueryExposure;

impl QueryExposure {
    /// Build the query router
    ///
    /// Routes:
    /// - `POST /query` - execute a query, returning the result envelope
    /// - `GET /schema` - JSON introspection dump of the declared types
    /// - `GET /health` - liveness check
    pub fn build_router(executor: Arc<QueryExecutor>) -> Router {
        Router::new()
            .route("/query", post(query_handler))
            .route("/schema", get(schema_handler))
            .route("/health", get(health_handler))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .layer(Extension(executor))
    }
}

/// Handler for query execution
///
/// The envelope passes through unchanged: partial data and path-qualified
/// errors reach the client exactly as the executor produced them.
async fn query_handler(
    Extension(executor): Extension<Arc<QueryExecutor>>,
    Json(request): Json<QueryRequestBody>,
) -> impl IntoResponse {
    let envelope = executor
        .execute(&request.query, request.args, request.selection)
        .await;
    Json(envelope)
}

/// Handler for schema introspection
async fn schema_handler(Extension(executor): Extension<Arc<QueryExecutor>>) -> impl IntoResponse {
    Json(executor.registry().describe())
}

/// Handler for liveness checks
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
