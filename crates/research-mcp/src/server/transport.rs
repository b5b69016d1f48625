//! Streamable HTTP transport.
//!
//! A single `POST /mcp` endpoint answers JSON-RPC requests synchronously,
//! plus health and readiness checks. There is no session state: every
//! request is answered from the topic store and remote services directly.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::protocol::{JsonRpcRequest, ServerState, SERVER_NAME};

/// Create the HTTP router for MCP.
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/mcp", post(handle_mcp_post))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn readiness_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let topics = state.ctx.store.readable_topics().await.map(|t| t.len()).unwrap_or(0);
    Json(serde_json::json!({
        "status": "ready",
        "service": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "tools": state.tools.len(),
        "topics": topics
    }))
}

/// Handle POST requests to /mcp.
async fn handle_mcp_post(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<JsonRpcRequest>,
) -> Response {
    tracing::debug!(method = %req.method, "Handling MCP POST request");

    match state.handle_request(&req).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
