//! Health and server info routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/server-info", get(server_info))
}

/// GET /api/health — liveness.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/server-info — listener and platform info.
async fn server_info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "host": state.config.host.to_string(),
        "port": state.config.port,
        "cors": state.config.cors,
        "platform": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
    }))
}
