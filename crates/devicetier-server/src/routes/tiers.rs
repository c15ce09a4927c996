//! Optimization level table routes.

use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use devicetier_core::{tier_table, OptimizationLevel, TierProfile};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tiers", get(list_tiers))
        .route("/tiers/{level}", get(get_tier))
}

/// GET /api/tiers — every level with its settings, most restrictive first.
async fn list_tiers() -> Json<serde_json::Value> {
    let tiers = tier_table();
    Json(serde_json::json!({
        "tiers": tiers,
        "total": tiers.len(),
    }))
}

/// GET /api/tiers/{level} — one level's settings.
async fn get_tier(Path(level): Path<String>) -> (StatusCode, Json<serde_json::Value>) {
    match level.parse::<OptimizationLevel>() {
        Ok(level) => (
            StatusCode::OK,
            Json(serde_json::json!(TierProfile::from(level))),
        ),
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}
