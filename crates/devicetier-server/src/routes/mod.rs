//! HTTP route handlers.

pub mod classify;
pub mod status;
pub mod tiers;

use std::sync::Arc;

use axum::Router;
use devicetier_core::CorsMode;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let router = Router::new().nest("/api", api_routes());
    let router = match state.config.cors {
        CorsMode::Permissive => router.layer(CorsLayer::permissive()),
        CorsMode::Off => router,
    };
    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(status::routes())
        .merge(classify::routes())
        .merge(tiers::routes())
}
