//! Classification routes.

use std::sync::Arc;

use axum::http::header::{HeaderName, VARY};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use devicetier_core::{classify, Classification, EnvironmentSnapshot};
use tracing::debug;

use crate::hints::{ClientHintsProbe, ACCEPT_CH};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/classify",
        get(classify_client_hints).post(classify_snapshot),
    )
}

/// POST /api/classify — classify a snapshot captured by the client.
async fn classify_snapshot(Json(snapshot): Json<EnvironmentSnapshot>) -> Json<Classification> {
    let classification = classify(&snapshot);
    debug!(
        level = %classification.level,
        width = snapshot.screen_width,
        "Classified posted snapshot"
    );
    Json(classification)
}

/// GET /api/classify — classify from the request's client hints.
async fn classify_client_hints(headers: HeaderMap) -> impl IntoResponse {
    let probe = ClientHintsProbe::from_headers(&headers);
    let classification = classify(&probe);
    debug!(level = %classification.level, "Classified client hints");

    (
        [(HeaderName::from_static("accept-ch"), ACCEPT_CH), (VARY, ACCEPT_CH)],
        Json(classification),
    )
}
