use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "docusense"
    }))
}

/// GET /api/backend/health
/// Probes the analysis backend so the UI can warn before an upload.
pub async fn backend_health_handler(State(state): State<AppState>) -> Json<Value> {
    let reachable = state.transport.health().await;
    Json(json!({
        "backend_url": state.config.backend_url,
        "reachable": reachable
    }))
}
