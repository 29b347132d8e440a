//! Health endpoint — liveness check.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether an upstream API key is configured.
    pub upstream_configured: bool,
}

/// `GET /health` — reports version and whether chat can reach upstream.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: gideon_core::version(),
        upstream_configured: state.gemini.is_some(),
    })
}
