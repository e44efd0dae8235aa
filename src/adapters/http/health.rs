//! Health check endpoint.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Liveness response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// GET /health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create the health router. Mounted at the root, outside `/api`.
pub fn health_router() -> Router {
    Router::new().route("/health", get(health))
}
