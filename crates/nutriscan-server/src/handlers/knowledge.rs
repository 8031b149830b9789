//! Knowledge base and health handlers

use axum::Json;
use serde::Serialize;

use nutriscan_core::KnowledgeSnapshot;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/knowledge - Dump the reference tables
pub async fn get_knowledge() -> Json<KnowledgeSnapshot> {
    Json(KnowledgeSnapshot::collect())
}
