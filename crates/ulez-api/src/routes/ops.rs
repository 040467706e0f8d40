//! # Operational Endpoints
//!
//! `GET /health` for monitoring and `GET /stats` for cache introspection.
//! Both are read-only and carry no authentication, like the rest of the
//! surface.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Health probe response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy" when the process is serving.
    pub status: String,
    /// Server time, ISO 8601.
    pub timestamp: String,
}

/// Cache statistics response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    /// Number of cached registrations (including not-yet-evicted
    /// expired entries).
    pub cache_size: usize,
    /// The cached registration keys.
    pub cached_registrations: Vec<String>,
    /// Configured entry lifetime in seconds.
    pub cache_ttl_seconds: u64,
}

/// Build the operational router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/stats", get(stats))
}

/// GET /health — liveness for monitoring.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse)),
    tag = "ops"
)]
pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /stats — cache size, keys, and TTL.
#[utoipa::path(
    get,
    path = "/stats",
    responses((status = 200, description = "Cache statistics", body = StatsResponse)),
    tag = "ops"
)]
pub(crate) async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        cache_size: state.cache.len(),
        cached_registrations: state.cache.keys(),
        cache_ttl_seconds: state.cache.ttl().as_secs(),
    })
}
