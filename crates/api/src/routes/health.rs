use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status: `ok` when the database and the AI
    /// endpoint are reachable, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether the cache is reachable. `false` also covers "caching
    /// disabled"; a dead cache degrades silently and never affects
    /// `status`.
    pub cache_healthy: bool,
    /// Whether the AI endpoint answered the reachability probe.
    pub ai_healthy: bool,
}

/// GET /health -- reports reachability of the document store, the cache
/// store, and the AI endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = scamshield_db::health_check(&state.pool).await.is_ok();
    let cache_healthy = state.cache.ping().await.is_ok();
    let ai_healthy = state.rewriter.healthy().await;

    let status = if db_healthy && ai_healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        cache_healthy,
        ai_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
