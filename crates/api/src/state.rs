use std::sync::Arc;

use scamshield_ai::RewriteService;
use scamshield_cache::CacheProvider;

use crate::config::ServerConfig;
use crate::engine::AnalysisEngine;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). All services are
/// constructed once in the composition root (`main`, or the test harness)
/// and injected here; nothing reads ambient process state after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: scamshield_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Best-effort response cache.
    pub cache: Arc<CacheProvider>,
    /// The AI rewrite service (shared with the engine; the health check
    /// probes it directly).
    pub rewriter: Arc<dyn RewriteService>,
    /// The analysis orchestrator.
    pub engine: Arc<AnalysisEngine>,
}
