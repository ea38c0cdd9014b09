//! Analysis orchestrator: coordinates cache, AI gateway, and persistence
//! for one end-to-end analysis request.

use std::sync::Arc;
use std::time::Instant;

use scamshield_ai::{AiError, RewriteService};
use scamshield_cache::CacheProvider;
use scamshield_core::analysis::AnalysisResult;
use scamshield_core::classify::{classify_message, Severity};
use scamshield_core::hashing::{cache_key, pattern_hash};
use scamshield_core::region::Region;
use scamshield_core::types::DbId;
use scamshield_db::models::history::NewHistoryRecord;
use scamshield_db::models::pattern::UpsertPattern;
use scamshield_db::repositories::{HistoryRepo, PatternRepo, UserRepo};
use scamshield_db::DbPool;

/// Result of one orchestrated analysis.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    /// Whether the result came from the cache without an AI call.
    pub cached: bool,
}

/// The orchestrator. Owns no I/O itself; every dependency is injected by
/// the composition root.
///
/// Guarantees at most one external call per cache-valid (message, region)
/// pair within the TTL window. Deliberately does NOT de-duplicate
/// concurrent identical in-flight requests: two concurrent misses for the
/// same key both call the gateway and the later cache write wins.
pub struct AnalysisEngine {
    rewriter: Arc<dyn RewriteService>,
    cache: Arc<CacheProvider>,
    pool: DbPool,
    cache_ttl_secs: u64,
}

impl AnalysisEngine {
    pub fn new(
        rewriter: Arc<dyn RewriteService>,
        cache: Arc<CacheProvider>,
        pool: DbPool,
        cache_ttl_secs: u64,
    ) -> Self {
        Self {
            rewriter,
            cache,
            pool,
            cache_ttl_secs,
        }
    }

    /// Run one analysis request end to end.
    ///
    /// AI gateway errors propagate unchanged. Bookkeeping failures after a
    /// successful AI response (cache write, history insert, usage counter,
    /// pattern upsert) are logged and swallowed: the user-facing value is
    /// the rewritten message, not the bookkeeping.
    pub async fn analyze(
        &self,
        message: &str,
        region: Region,
        user_id: Option<DbId>,
    ) -> Result<AnalysisOutcome, AiError> {
        let key = cache_key(message, region);
        let started = Instant::now();

        if let Some(result) = self.cache.get::<AnalysisResult>(&key).await {
            tracing::debug!(%region, "Analysis served from cache");
            if let Some(user_id) = user_id {
                // Fire-and-forget relative to the response.
                let pool = self.pool.clone();
                tokio::spawn(async move {
                    if let Err(e) = UserRepo::increment_usage(&pool, user_id).await {
                        tracing::warn!(error = %e, user_id, "Failed to record usage for cached hit");
                    }
                });
            }
            return Ok(AnalysisOutcome {
                result,
                cached: true,
            });
        }

        let result = self.rewriter.rewrite(message, region).await?;
        let response_time_ms = started.elapsed().as_millis() as i64;

        self.cache.set(&key, &result, self.cache_ttl_secs).await;
        self.record_bookkeeping(message, region, user_id, &result, response_time_ms)
            .await;

        Ok(AnalysisOutcome {
            result,
            cached: false,
        })
    }

    /// Persist the history record, bump the user counter, and learn the
    /// pattern. Each step logs and swallows its own failure.
    async fn record_bookkeeping(
        &self,
        message: &str,
        region: Region,
        user_id: Option<DbId>,
        result: &AnalysisResult,
        response_time_ms: i64,
    ) {
        // Persisted history records must carry a non-empty difference
        // list; skip (and log) instead of violating the invariant.
        if result.differences.is_empty() {
            tracing::warn!("Analysis produced no differences, skipping history record");
        } else {
            let record = NewHistoryRecord {
                user_id,
                original_message: result.original_message.clone(),
                safe_version: result.safe_version.clone(),
                region: region.as_str().to_string(),
                response_time_ms,
                cached: false,
                red_flags_fixed: result.red_flags_fixed as i32,
                differences: serde_json::to_value(&result.differences)
                    .unwrap_or_else(|_| serde_json::Value::Array(Vec::new())),
            };
            if let Err(e) = HistoryRepo::insert(&self.pool, &record).await {
                tracing::warn!(error = %e, "Failed to persist rewrite history");
            }
        }

        if let Some(user_id) = user_id {
            if let Err(e) = UserRepo::increment_usage(&self.pool, user_id).await {
                tracing::warn!(error = %e, user_id, "Failed to increment usage counter");
            }
        }

        let category = classify_message(message);
        let severity = Severity::from_red_flags(result.red_flags_fixed);
        let upsert = UpsertPattern {
            pattern_hash: pattern_hash(message, category),
            category: category.as_str().to_string(),
            severity: severity.as_str().to_string(),
            example: message.to_string(),
        };
        if let Err(e) = PatternRepo::upsert(&self.pool, &upsert).await {
            tracing::warn!(error = %e, %category, "Failed to upsert scam pattern");
        }
    }
}
