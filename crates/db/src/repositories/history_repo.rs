//! Repository for the append-only `rewrite_history` table.

use sqlx::PgPool;

use scamshield_core::types::{DbId, Timestamp};

use crate::models::analytics::{AnalyticsFilter, DailyCount, HistorySummary, RegionCount};
use crate::models::history::{HistorySort, NewHistoryRecord, RewriteHistoryRecord, SortOrder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, original_message, safe_version, region, \
                       response_time_ms, cached, red_flags_fixed, differences, created_at";

/// Shared filter clause for the analytics aggregates. Bind order:
/// $1 from, $2 to, $3 region, $4 user_id.
const FILTER: &str = "($1::timestamptz IS NULL OR created_at >= $1)
                      AND ($2::timestamptz IS NULL OR created_at < $2)
                      AND ($3::text IS NULL OR region = $3)
                      AND ($4::bigint IS NULL OR user_id = $4)";

/// Provides append, listing, retention, and aggregate queries for
/// rewrite history.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Append one history record, returning the stored row.
    pub async fn insert(
        pool: &PgPool,
        input: &NewHistoryRecord,
    ) -> Result<RewriteHistoryRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO rewrite_history
                 (user_id, original_message, safe_version, region,
                  response_time_ms, cached, red_flags_fixed, differences)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RewriteHistoryRecord>(&query)
            .bind(input.user_id)
            .bind(&input.original_message)
            .bind(&input.safe_version)
            .bind(&input.region)
            .bind(input.response_time_ms)
            .bind(input.cached)
            .bind(input.red_flags_fixed)
            .bind(&input.differences)
            .fetch_one(pool)
            .await
    }

    /// Page through one user's history. `sort`/`order` are whitelisted
    /// enums, so interpolating their SQL fragments is safe.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        sort: HistorySort,
        order: SortOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RewriteHistoryRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rewrite_history
             WHERE user_id = $1
             ORDER BY {} {}
             LIMIT $2 OFFSET $3",
            sort.column(),
            order.keyword()
        );
        sqlx::query_as::<_, RewriteHistoryRecord>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total records for one user, for pagination envelopes.
    pub async fn count_by_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM rewrite_history WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Delete records older than `cutoff`. Returns the number of rows
    /// removed. Used by the retention job.
    pub async fn delete_older_than(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rewrite_history WHERE created_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Single-row aggregate: total count, unique users, average latency,
    /// cache hit rate -- all under the optional filter.
    pub async fn summary(
        pool: &PgPool,
        filter: &AnalyticsFilter,
    ) -> Result<HistorySummary, sqlx::Error> {
        let query = format!(
            "SELECT
                 COUNT(*) AS total_requests,
                 COUNT(DISTINCT user_id) AS unique_users,
                 AVG(response_time_ms)::float8 AS avg_response_time_ms,
                 AVG(CASE WHEN cached THEN 1.0 ELSE 0.0 END)::float8 AS cache_hit_rate
             FROM rewrite_history
             WHERE {FILTER}"
        );
        sqlx::query_as::<_, HistorySummary>(&query)
            .bind(filter.from)
            .bind(filter.to)
            .bind(&filter.region)
            .bind(filter.user_id)
            .fetch_one(pool)
            .await
    }

    /// Regions ranked by request count under the optional filter.
    pub async fn top_regions(
        pool: &PgPool,
        filter: &AnalyticsFilter,
        limit: i64,
    ) -> Result<Vec<RegionCount>, sqlx::Error> {
        let query = format!(
            "SELECT region, COUNT(*) AS count
             FROM rewrite_history
             WHERE {FILTER}
             GROUP BY region
             ORDER BY count DESC
             LIMIT $5"
        );
        sqlx::query_as::<_, RegionCount>(&query)
            .bind(filter.from)
            .bind(filter.to)
            .bind(&filter.region)
            .bind(filter.user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Per-day request counts under the optional filter, oldest first.
    pub async fn daily_counts(
        pool: &PgPool,
        filter: &AnalyticsFilter,
    ) -> Result<Vec<DailyCount>, sqlx::Error> {
        let query = format!(
            "SELECT (created_at AT TIME ZONE 'UTC')::date AS day, COUNT(*) AS count
             FROM rewrite_history
             WHERE {FILTER}
             GROUP BY day
             ORDER BY day"
        );
        sqlx::query_as::<_, DailyCount>(&query)
            .bind(filter.from)
            .bind(filter.to)
            .bind(&filter.region)
            .bind(filter.user_id)
            .fetch_all(pool)
            .await
    }
}
