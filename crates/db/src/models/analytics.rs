//! Aggregate shapes for the analytics query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scamshield_core::types::{DbId, Timestamp};

/// Optional filter applied to history aggregates. Every `None` field is a
/// pass-through in SQL (`$n IS NULL OR ...`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsFilter {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub region: Option<String>,
    pub user_id: Option<DbId>,
}

/// Single-row aggregate over `rewrite_history`.
#[derive(Debug, FromRow, Serialize)]
pub struct HistorySummary {
    pub total_requests: i64,
    pub unique_users: i64,
    /// NULL when no rows match the filter.
    pub avg_response_time_ms: Option<f64>,
    /// Fraction of requests served from cache, NULL when no rows match.
    pub cache_hit_rate: Option<f64>,
}

/// Per-region request count.
#[derive(Debug, FromRow, Serialize)]
pub struct RegionCount {
    pub region: String,
    pub count: i64,
}

/// Per-day request count.
#[derive(Debug, FromRow, Serialize)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: i64,
}

/// Per-category observation total over `scam_patterns`.
#[derive(Debug, FromRow, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub total_frequency: i64,
}
