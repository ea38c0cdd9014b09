//! Handler for the usage analytics aggregate.
//!
//! Route:
//! - `GET /analytics` — aggregates over rewrite history and scam patterns

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use scamshield_db::models::analytics::{
    AnalyticsFilter, CategoryCount, DailyCount, RegionCount,
};
use scamshield_db::repositories::{HistoryRepo, PatternRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// How many regions / categories the aggregate exposes.
const TOP_N: i64 = 5;

/// GET /api/v1/analytics response payload.
#[derive(Debug, Serialize)]
pub struct AnalyticsReport {
    pub total_requests: i64,
    pub unique_users: i64,
    pub avg_response_time_ms: Option<f64>,
    pub cache_hit_rate: Option<f64>,
    pub top_regions: Vec<RegionCount>,
    pub daily_counts: Vec<DailyCount>,
    pub top_categories: Vec<CategoryCount>,
}

/// GET /api/v1/analytics
///
/// Aggregates under an optional date/region/user filter. Pattern
/// categories are global: patterns carry no region or date dimension
/// beyond `last_seen`.
pub async fn report(
    State(state): State<AppState>,
    Query(filter): Query<AnalyticsFilter>,
) -> AppResult<Json<DataResponse<AnalyticsReport>>> {
    let summary = HistoryRepo::summary(&state.pool, &filter).await?;
    let top_regions = HistoryRepo::top_regions(&state.pool, &filter, TOP_N).await?;
    let daily_counts = HistoryRepo::daily_counts(&state.pool, &filter).await?;
    let top_categories = PatternRepo::top_categories(&state.pool, TOP_N).await?;

    Ok(Json(DataResponse {
        data: AnalyticsReport {
            total_requests: summary.total_requests,
            unique_users: summary.unique_users,
            avg_response_time_ms: summary.avg_response_time_ms,
            cache_hit_rate: summary.cache_hit_rate,
            top_regions,
            daily_counts,
            top_categories,
        },
    }))
}
