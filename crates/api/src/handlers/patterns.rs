//! Handlers for scam pattern reporting and the trending list.
//!
//! Routes:
//! - `POST /patterns/report`    — report an observed scam message
//! - `GET  /patterns/trending`  — ranked pattern list

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use scamshield_core::classify::{ScamCategory, Severity};
use scamshield_core::hashing::pattern_hash;
use scamshield_db::models::pattern::{TrendingPattern, UpsertPattern};
use scamshield_db::repositories::PatternRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Hard ceiling on the trending list size.
const MAX_TRENDING_LIMIT: i64 = 50;
/// Default trending list size when the query omits `limit`.
const DEFAULT_TRENDING_LIMIT: i64 = 10;

/// POST /api/v1/patterns/report request body.
#[derive(Debug, Deserialize, Validate)]
pub struct ReportRequest {
    #[validate(length(min = 1, max = 1000, message = "message must be 1..=1000 characters"))]
    pub message: String,
    /// Category label; must parse into a known category.
    pub category: String,
    /// Optional severity label; defaults to `medium`.
    pub severity: Option<String>,
}

/// POST /api/v1/patterns/report
///
/// Creates or bumps the pattern identified by the canonical hash of the
/// normalized message + category.
pub async fn report(
    State(state): State<AppState>,
    Json(input): Json<ReportRequest>,
) -> AppResult<Json<DataResponse<TrendingPattern>>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let category = ScamCategory::parse(&input.category)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown category '{}'", input.category)))?;

    let severity = match input.severity.as_deref() {
        Some(label) => Severity::parse(label)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown severity '{label}'")))?,
        None => Severity::Medium,
    };

    let upsert = UpsertPattern {
        pattern_hash: pattern_hash(&input.message, category),
        category: category.as_str().to_string(),
        severity: severity.as_str().to_string(),
        example: input.message.clone(),
    };
    let pattern = PatternRepo::upsert(&state.pool, &upsert).await?;

    Ok(Json(DataResponse {
        data: TrendingPattern::from_pattern(pattern),
    }))
}

/// GET /api/v1/patterns/trending query parameters.
#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/patterns/trending
///
/// Active patterns ranked by frequency, `limit` clamped to `1..=50`,
/// examples trimmed to 3 per entry.
pub async fn trending(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> AppResult<Json<DataResponse<Vec<TrendingPattern>>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_TRENDING_LIMIT)
        .clamp(1, MAX_TRENDING_LIMIT);

    let patterns = PatternRepo::trending(&state.pool, limit).await?;
    let data = patterns
        .into_iter()
        .map(TrendingPattern::from_pattern)
        .collect();

    Ok(Json(DataResponse { data }))
}
