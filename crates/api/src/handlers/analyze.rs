//! Handler for the message-analysis operation.
//!
//! Route:
//! - `POST /analyze` — rewrite a suspicious message into its official form

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use scamshield_core::analysis::AnalysisResult;
use scamshield_core::region::Region;
use scamshield_core::types::{DbId, Timestamp};
use scamshield_core::validate::validate_message;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/analyze request body.
#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    /// The suspicious message. Bounds are re-checked against the
    /// configured maximum before the engine runs.
    #[validate(length(min = 1, max = 1000, message = "message must be 1..=1000 characters"))]
    pub message: String,
    /// Optional region code; must be one of the supported codes when
    /// present.
    pub region: Option<String>,
    /// Optional user id for usage attribution.
    pub user_id: Option<DbId>,
}

/// POST /api/v1/analyze response envelope.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub data: AnalysisResult,
    pub cached: bool,
    pub timestamp: Timestamp,
}

/// POST /api/v1/analyze
///
/// Validates the request, then delegates to the analysis engine. The
/// validation here guarantees zero AI-gateway calls for malformed input;
/// the gateway re-checks its own preconditions regardless.
pub async fn analyze(
    State(state): State<AppState>,
    Json(input): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalyzeResponse>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    validate_message(&input.message, state.config.max_message_chars).map_err(AppError::Core)?;

    if let Some(ref code) = input.region {
        if !Region::is_supported(code) {
            return Err(AppError::BadRequest(format!(
                "Unsupported region '{code}'. Supported: {}",
                Region::ALL.map(|r| r.as_str()).join(", ")
            )));
        }
    }
    let region = Region::parse_or_default(input.region.as_deref());

    let outcome = state
        .engine
        .analyze(&input.message, region, input.user_id)
        .await?;

    Ok(Json(AnalyzeResponse {
        data: outcome.result,
        cached: outcome.cached,
        timestamp: chrono::Utc::now(),
    }))
}
