//! Rewrite history entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scamshield_core::types::{DbId, Timestamp};

/// Full row from the append-only `rewrite_history` table.
///
/// `differences` is the JSONB list captured from the analysis result;
/// persisted records always carry a non-empty list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RewriteHistoryRecord {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub original_message: String,
    pub safe_version: String,
    pub region: String,
    pub response_time_ms: i64,
    pub cached: bool,
    pub red_flags_fixed: i32,
    pub differences: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for appending a history record.
#[derive(Debug)]
pub struct NewHistoryRecord {
    pub user_id: Option<DbId>,
    pub original_message: String,
    pub safe_version: String,
    pub region: String,
    pub response_time_ms: i64,
    pub cached: bool,
    pub red_flags_fixed: i32,
    pub differences: serde_json::Value,
}

/// Sort column for history listings. Whitelisted so client input never
/// reaches the SQL string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistorySort {
    CreatedAt,
    ResponseTimeMs,
}

impl HistorySort {
    pub fn column(&self) -> &'static str {
        match self {
            HistorySort::CreatedAt => "created_at",
            HistorySort::ResponseTimeMs => "response_time_ms",
        }
    }
}

/// Sort direction for history listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}
