//! Shared response envelope types for API handlers.
//!
//! Success responses use a `{ "data": ... }` envelope; the analyze
//! operation adds `cached` and `timestamp` fields, and listings use
//! [`Paginated`]. Use these instead of ad-hoc `serde_json::json!` so
//! serialization stays consistent across handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Paginated listing envelope.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}
