//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scamshield_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub usage_count: i32,
    pub is_active: bool,
    pub preferred_region: String,
    pub preferred_language: String,
    pub created_at: Timestamp,
    pub last_active: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    /// Defaults to the baseline region when omitted.
    pub preferred_region: Option<String>,
    /// Defaults to `en` when omitted.
    pub preferred_language: Option<String>,
}
