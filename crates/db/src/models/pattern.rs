//! Scam pattern entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use scamshield_core::types::{DbId, Timestamp};

/// Ceiling on stored examples per pattern.
pub const MAX_PATTERN_EXAMPLES: i32 = 10;

/// Full row from the `scam_patterns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScamPattern {
    pub id: DbId,
    pub pattern_hash: String,
    pub category: String,
    pub frequency: i32,
    pub examples: Vec<String>,
    pub severity: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub last_seen: Timestamp,
}

/// DTO for creating or bumping a pattern observation.
#[derive(Debug)]
pub struct UpsertPattern {
    /// Canonical identity hash (normalized message + category).
    pub pattern_hash: String,
    pub category: String,
    pub severity: String,
    /// The raw observed message, stored as an example if new and under cap.
    pub example: String,
}

/// Trending list entry: a pattern with its example list trimmed for
/// external exposure.
#[derive(Debug, Serialize)]
pub struct TrendingPattern {
    pub category: String,
    pub frequency: i32,
    pub severity: String,
    pub last_seen: Timestamp,
    pub examples: Vec<String>,
}

impl TrendingPattern {
    /// At most this many examples are exposed per trending entry.
    pub const EXPOSED_EXAMPLES: usize = 3;

    pub fn from_pattern(pattern: ScamPattern) -> Self {
        let mut examples = pattern.examples;
        examples.truncate(Self::EXPOSED_EXAMPLES);
        Self {
            category: pattern.category,
            frequency: pattern.frequency,
            severity: pattern.severity,
            last_seen: pattern.last_seen,
            examples,
        }
    }
}
