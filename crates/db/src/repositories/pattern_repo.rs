//! Repository for the `scam_patterns` table.

use sqlx::PgPool;

use crate::models::analytics::CategoryCount;
use crate::models::pattern::{ScamPattern, UpsertPattern, MAX_PATTERN_EXAMPLES};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, pattern_hash, category, frequency, examples, \
                       severity, is_active, created_at, last_seen";

/// Provides upsert and ranking queries for scam patterns.
pub struct PatternRepo;

impl PatternRepo {
    /// Create a pattern or bump an existing one, atomically.
    ///
    /// On conflict the frequency increments, `last_seen` is touched,
    /// severity follows the latest observation, and the example is
    /// appended only when it is new and the list is under its cap.
    pub async fn upsert(pool: &PgPool, input: &UpsertPattern) -> Result<ScamPattern, sqlx::Error> {
        let query = format!(
            "INSERT INTO scam_patterns (pattern_hash, category, severity, examples)
             VALUES ($1, $2, $3, ARRAY[$4])
             ON CONFLICT (pattern_hash) DO UPDATE SET
                 frequency = scam_patterns.frequency + 1,
                 last_seen = NOW(),
                 severity = EXCLUDED.severity,
                 examples = CASE
                     WHEN array_position(scam_patterns.examples, $4) IS NOT NULL
                         THEN scam_patterns.examples
                     WHEN cardinality(scam_patterns.examples) >= $5
                         THEN scam_patterns.examples
                     ELSE array_append(scam_patterns.examples, $4)
                 END
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScamPattern>(&query)
            .bind(&input.pattern_hash)
            .bind(&input.category)
            .bind(&input.severity)
            .bind(&input.example)
            .bind(MAX_PATTERN_EXAMPLES)
            .fetch_one(pool)
            .await
    }

    /// Look up a pattern by its identity hash.
    pub async fn find_by_hash(
        pool: &PgPool,
        pattern_hash: &str,
    ) -> Result<Option<ScamPattern>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scam_patterns WHERE pattern_hash = $1");
        sqlx::query_as::<_, ScamPattern>(&query)
            .bind(pattern_hash)
            .fetch_optional(pool)
            .await
    }

    /// Active patterns ranked by observation frequency.
    pub async fn trending(pool: &PgPool, limit: i64) -> Result<Vec<ScamPattern>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scam_patterns
             WHERE is_active
             ORDER BY frequency DESC, last_seen DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, ScamPattern>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Categories ranked by summed observation frequency.
    pub async fn top_categories(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<CategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryCount>(
            "SELECT category, SUM(frequency)::bigint AS total_frequency
             FROM scam_patterns
             WHERE is_active
             GROUP BY category
             ORDER BY total_frequency DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
