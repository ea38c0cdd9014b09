//! Periodic cleanup of old rewrite history.
//!
//! Spawns a background task that deletes `rewrite_history` rows older
//! than the configured retention period. Runs on a fixed interval using
//! `tokio::time::interval`.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use scamshield_db::repositories::HistoryRepo;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the history retention cleanup loop.
///
/// Deletes rewrite history rows older than `retention_days`. Runs until
/// `cancel` is triggered.
pub async fn run(pool: PgPool, retention_days: i64, cancel: CancellationToken) {
    tracing::info!(
        retention_days,
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "History retention job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("History retention job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::days(retention_days);
                match HistoryRepo::delete_older_than(&pool, cutoff).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "History retention: purged old records");
                        } else {
                            tracing::debug!("History retention: no records to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "History retention: cleanup failed");
                    }
                }
            }
        }
    }
}
