//! Integration tests for rewrite history: listing, retention, aggregates.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use scamshield_core::types::DbId;
use scamshield_db::models::analytics::AnalyticsFilter;
use scamshield_db::models::history::{HistorySort, NewHistoryRecord, SortOrder};
use scamshield_db::models::user::CreateUser;
use scamshield_db::repositories::{HistoryRepo, UserRepo};

fn record(user_id: Option<DbId>, region: &str, cached: bool, ms: i64) -> NewHistoryRecord {
    NewHistoryRecord {
        user_id,
        original_message: "Click here for refund".to_string(),
        safe_version: "Your refund has been processed.".to_string(),
        region: region.to_string(),
        response_time_ms: ms,
        cached,
        red_flags_fixed: 4,
        differences: serde_json::json!([
            {"aspect": "links", "scam": "short URL", "official": "no link", "status": "removed"}
        ]),
    }
}

async fn seed_user(pool: &PgPool, email: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            preferred_region: None,
            preferred_language: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "./migrations")]
async fn insert_returns_stored_row(pool: PgPool) {
    let row = HistoryRepo::insert(&pool, &record(None, "IN", false, 1200))
        .await
        .unwrap();

    assert_eq!(row.region, "IN");
    assert_eq!(row.red_flags_fixed, 4);
    assert!(!row.cached);
    assert!(row.differences.is_array());
}

#[sqlx::test(migrations = "./migrations")]
async fn list_by_user_pages_and_sorts(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    for ms in [100, 300, 200] {
        HistoryRepo::insert(&pool, &record(Some(user_id), "IN", false, ms))
            .await
            .unwrap();
    }

    let page = HistoryRepo::list_by_user(
        &pool,
        user_id,
        HistorySort::ResponseTimeMs,
        SortOrder::Asc,
        2,
        0,
    )
    .await
    .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].response_time_ms, 100);
    assert_eq!(page[1].response_time_ms, 200);

    let rest = HistoryRepo::list_by_user(
        &pool,
        user_id,
        HistorySort::ResponseTimeMs,
        SortOrder::Asc,
        2,
        2,
    )
    .await
    .unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].response_time_ms, 300);

    assert_eq!(HistoryRepo::count_by_user(&pool, user_id).await.unwrap(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_by_user_excludes_other_users(pool: PgPool) {
    let a = seed_user(&pool, "a@example.com").await;
    let b = seed_user(&pool, "b@example.com").await;
    HistoryRepo::insert(&pool, &record(Some(a), "IN", false, 100))
        .await
        .unwrap();

    let page =
        HistoryRepo::list_by_user(&pool, b, HistorySort::CreatedAt, SortOrder::Desc, 10, 0)
            .await
            .unwrap();
    assert!(page.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_older_than_removes_only_aged_rows(pool: PgPool) {
    let old = HistoryRepo::insert(&pool, &record(None, "IN", false, 100))
        .await
        .unwrap();
    HistoryRepo::insert(&pool, &record(None, "US", false, 100))
        .await
        .unwrap();

    // Age one row past the cutoff.
    sqlx::query("UPDATE rewrite_history SET created_at = NOW() - INTERVAL '100 days' WHERE id = $1")
        .bind(old.id)
        .execute(&pool)
        .await
        .unwrap();

    let deleted = HistoryRepo::delete_older_than(&pool, Utc::now() - Duration::days(90))
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    let summary = HistoryRepo::summary(&pool, &AnalyticsFilter::default())
        .await
        .unwrap();
    assert_eq!(summary.total_requests, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn summary_aggregates_latency_and_cache_hit_rate(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    HistoryRepo::insert(&pool, &record(Some(user_id), "IN", true, 10))
        .await
        .unwrap();
    HistoryRepo::insert(&pool, &record(Some(user_id), "IN", true, 20))
        .await
        .unwrap();
    HistoryRepo::insert(&pool, &record(None, "US", false, 30))
        .await
        .unwrap();
    HistoryRepo::insert(&pool, &record(None, "US", false, 40))
        .await
        .unwrap();

    let summary = HistoryRepo::summary(&pool, &AnalyticsFilter::default())
        .await
        .unwrap();
    assert_eq!(summary.total_requests, 4);
    assert_eq!(summary.unique_users, 1);
    assert_eq!(summary.avg_response_time_ms, Some(25.0));
    assert_eq!(summary.cache_hit_rate, Some(0.5));
}

#[sqlx::test(migrations = "./migrations")]
async fn summary_respects_region_filter(pool: PgPool) {
    HistoryRepo::insert(&pool, &record(None, "IN", false, 10))
        .await
        .unwrap();
    HistoryRepo::insert(&pool, &record(None, "US", false, 30))
        .await
        .unwrap();

    let filter = AnalyticsFilter {
        region: Some("US".to_string()),
        ..Default::default()
    };
    let summary = HistoryRepo::summary(&pool, &filter).await.unwrap();
    assert_eq!(summary.total_requests, 1);
    assert_eq!(summary.avg_response_time_ms, Some(30.0));
}

#[sqlx::test(migrations = "./migrations")]
async fn empty_table_summary_has_null_averages(pool: PgPool) {
    let summary = HistoryRepo::summary(&pool, &AnalyticsFilter::default())
        .await
        .unwrap();
    assert_eq!(summary.total_requests, 0);
    assert_eq!(summary.avg_response_time_ms, None);
    assert_eq!(summary.cache_hit_rate, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn top_regions_ranks_by_count(pool: PgPool) {
    for _ in 0..3 {
        HistoryRepo::insert(&pool, &record(None, "IN", false, 10))
            .await
            .unwrap();
    }
    HistoryRepo::insert(&pool, &record(None, "US", false, 10))
        .await
        .unwrap();

    let regions = HistoryRepo::top_regions(&pool, &AnalyticsFilter::default(), 5)
        .await
        .unwrap();
    assert_eq!(regions[0].region, "IN");
    assert_eq!(regions[0].count, 3);
    assert_eq!(regions[1].region, "US");
}

#[sqlx::test(migrations = "./migrations")]
async fn daily_counts_group_by_day(pool: PgPool) {
    HistoryRepo::insert(&pool, &record(None, "IN", false, 10))
        .await
        .unwrap();
    HistoryRepo::insert(&pool, &record(None, "IN", false, 10))
        .await
        .unwrap();

    let days = HistoryRepo::daily_counts(&pool, &AnalyticsFilter::default())
        .await
        .unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].count, 2);
}
