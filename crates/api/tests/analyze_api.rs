//! Integration tests for the analyze operation: validation, caching,
//! bookkeeping, and error mapping.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, build_app_with, build_test_app, post_json, MockBehavior};
use serde_json::json;
use sqlx::PgPool;

use scamshield_ai::RewriteService;
use scamshield_cache::CacheProvider;
use scamshield_core::region::Region;
use scamshield_db::models::user::CreateUser;
use scamshield_db::repositories::{PatternRepo, UserRepo};

const UPI_SCAM: &str =
    "Your UPI payment failed! Click here to get refund: http://refund-upi.com immediately";

#[sqlx::test(migrations = "../db/migrations")]
async fn analyze_returns_result_and_records_bookkeeping(pool: PgPool) {
    let (app, mock) = build_test_app(pool.clone(), MockBehavior::Succeed);

    let response = post_json(
        app,
        "/api/v1/analyze",
        json!({ "message": UPI_SCAM, "region": "IN" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["cached"], false);
    assert_eq!(body["data"]["original_message"], UPI_SCAM);
    assert_eq!(body["data"]["red_flags_fixed"], 4);
    assert!(body["timestamp"].is_string());
    assert_eq!(mock.calls(), 1);

    // One history record was appended.
    let history_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rewrite_history")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(history_count, 1);

    // The message classifies as fake_links ("click" + "http") and four
    // red flags band to medium severity.
    let patterns = PatternRepo::trending(&pool, 10).await.unwrap();
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].category, "fake_links");
    assert_eq!(patterns[0].severity, "medium");
    assert_eq!(patterns[0].frequency, 1);
    assert_eq!(patterns[0].examples, vec![UPI_SCAM.to_string()]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn analyze_attributes_usage_to_user(pool: PgPool) {
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            email: "a@example.com".to_string(),
            preferred_region: None,
            preferred_language: None,
        },
    )
    .await
    .unwrap();

    let (app, _mock) = build_test_app(pool.clone(), MockBehavior::Succeed);
    let response = post_json(
        app,
        "/api/v1/analyze",
        json!({ "message": UPI_SCAM, "user_id": user.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let found = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(found.usage_count, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn second_identical_request_is_served_from_cache(pool: PgPool) {
    let mock = Arc::new(common::MockRewriteService::new(MockBehavior::Succeed));
    let app = build_app_with(
        pool,
        common::test_config(),
        Arc::clone(&mock) as Arc<dyn RewriteService>,
        CacheProvider::memory(),
    );

    let body = json!({ "message": UPI_SCAM, "region": "IN" });
    let first = body_json(post_json(app.clone(), "/api/v1/analyze", body.clone()).await).await;
    let second = body_json(post_json(app, "/api/v1/analyze", body).await).await;

    assert_eq!(first["cached"], false);
    assert_eq!(second["cached"], true);
    // Identical payload, no second gateway call.
    assert_eq!(first["data"], second["data"]);
    assert_eq!(mock.calls(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_misses_both_call_the_gateway(pool: PgPool) {
    // No single-flight de-duplication: two requests racing on the same
    // uncached key each reach the gateway.
    let mock = Arc::new(
        common::MockRewriteService::new(MockBehavior::Succeed)
            .with_delay(Duration::from_millis(50)),
    );
    let app = build_app_with(
        pool,
        common::test_config(),
        Arc::clone(&mock) as Arc<dyn RewriteService>,
        CacheProvider::memory(),
    );

    let body = json!({ "message": UPI_SCAM, "region": "IN" });
    let (a, b) = tokio::join!(
        post_json(app.clone(), "/api/v1/analyze", body.clone()),
        post_json(app.clone(), "/api/v1/analyze", body),
    );

    assert_eq!(a.status(), StatusCode::OK);
    assert_eq!(b.status(), StatusCode::OK);
    assert_eq!(mock.calls(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn whitespace_only_message_rejected_without_ai_call(pool: PgPool) {
    let (app, mock) = build_test_app(pool, MockBehavior::Succeed);

    let response = post_json(app, "/api/v1/analyze", json!({ "message": "   " })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(mock.calls(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn over_length_message_rejected_without_ai_call(pool: PgPool) {
    let (app, mock) = build_test_app(pool, MockBehavior::Succeed);

    let response = post_json(
        app,
        "/api/v1/analyze",
        json!({ "message": "a".repeat(1001) }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(mock.calls(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unsupported_region_rejected(pool: PgPool) {
    let (app, mock) = build_test_app(pool, MockBehavior::Succeed);

    let response = post_json(
        app,
        "/api/v1/analyze",
        json!({ "message": UPI_SCAM, "region": "ZZ" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(mock.calls(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upstream_rate_limit_maps_to_429_with_retry_after(pool: PgPool) {
    let (app, _mock) = build_test_app(pool, MockBehavior::RateLimited);

    let response = post_json(app, "/api/v1/analyze", json!({ "message": UPI_SCAM })).await;

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["code"], "RATE_LIMIT_EXCEEDED");
    assert!(body["retry_after_secs"].as_u64().unwrap() >= 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn network_error_maps_to_503(pool: PgPool) {
    let (app, _mock) = build_test_app(pool, MockBehavior::NetworkError);

    let response = post_json(app, "/api/v1/analyze", json!({ "message": UPI_SCAM })).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NETWORK_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn parse_error_maps_to_502_ai_service_error(pool: PgPool) {
    let (app, _mock) = build_test_app(pool, MockBehavior::ParseError);

    let response = post_json(app, "/api/v1/analyze", json!({ "message": UPI_SCAM })).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["code"], "AI_SERVICE_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_differences_skip_the_history_record(pool: PgPool) {
    let (app, _mock) = build_test_app(pool.clone(), MockBehavior::SucceedEmptyDifferences);

    let response = post_json(app, "/api/v1/analyze", json!({ "message": UPI_SCAM })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let history_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rewrite_history")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(history_count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn analyze_rate_limit_returns_429_after_budget_spent(pool: PgPool) {
    let mut config = common::test_config();
    config.analyze_rate_limit = scamshield_api::config::RateLimitConfig {
        max_requests: 2,
        window_secs: 60,
    };
    let mock = Arc::new(common::MockRewriteService::new(MockBehavior::Succeed));
    let app = build_app_with(
        pool,
        config,
        Arc::clone(&mock) as Arc<dyn RewriteService>,
        CacheProvider::NoOp,
    );

    let body = json!({ "message": UPI_SCAM });
    for _ in 0..2 {
        let ok = post_json(app.clone(), "/api/v1/analyze", body.clone()).await;
        assert_eq!(ok.status(), StatusCode::OK);
    }

    let limited = post_json(app, "/api/v1/analyze", body).await;
    assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
    let payload = body_json(limited).await;
    assert_eq!(payload["code"], "RATE_LIMIT_EXCEEDED");
    assert!(payload["retry_after_secs"].as_u64().unwrap() >= 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn region_defaults_when_omitted(pool: PgPool) {
    let (app, _mock) = build_test_app(pool.clone(), MockBehavior::Succeed);

    let response = post_json(app, "/api/v1/analyze", json!({ "message": UPI_SCAM })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let region: String = sqlx::query_scalar("SELECT region FROM rewrite_history")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(region, Region::In.as_str());
}
