//! Shared harness for API integration tests.
//!
//! Mirrors the router construction in `main.rs` (middleware stack
//! included) so tests exercise what production runs, with two swaps:
//! the AI gateway is replaced by a scripted [`MockRewriteService`] and
//! the cache defaults to `NoOp` (tests opt into the in-memory store).

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use scamshield_ai::{AiError, RewriteService};
use scamshield_api::auth::jwt::{generate_access_token, JwtConfig};
use scamshield_api::config::{RateLimitConfig, ServerConfig};
use scamshield_api::engine::AnalysisEngine;
use scamshield_api::error::AppError;
use scamshield_api::middleware::rate_limit::RateLimiter;
use scamshield_api::routes;
use scamshield_api::state::AppState;
use scamshield_cache::CacheProvider;
use scamshield_core::analysis::{AnalysisResult, Difference, ToneComparison};
use scamshield_core::region::Region;

/// What the mock AI service does on each call.
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// Return a canned successful analysis.
    Succeed,
    /// Return a successful analysis with an empty difference list.
    SucceedEmptyDifferences,
    /// Fail with an upstream rate limit carrying a retry-after hint.
    RateLimited,
    /// Fail with a network error.
    NetworkError,
    /// Fail with a payload parse error.
    ParseError,
}

/// Scripted stand-in for the AI gateway. Counts calls so tests can
/// assert on cache behaviour and zero-call validation paths.
pub struct MockRewriteService {
    behavior: MockBehavior,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockRewriteService {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Add latency per call, for tests that need overlapping requests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Canned analysis for a given message: four red flags, two differences.
pub fn sample_result(message: &str) -> AnalysisResult {
    AnalysisResult {
        original_message: message.to_string(),
        safe_version: "Your refund has been processed to your registered account.".to_string(),
        differences: vec![
            Difference {
                aspect: "links".to_string(),
                scam: "shortened URL".to_string(),
                official: "no link".to_string(),
                status: "removed".to_string(),
            },
            Difference {
                aspect: "urgency".to_string(),
                scam: "act now".to_string(),
                official: "no deadline".to_string(),
                status: "fixed".to_string(),
            },
        ],
        red_flags_fixed: 4,
        tone_comparison: ToneComparison {
            scam: "pushy".to_string(),
            official: "calm".to_string(),
        },
        key_learning: "Official senders never text payment links.".to_string(),
    }
}

#[async_trait]
impl RewriteService for MockRewriteService {
    async fn rewrite(&self, message: &str, _region: Region) -> Result<AnalysisResult, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.behavior {
            MockBehavior::Succeed => Ok(sample_result(message)),
            MockBehavior::SucceedEmptyDifferences => {
                let mut result = sample_result(message);
                result.differences.clear();
                result.red_flags_fixed = 0;
                Ok(result)
            }
            MockBehavior::RateLimited => Err(AiError::RateLimited {
                retry_after_secs: 30,
            }),
            MockBehavior::NetworkError => Err(AiError::Network("connection refused".into())),
            MockBehavior::ParseError => Err(AiError::Parse("no JSON object found".into())),
        }
    }
}

/// Build a test `ServerConfig` with safe defaults and generous limits.
pub fn test_config() -> ServerConfig {
    let wide_open = RateLimitConfig {
        max_requests: 10_000,
        window_secs: 60,
    };
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cache_url: None,
        cache_ttl_secs: 300,
        max_message_chars: 1000,
        history_retention_days: 90,
        analyze_rate_limit: wide_open,
        report_rate_limit: wide_open,
        general_rate_limit: wide_open,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Mint a Bearer token for `user_id` against the test JWT config.
pub fn bearer_token(user_id: i64) -> String {
    let token = generate_access_token(user_id, &test_config().jwt).unwrap();
    format!("Bearer {token}")
}

/// Build the full application router with all middleware layers, the
/// given mock AI behaviour, and a NoOp cache.
///
/// Returns the router plus the mock so tests can assert on call counts.
pub fn build_test_app(pool: PgPool, behavior: MockBehavior) -> (Router, Arc<MockRewriteService>) {
    let mock = Arc::new(MockRewriteService::new(behavior));
    let app = build_app_with(
        pool,
        test_config(),
        Arc::clone(&mock) as Arc<dyn RewriteService>,
        CacheProvider::NoOp,
    );
    (app, mock)
}

/// Like [`build_test_app`] but with explicit config and cache, for
/// rate-limit and cache-hit tests.
pub fn build_app_with(
    pool: PgPool,
    config: ServerConfig,
    rewriter: Arc<dyn RewriteService>,
    cache: CacheProvider,
) -> Router {
    let cache = Arc::new(cache);
    let engine = Arc::new(AnalysisEngine::new(
        Arc::clone(&rewriter),
        Arc::clone(&cache),
        pool.clone(),
        config.cache_ttl_secs,
    ));
    let rate_limiter = Arc::new(RateLimiter::new(
        config.analyze_rate_limit,
        config.report_rate_limit,
        config.general_rate_limit,
    ));

    let state = AppState {
        pool,
        config: Arc::new(config),
        cache,
        rewriter,
        engine,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes(rate_limiter))
        .fallback(|| async { AppError::RouteNotFound })
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a GET request with an Authorization header.
pub async fn get_authed(app: Router, uri: &str, authorization: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(AUTHORIZATION, authorization)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
