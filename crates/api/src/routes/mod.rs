//! Route definitions.

pub mod analytics;
pub mod analyze;
pub mod health;
pub mod history;
pub mod patterns;

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::Router;

use crate::middleware::rate_limit::{RateLimitState, RateLimiter, RateScope};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// POST /analyze               analyze a message      (analyze rate limit)
/// POST /patterns/report       report a pattern       (report rate limit)
/// GET  /patterns/trending     ranked pattern list
/// GET  /history               own history (requires auth)
/// GET  /analytics             usage aggregates
/// ```
///
/// The general rate limit wraps the whole tree; the analyze and report
/// operations carry their own stricter scopes on top.
pub fn api_routes(limiter: Arc<RateLimiter>) -> Router<AppState> {
    let scoped = |scope| {
        from_fn_with_state(
            RateLimitState {
                limiter: Arc::clone(&limiter),
                scope,
            },
            crate::middleware::rate_limit::enforce,
        )
    };

    Router::new()
        .merge(analyze::router().route_layer(scoped(RateScope::Analyze)))
        .merge(patterns::reporting_router().route_layer(scoped(RateScope::Report)))
        .merge(patterns::trending_router())
        .merge(history::router())
        .merge(analytics::router())
        .layer(scoped(RateScope::General))
}
