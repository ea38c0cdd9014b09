//! Routes for scam pattern reporting and the trending list.
//!
//! Reporting and trending live in separate routers so the stricter
//! report rate limit wraps only the write path.
//!
//! ```text
//! POST /patterns/report      report
//! GET  /patterns/trending    trending
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::patterns;
use crate::state::AppState;

pub fn reporting_router() -> Router<AppState> {
    Router::new().route("/patterns/report", post(patterns::report))
}

pub fn trending_router() -> Router<AppState> {
    Router::new().route("/patterns/trending", get(patterns::trending))
}
