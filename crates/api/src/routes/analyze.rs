//! Route for the message-analysis operation.
//!
//! ```text
//! POST /analyze    analyze
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::analyze;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze::analyze))
}
