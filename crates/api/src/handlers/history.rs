//! Handler for the per-user rewrite history listing.
//!
//! Route:
//! - `GET /history` — paginated, sortable, requires authentication

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use scamshield_db::models::history::{HistorySort, RewriteHistoryRecord, SortOrder};
use scamshield_db::repositories::HistoryRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::Paginated;
use crate::state::AppState;

/// Largest accepted page size.
const MAX_PER_PAGE: i64 = 100;

/// GET /api/v1/history query parameters.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// 1-based page number (default: 1).
    pub page: Option<i64>,
    /// Page size (default: 20, max: 100).
    pub per_page: Option<i64>,
    /// Sort column (default: `created_at`).
    pub sort: Option<HistorySort>,
    /// Sort direction (default: `desc`).
    pub order: Option<SortOrder>,
}

/// GET /api/v1/history
///
/// Lists the authenticated user's own rewrite history. The identity
/// comes from the token, never from a query parameter, so one user
/// cannot page through another's records.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Paginated<RewriteHistoryRecord>>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, MAX_PER_PAGE);
    let sort = query.sort.unwrap_or(HistorySort::CreatedAt);
    let order = query.order.unwrap_or(SortOrder::Desc);

    let offset = (page - 1) * per_page;
    let data = HistoryRepo::list_by_user(&state.pool, user.user_id, sort, order, per_page, offset)
        .await?;
    let total = HistoryRepo::count_by_user(&state.pool, user.user_id).await?;

    Ok(Json(Paginated {
        data,
        total,
        page,
        per_page,
    }))
}
