//! Seller activity feed.

use crate::dto::ActivityJson;
use crate::error::ApiResult;
use crate::extract::Identity;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use farmgate_commerce::activity::ActivityEntry;

/// How many entries the feed shows.
const FEED_LIMIT: i64 = 5;

/// GET /api/activity — the caller's most recent order activity.
pub async fn recent(
    State(state): State<AppState>,
    Identity(user): Identity,
) -> ApiResult<Json<Vec<ActivityJson>>> {
    let entries = state
        .store
        .recent_seller_orders(&user.id, FEED_LIMIT)
        .await?
        .iter()
        .map(ActivityEntry::for_order)
        .map(Into::into)
        .collect();
    Ok(Json(entries))
}
