//! Category endpoints.

use crate::dto::{CategoryJson, CreateCategoryRequest};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use farmgate_commerce::catalog::NewCategory;

/// GET /api/categories — all categories, name ascending.
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<CategoryJson>>> {
    let categories = state
        .store
        .list_categories()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(categories))
}

/// POST /api/categories — create a category.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryJson>)> {
    if request.name.is_empty() || request.description.is_empty() || request.image_url.is_empty() {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    }

    let category = NewCategory {
        name: request.name,
        description: request.description,
        image_url: request.image_url,
    }
    .into_category(Utc::now());

    state.store.create_category(&category).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}
