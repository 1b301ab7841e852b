//! Blog post endpoints.

use crate::dto::{CreatePostRequest, PostJson};
use crate::error::{ApiError, ApiResult};
use crate::extract::Identity;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use farmgate_commerce::blog::NewBlogPost;
use farmgate_commerce::ids::PostId;

/// GET /api/posts — all posts, newest first.
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<PostJson>>> {
    let posts = state
        .store
        .list_posts()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(posts))
}

/// GET /api/posts/{id} — one post.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PostJson>> {
    let post = state
        .store
        .get_post(&PostId::new(id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;
    Ok(Json(post.into()))
}

/// POST /api/posts — publish a post; author name and picture are
/// snapshotted from the caller's identity.
pub async fn create(
    State(state): State<AppState>,
    Identity(user): Identity,
    Json(request): Json<CreatePostRequest>,
) -> ApiResult<(StatusCode, Json<PostJson>)> {
    if request.title.is_empty() || request.content.is_empty() {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    }

    let author_name = user.display_name();
    let post = NewBlogPost {
        title: request.title,
        content: request.content,
        image_url: request.image_url,
        author_id: user.id,
        author_name,
        author_image: user.picture.unwrap_or_default(),
    }
    .into_post(Utc::now());

    state.store.create_post(&post).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}
