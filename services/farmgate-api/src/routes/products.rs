//! Product endpoints.

use crate::dto::{CreateProductRequest, OwnerJson, ProductJson, UpdateProductRequest};
use crate::error::{ApiError, ApiResult};
use crate::extract::Identity;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use farmgate_commerce::catalog::NewProduct;
use farmgate_commerce::ids::ProductId;
use farmgate_commerce::money::{Currency, Money};
use farmgate_db::StoreError;
use serde_json::json;

/// GET /api/products — public listing with category data.
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let products: Vec<ProductJson> = state
        .store
        .list_products()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(json!({ "products": products })))
}

/// POST /api/products — create a listing owned by the caller.
pub async fn create(
    State(state): State<AppState>,
    Identity(user): Identity,
    Json(request): Json<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductJson>)> {
    if request.title.is_empty() || request.category_id.is_empty() {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    }

    let product = NewProduct {
        title: request.title,
        description: request.description,
        price: Money::from_decimal(request.price, Currency::NGN),
        stock: request.stock,
        image_url: request.image_url,
        owner_id: user.id,
        category_id: request.category_id.into(),
    }
    .into_product(Utc::now());

    state.store.create_product(&product).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// GET /api/products/{id} — public detail with category and owner profile.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductJson>> {
    let entry = state
        .store
        .get_product(&ProductId::new(id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    let owner_id = entry.product.owner_id.clone();
    let owner = match state.profiles.profile(&owner_id).await {
        Ok(profile) => profile,
        Err(error) => {
            tracing::warn!(%error, owner = %owner_id, "owner profile lookup failed");
            None
        }
    };
    let owner = OwnerJson {
        name: owner
            .as_ref()
            .and_then(|p| p.display_name())
            .unwrap_or_else(|| "Unknown Seller".to_string()),
        image_url: owner.and_then(|p| p.picture),
    };

    Ok(Json(ProductJson::from(entry).with_owner(owner)))
}

/// PUT /api/products/{id} — partial update, owner-scoped.
pub async fn update(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> ApiResult<Json<ProductJson>> {
    let patch = request.into_patch();
    patch.validate()?;

    let updated = state
        .store
        .update_product(&ProductId::new(id), &user.id, &patch)
        .await
        .map_err(|error| match error {
            StoreError::NotFound => ApiError::NotFound("Product not found".to_string()),
            other => other.into(),
        })?;
    Ok(Json(updated.into()))
}

/// DELETE /api/products/{id} — owner-scoped.
pub async fn remove(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .store
        .delete_product(&ProductId::new(id), &user.id)
        .await
        .map_err(|error| match error {
            StoreError::NotFound => ApiError::NotFound("Product not found".to_string()),
            other => other.into(),
        })?;
    Ok(Json(json!({ "message": "Product deleted !" })))
}

/// POST /api/products/{id}/view — public view-counter increment.
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductJson>> {
    let updated = state
        .store
        .increment_views(&ProductId::new(id))
        .await
        .map_err(|error| match error {
            StoreError::NotFound => ApiError::NotFound("Product not found".to_string()),
            other => other.into(),
        })?;
    Ok(Json(updated.into()))
}

/// GET /api/user/products — the caller's own listings, newest first.
pub async fn mine(
    State(state): State<AppState>,
    Identity(user): Identity,
) -> ApiResult<Json<Vec<ProductJson>>> {
    let products = state
        .store
        .products_by_owner(&user.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(products))
}
