//! Cart endpoints.
//!
//! Every mutation responds with the full updated cart, nested product data
//! included, so the UI never has to reconcile partial state.

use crate::dto::{
    AddCartItemRequest, CartEnvelope, CartJson, RemoveCartItemRequest, SetCartQuantityRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::extract::Identity;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use farmgate_commerce::cart::{Cart, CartView};
use farmgate_commerce::ids::{CartId, ProductId};
use farmgate_db::StoreError;

/// An empty view for users who have never touched their cart; the lazily
/// created row only appears on first mutation.
fn empty_view(user_id: farmgate_commerce::ids::UserId) -> CartView {
    CartView {
        cart: Cart {
            id: CartId::new(""),
            user_id,
            created_at: Utc::now(),
        },
        lines: Vec::new(),
    }
}

/// GET /api/user/cart — the caller's cart.
pub async fn fetch(
    State(state): State<AppState>,
    Identity(user): Identity,
) -> ApiResult<Json<CartEnvelope>> {
    let view = state
        .store
        .cart_view(&user.id)
        .await?
        .unwrap_or_else(|| empty_view(user.id));
    Ok(Json(CartEnvelope {
        cart: CartJson::from(view),
    }))
}

/// POST /api/user/cart — add one unit of a product.
pub async fn add(
    State(state): State<AppState>,
    Identity(user): Identity,
    Json(request): Json<AddCartItemRequest>,
) -> ApiResult<Json<CartEnvelope>> {
    if request.product_id.is_empty() {
        return Err(ApiError::Validation("Missing productId".to_string()));
    }

    let view = state
        .store
        .add_to_cart(&user.id, &ProductId::new(request.product_id))
        .await?;
    Ok(Json(CartEnvelope {
        cart: CartJson::from(view),
    }))
}

/// PATCH /api/user/cart — set a product's quantity.
pub async fn set_quantity(
    State(state): State<AppState>,
    Identity(user): Identity,
    Json(request): Json<SetCartQuantityRequest>,
) -> ApiResult<Json<CartEnvelope>> {
    if request.product_id.is_empty() {
        return Err(ApiError::Validation("Missing productId".to_string()));
    }
    if request.quantity < 1 {
        return Err(ApiError::Validation(format!(
            "Invalid quantity: {}",
            request.quantity
        )));
    }

    let view = state
        .store
        .set_cart_quantity(&user.id, &ProductId::new(request.product_id), request.quantity)
        .await
        .map_err(|error| match error {
            StoreError::NotFound => ApiError::NotFound("Cart not found".to_string()),
            other => other.into(),
        })?;
    Ok(Json(CartEnvelope {
        cart: CartJson::from(view),
    }))
}

/// DELETE /api/user/cart — remove a product entirely.
pub async fn remove(
    State(state): State<AppState>,
    Identity(user): Identity,
    Json(request): Json<RemoveCartItemRequest>,
) -> ApiResult<Json<CartEnvelope>> {
    if request.product_id.is_empty() {
        return Err(ApiError::Validation("Missing productId".to_string()));
    }

    let view = state
        .store
        .remove_from_cart(&user.id, &ProductId::new(request.product_id))
        .await
        .map_err(|error| match error {
            StoreError::NotFound => ApiError::NotFound("Cart not found".to_string()),
            other => other.into(),
        })?;
    Ok(Json(CartEnvelope {
        cart: CartJson::from(view),
    }))
}
