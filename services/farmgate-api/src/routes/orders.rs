//! Order endpoints, including checkout.

use crate::dto::{CheckoutRequest, OrderJson, PlacedOrderJson, UpdateOrderRequest};
use crate::error::{ApiError, ApiResult};
use crate::extract::Identity;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use farmgate_commerce::checkout::{split_by_seller, LineItem, OrderStatus, ShippingInfo};
use farmgate_commerce::ids::OrderId;
use farmgate_db::StoreError;
use serde_json::json;

/// Everything checkout needs once the request has been validated.
#[derive(Debug)]
struct CheckoutInput {
    items: Vec<LineItem>,
    shipping: ShippingInfo,
    payment_method: String,
    payment_reference: Option<String>,
}

/// Enforce the checkout preconditions: a non-empty item list where every
/// item names a product, complete shipping info, and a payment method.
fn parse_checkout(request: CheckoutRequest) -> Result<CheckoutInput, ApiError> {
    if request.order_items.is_empty() || request.payment_method.is_empty() {
        return Err(ApiError::Validation(
            "Missing or invalid order data".to_string(),
        ));
    }
    if request.order_items.iter().any(|item| item.product_id.is_empty()) {
        return Err(ApiError::Validation(
            "Some order items are missing product ID".to_string(),
        ));
    }
    let shipping: ShippingInfo = request
        .shipping_info
        .ok_or_else(|| ApiError::Validation("Missing or invalid order data".to_string()))?
        .into();
    shipping.validate()?;

    let items = request
        .order_items
        .into_iter()
        .map(|item| LineItem {
            product_id: item.product_id.into(),
            quantity: item.quantity,
        })
        .collect();

    Ok(CheckoutInput {
        items,
        shipping,
        payment_method: request.payment_method,
        payment_reference: request.payment_reference,
    })
}

/// POST /api/orders — split the submitted items into one order per seller
/// and persist the lot atomically.
pub async fn checkout(
    State(state): State<AppState>,
    Identity(user): Identity,
    Json(request): Json<CheckoutRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let input = parse_checkout(request)?;

    let product_ids: Vec<_> = input
        .items
        .iter()
        .map(|item| item.product_id.clone())
        .collect();
    let priced = state.store.priced_products(&product_ids).await?;

    let groups = split_by_seller(&input.items, &priced)?;

    let placed = state
        .store
        .place_orders(
            &user.id,
            &groups,
            &input.shipping,
            &input.payment_method,
            input.payment_reference.as_deref(),
        )
        .await?;

    let orders: Vec<PlacedOrderJson> = placed.into_iter().map(Into::into).collect();
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Orders created and cart cleared successfully",
            "orders": orders,
        })),
    ))
}

/// GET /api/orders/{id} — one order with shipping and items, buyer-scoped.
pub async fn detail(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let detail = state
        .store
        .order_for_buyer(&OrderId::new(id), &user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;
    Ok(Json(json!({
        "success": true,
        "order": OrderJson::from(detail),
    })))
}

/// PATCH /api/orders/{id} — overwrite status (and optionally tracking),
/// seller-scoped. The status string must be one of the four literals;
/// nothing is written otherwise.
pub async fn update_status(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
    Json(request): Json<UpdateOrderRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let status = OrderStatus::parse(&request.status)
        .map_err(|_| ApiError::Validation("Invalid order status".to_string()))?;

    let updated = state
        .store
        .update_order_status(
            &OrderId::new(id),
            &user.id,
            status,
            request.tracking_number.as_deref(),
        )
        .await
        .map_err(|error| match error {
            StoreError::NotFound => ApiError::NotFound(
                "Order not found or you do not have permission to update it".to_string(),
            ),
            other => other.into(),
        })?;

    Ok(Json(json!({
        "success": true,
        "order": OrderJson::from(updated),
    })))
}

/// GET /api/orders/seller — the caller's orders as a seller, newest first.
pub async fn seller_orders(
    State(state): State<AppState>,
    Identity(user): Identity,
) -> ApiResult<Json<serde_json::Value>> {
    let orders: Vec<OrderJson> = state
        .store
        .seller_orders(&user.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(json!({
        "success": true,
        "orders": orders,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{CheckoutItemRequest, ShippingJson};

    fn shipping() -> ShippingJson {
        ShippingJson {
            full_name: "Amina Bello".to_string(),
            email: "amina@example.com".to_string(),
            phone: "+234".to_string(),
            address: "12 Market Road".to_string(),
            city: "Ibadan".to_string(),
            country: "Nigeria".to_string(),
        }
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            order_items: vec![CheckoutItemRequest {
                product_id: "p1".to_string(),
                quantity: 2,
            }],
            shipping_info: Some(shipping()),
            payment_method: "paystack".to_string(),
            payment_reference: Some("ps_123".to_string()),
        }
    }

    #[test]
    fn test_valid_checkout_parses() {
        let input = parse_checkout(request()).unwrap();
        assert_eq!(input.items.len(), 1);
        assert_eq!(input.items[0].quantity, 2);
        assert_eq!(input.payment_method, "paystack");
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut bad = request();
        bad.order_items.clear();
        assert!(parse_checkout(bad).is_err());
    }

    #[test]
    fn test_item_without_product_id_rejected() {
        let mut bad = request();
        bad.order_items.push(CheckoutItemRequest {
            product_id: String::new(),
            quantity: 1,
        });
        let err = parse_checkout(bad).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Some order items are missing product ID"
        );
    }

    #[test]
    fn test_missing_shipping_rejected() {
        let mut bad = request();
        bad.shipping_info = None;
        assert!(parse_checkout(bad).is_err());
    }

    #[test]
    fn test_incomplete_shipping_rejected() {
        let mut bad = request();
        if let Some(shipping) = bad.shipping_info.as_mut() {
            shipping.city = String::new();
        }
        let err = parse_checkout(bad).unwrap_err();
        assert_eq!(err.to_string(), "Shipping info incomplete: missing city");
    }

    #[test]
    fn test_missing_payment_method_rejected() {
        let mut bad = request();
        bad.payment_method = String::new();
        assert!(parse_checkout(bad).is_err());
    }
}
