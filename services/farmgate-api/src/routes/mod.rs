//! HTTP routing.

mod activity;
mod cart;
mod categories;
mod orders;
mod posts;
mod products;
mod webhook;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/products",
            get(products::list).post(products::create),
        )
        .route(
            "/api/products/{id}",
            get(products::detail)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/api/products/{id}/view", post(products::record_view))
        .route(
            "/api/categories",
            get(categories::list).post(categories::create),
        )
        .route("/api/orders", post(orders::checkout))
        .route("/api/orders/seller", get(orders::seller_orders))
        .route(
            "/api/orders/{id}",
            get(orders::detail).patch(orders::update_status),
        )
        .route(
            "/api/user/cart",
            get(cart::fetch)
                .post(cart::add)
                .patch(cart::set_quantity)
                .delete(cart::remove),
        )
        .route("/api/user/products", get(products::mine))
        .route("/api/activity", get(activity::recent))
        .route("/api/posts", get(posts::list).post(posts::create))
        .route("/api/posts/{id}", get(posts::detail))
        .route("/api/kinde-webhook", post(webhook::receive))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
