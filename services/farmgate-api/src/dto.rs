//! JSON wire types.
//!
//! The bundled UI speaks camelCase JSON with decimal prices; the domain
//! speaks snake_case with minor-unit money. Everything crossing the HTTP
//! boundary converts here.

use chrono::{DateTime, Utc};
use farmgate_commerce::activity::ActivityEntry;
use farmgate_commerce::blog::BlogPost;
use farmgate_commerce::cart::{CartLine, CartView};
use farmgate_commerce::catalog::{Category, Product, ProductPatch};
use farmgate_commerce::checkout::{Order, OrderDetail, OrderLine, PlacedOrder, ShippingInfo};
use farmgate_commerce::money::{Currency, Money};
use farmgate_db::ProductWithCategory;
use serde::{Deserialize, Serialize};

// ── Responses ──

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryJson {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryJson {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into_inner(),
            name: category.name,
            description: category.description,
            image_url: category.image_url,
            created_at: category.created_at,
        }
    }
}

/// Owner display info attached to the public product-detail response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerJson {
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductJson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub image_url: String,
    pub views: i64,
    pub owner_id: String,
    pub category_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerJson>,
}

impl From<Product> for ProductJson {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into_inner(),
            title: product.title,
            description: product.description,
            price: product.price.to_decimal(),
            stock: product.stock,
            image_url: product.image_url,
            views: product.views,
            owner_id: product.owner_id.into_inner(),
            category_id: product.category_id.into_inner(),
            created_at: product.created_at,
            updated_at: product.updated_at,
            category: None,
            owner: None,
        }
    }
}

impl From<ProductWithCategory> for ProductJson {
    fn from(entry: ProductWithCategory) -> Self {
        let mut json = Self::from(entry.product);
        json.category = Some(entry.category.into());
        json
    }
}

impl ProductJson {
    pub fn with_owner(mut self, owner: OwnerJson) -> Self {
        self.owner = Some(owner);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemJson {
    pub id: String,
    pub cart_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub product: ProductJson,
}

impl From<CartLine> for CartItemJson {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.item.id.into_inner(),
            cart_id: line.item.cart_id.into_inner(),
            product_id: line.item.product_id.into_inner(),
            quantity: line.item.quantity,
            product: line.product.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartJson {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub cart_items: Vec<CartItemJson>,
    pub subtotal: f64,
}

impl From<CartView> for CartJson {
    fn from(view: CartView) -> Self {
        let subtotal = view
            .subtotal(Currency::NGN)
            .map(|m| m.to_decimal())
            .unwrap_or(0.0);
        Self {
            id: view.cart.id.into_inner(),
            user_id: view.cart.user_id.into_inner(),
            created_at: view.cart.created_at,
            cart_items: view.lines.into_iter().map(Into::into).collect(),
            subtotal,
        }
    }
}

/// Envelope for every cart response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartEnvelope {
    pub cart: CartJson,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingJson {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

impl From<ShippingJson> for ShippingInfo {
    fn from(json: ShippingJson) -> Self {
        Self {
            full_name: json.full_name,
            email: json.email,
            phone: json.phone,
            address: json.address,
            city: json.city,
            country: json.country,
        }
    }
}

impl From<ShippingInfo> for ShippingJson {
    fn from(info: ShippingInfo) -> Self {
        Self {
            full_name: info.full_name,
            email: info.email,
            phone: info.phone,
            address: info.address,
            city: info.city,
            country: info.country,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemJson {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub product: ProductJson,
}

impl From<OrderLine> for OrderItemJson {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.item.id.into_inner(),
            order_id: line.item.order_id.into_inner(),
            product_id: line.item.product_id.into_inner(),
            quantity: line.item.quantity,
            product: line.product.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderJson {
    pub id: String,
    pub buyer_id: String,
    pub seller_id: String,
    pub status: String,
    pub total_amount: f64,
    pub payment_method: String,
    pub payment_reference: Option<String>,
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_info: Option<ShippingJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_items: Option<Vec<OrderItemJson>>,
}

impl From<Order> for OrderJson {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.into_inner(),
            buyer_id: order.buyer_id.into_inner(),
            seller_id: order.seller_id.into_inner(),
            status: order.status.as_str().to_string(),
            total_amount: order.total_amount.to_decimal(),
            payment_method: order.payment_method,
            payment_reference: order.payment_reference,
            tracking_number: order.tracking_number,
            created_at: order.created_at,
            updated_at: order.updated_at,
            shipping_info: None,
            order_items: None,
        }
    }
}

impl From<OrderDetail> for OrderJson {
    fn from(detail: OrderDetail) -> Self {
        let mut json = Self::from(detail.order);
        json.shipping_info = Some(detail.shipping.into());
        json.order_items = Some(detail.lines.into_iter().map(Into::into).collect());
        json
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrderJson {
    pub id: String,
    pub seller_id: String,
    pub amount: f64,
}

impl From<PlacedOrder> for PlacedOrderJson {
    fn from(placed: PlacedOrder) -> Self {
        Self {
            id: placed.order_id.into_inner(),
            seller_id: placed.seller_id.into_inner(),
            amount: placed.amount.to_decimal(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityJson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<ActivityEntry> for ActivityJson {
    fn from(entry: ActivityEntry) -> Self {
        Self {
            id: entry.id.into_inner(),
            title: entry.title,
            description: entry.description,
            icon: entry.icon,
            created_at: entry.created_at,
            kind: entry.kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostJson {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub author_id: String,
    pub author_name: String,
    pub author_image: String,
    pub created_at: DateTime<Utc>,
}

impl From<BlogPost> for PostJson {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id.into_inner(),
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            author_id: post.author_id.into_inner(),
            author_name: post.author_name,
            author_image: post.author_image,
            created_at: post.created_at,
        }
    }
}

// ── Requests ──

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub image_url: Option<String>,
    pub category_id: Option<String>,
}

impl UpdateProductRequest {
    /// Convert to a domain patch; prices arrive as decimals.
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            title: self.title,
            description: self.description,
            price: self
                .price
                .map(|p| Money::from_decimal(p, Currency::NGN)),
            stock: self.stock,
            image_url: self.image_url,
            category_id: self.category_id.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    #[serde(default)]
    pub product_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCartQuantityRequest {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCartItemRequest {
    #[serde(default)]
    pub product_id: String,
}

/// One checkout line item; the client sends the product id as `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutItemRequest {
    #[serde(rename = "id", default)]
    pub product_id: String,
    #[serde(default)]
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub order_items: Vec<CheckoutItemRequest>,
    #[serde(default)]
    pub shipping_info: Option<ShippingJson>,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_reference: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmgate_commerce::checkout::OrderStatus;
    use farmgate_commerce::ids::{CategoryId, OrderId, ProductId, UserId};

    fn product() -> Product {
        Product {
            id: ProductId::new("p1"),
            title: "Maize".to_string(),
            description: "Dried maize".to_string(),
            price: Money::new(12_550, Currency::NGN),
            stock: 4,
            image_url: "https://example.com/maize.jpg".to_string(),
            views: 9,
            owner_id: UserId::new("kp_seller"),
            category_id: CategoryId::new("c1"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_product_json_uses_camel_case_and_decimal_price() {
        let json = serde_json::to_value(ProductJson::from(product())).unwrap();
        assert_eq!(json["price"], 125.5);
        assert_eq!(json["imageUrl"], "https://example.com/maize.jpg");
        assert_eq!(json["ownerId"], "kp_seller");
        // Absent nested blocks are omitted entirely.
        assert!(json.get("category").is_none());
        assert!(json.get("owner").is_none());
    }

    #[test]
    fn test_order_json_status_literal() {
        let order = Order {
            id: OrderId::new("o1"),
            buyer_id: UserId::new("kp_buyer"),
            seller_id: UserId::new("kp_seller"),
            status: OrderStatus::Shipped,
            total_amount: Money::new(40_000, Currency::NGN),
            payment_method: "paystack".to_string(),
            payment_reference: Some("ref-1".to_string()),
            tracking_number: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(OrderJson::from(order)).unwrap();
        assert_eq!(json["status"], "SHIPPED");
        assert_eq!(json["totalAmount"], 400.0);
        assert_eq!(json["trackingNumber"], serde_json::Value::Null);
    }

    #[test]
    fn test_checkout_request_accepts_ui_shape() {
        let body = r#"{
            "orderItems": [{"id": "p1", "quantity": 2}],
            "shippingInfo": {
                "fullName": "Amina Bello", "email": "a@example.com",
                "phone": "+234", "address": "12 Market Road",
                "city": "Ibadan", "country": "Nigeria"
            },
            "paymentMethod": "paystack",
            "paymentReference": "ps_123"
        }"#;
        let request: CheckoutRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.order_items[0].product_id, "p1");
        assert_eq!(request.order_items[0].quantity, 2);
        assert!(request.shipping_info.is_some());
    }

    #[test]
    fn test_update_request_price_converts_to_minor_units() {
        let request = UpdateProductRequest {
            price: Some(99.95),
            ..UpdateProductRequest::default()
        };
        let patch = request.into_patch();
        assert_eq!(patch.price.unwrap().amount_minor, 9995);
        assert!(patch.title.is_none());
    }

    #[test]
    fn test_activity_json_type_field() {
        let entry = ActivityEntry {
            id: OrderId::new("o1"),
            title: "Order #o1".to_string(),
            description: "New order received for Maize".to_string(),
            icon: "shopping-cart".to_string(),
            created_at: Utc::now(),
            kind: "order".to_string(),
        };
        let json = serde_json::to_value(ActivityJson::from(entry)).unwrap();
        assert_eq!(json["type"], "order");
        assert_eq!(json["icon"], "shopping-cart");
    }
}
