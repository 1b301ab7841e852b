//! Seller activity feed.
//!
//! The feed is derived data: the seller's most recent orders, each mapped
//! to a human-readable entry. Nothing is stored.

use crate::checkout::{OrderDetail, OrderStatus};
use crate::ids::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An entry in a seller's activity feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityEntry {
    /// The order this entry was derived from.
    pub id: OrderId,
    /// Short title, e.g. "Order #1a2b3c4d".
    pub title: String,
    /// Status-dependent message.
    pub description: String,
    /// Icon hint for the UI.
    pub icon: String,
    /// When the underlying order was created.
    pub created_at: DateTime<Utc>,
    /// Entry kind; only orders feed the stream today.
    pub kind: String,
}

impl ActivityEntry {
    /// Build the feed entry for one order.
    pub fn for_order(detail: &OrderDetail) -> Self {
        let order = &detail.order;
        let product_names = detail.product_titles().join(", ");
        let recipient = detail.shipping.full_name.as_str();

        let (description, icon) = match order.status {
            OrderStatus::Pending => (
                format!("New order received for {product_names}"),
                "shopping-cart",
            ),
            OrderStatus::Shipped => (format!("Order shipped to {recipient}"), "truck"),
            OrderStatus::Delivered => (format!("Order delivered to {recipient}"), "package"),
            other => (format!("Order update: {}", other.as_str()), "truck"),
        };

        Self {
            id: order.id.clone(),
            title: format!("Order #{}", short_id(order.id.as_str())),
            description,
            icon: icon.to_string(),
            created_at: order.created_at,
            kind: "order".to_string(),
        }
    }
}

/// First 8 characters of an order id, for display.
fn short_id(id: &str) -> &str {
    let end = id
        .char_indices()
        .nth(8)
        .map(|(i, _)| i)
        .unwrap_or(id.len());
    &id[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::checkout::{Order, OrderItem, OrderLine, ShippingInfo};
    use crate::ids::{CategoryId, OrderItemId, ProductId, UserId};
    use crate::money::{Currency, Money};

    fn detail(status: OrderStatus, titles: &[&str]) -> OrderDetail {
        let order_id = OrderId::new("0a1b2c3d4e5f");
        let order = Order {
            id: order_id.clone(),
            buyer_id: UserId::new("kp_buyer"),
            seller_id: UserId::new("kp_seller"),
            status,
            total_amount: Money::new(40_000, Currency::NGN),
            payment_method: "paystack".to_string(),
            payment_reference: None,
            tracking_number: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let shipping = ShippingInfo {
            full_name: "Amina Bello".to_string(),
            email: "amina@example.com".to_string(),
            phone: "+234".to_string(),
            address: "12 Market Road".to_string(),
            city: "Ibadan".to_string(),
            country: "Nigeria".to_string(),
        };
        let lines = titles
            .iter()
            .map(|title| OrderLine {
                item: OrderItem {
                    id: OrderItemId::generate(),
                    order_id: order_id.clone(),
                    product_id: ProductId::generate(),
                    quantity: 1,
                },
                product: Product {
                    id: ProductId::generate(),
                    title: (*title).to_string(),
                    description: String::new(),
                    price: Money::new(1_000, Currency::NGN),
                    stock: 1,
                    image_url: String::new(),
                    views: 0,
                    owner_id: UserId::new("kp_seller"),
                    category_id: CategoryId::new("cat"),
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                },
            })
            .collect();
        OrderDetail {
            order,
            shipping,
            lines,
        }
    }

    #[test]
    fn test_pending_order_entry() {
        let entry = ActivityEntry::for_order(&detail(OrderStatus::Pending, &["Maize", "Yam"]));
        assert_eq!(entry.title, "Order #0a1b2c3d");
        assert_eq!(entry.description, "New order received for Maize, Yam");
        assert_eq!(entry.icon, "shopping-cart");
        assert_eq!(entry.kind, "order");
    }

    #[test]
    fn test_shipped_order_entry() {
        let entry = ActivityEntry::for_order(&detail(OrderStatus::Shipped, &["Maize"]));
        assert_eq!(entry.description, "Order shipped to Amina Bello");
        assert_eq!(entry.icon, "truck");
    }

    #[test]
    fn test_delivered_order_entry() {
        let entry = ActivityEntry::for_order(&detail(OrderStatus::Delivered, &["Maize"]));
        assert_eq!(entry.description, "Order delivered to Amina Bello");
        assert_eq!(entry.icon, "package");
    }

    #[test]
    fn test_other_status_entry() {
        let entry = ActivityEntry::for_order(&detail(OrderStatus::Cancelled, &["Maize"]));
        assert_eq!(entry.description, "Order update: CANCELLED");
        assert_eq!(entry.icon, "truck");
    }

    #[test]
    fn test_short_id_handles_short_strings() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("abcdefghij"), "abcdefgh");
    }
}
