//! Order types.

use crate::error::MarketError;
use crate::ids::{OrderId, OrderItemId, ProductId, UserId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status.
///
/// No transition graph is enforced: a seller may overwrite the status with
/// any of the four values at any time. The only validation is that the
/// status string is one of the four uppercase literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order placed, awaiting handling by the seller.
    #[default]
    Pending,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Get the wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Parse an exact status literal. Anything outside the four uppercase
    /// literals is rejected.
    pub fn parse(s: &str) -> Result<Self, MarketError> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(MarketError::InvalidStatus(other.to_string())),
        }
    }

    /// Check if the order has reached an end state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// An order placed with a single seller.
///
/// Orders are immutable once created except for `status` and
/// `tracking_number`, which only the owning seller may change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// The buyer who placed the order.
    pub buyer_id: UserId,
    /// The seller whose products this order covers.
    pub seller_id: UserId,
    /// Current status.
    pub status: OrderStatus,
    /// Amount charged: Σ(quantity × price) for the seller's items plus the
    /// flat shipping fee, computed once at creation time.
    pub total_amount: Money,
    /// Payment method chosen at checkout (e.g. "paystack").
    pub payment_method: String,
    /// Gateway reference for the payment, if any.
    pub payment_reference: Option<String>,
    /// Carrier tracking number, set by the seller when shipping.
    pub tracking_number: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// A line item in an order.
///
/// This is an association snapshot: it records what was ordered and how
/// many, but not the price at the time. The order's `total_amount` is the
/// only frozen monetary value; later price changes do not rewrite it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Unique order-item identifier.
    pub id: OrderItemId,
    /// Owning order.
    pub order_id: OrderId,
    /// Product ordered.
    pub product_id: ProductId,
    /// Quantity ordered.
    pub quantity: i64,
}

/// An order item joined with its product data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub item: OrderItem,
    pub product: crate::catalog::Product,
}

/// An order with its shipping snapshot and lines, as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDetail {
    pub order: Order,
    pub shipping: crate::checkout::ShippingInfo,
    pub lines: Vec<OrderLine>,
}

impl OrderDetail {
    /// Titles of every product in the order, in line order.
    pub fn product_titles(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.product.title.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_status_rejects_unknown_literals() {
        assert!(OrderStatus::parse("REFUNDED").is_err());
        assert!(OrderStatus::parse("").is_err());
        // Exact match only: lowercase is not accepted.
        assert!(OrderStatus::parse("pending").is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }
}
