//! Marketplace error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors that can occur in marketplace domain operations.
#[derive(Error, Debug)]
pub enum MarketError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Several products referenced by a checkout do not exist.
    #[error("Products not found: {}", format_ids(.0))]
    ProductsNotFound(Vec<ProductId>),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Cart not found.
    #[error("Cart not found for user: {0}")]
    CartNotFound(String),

    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Checkout submitted with no line items.
    #[error("Checkout contains no items")]
    EmptyCheckout,

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Order status string outside the allowed set.
    #[error("Invalid order status: {0}")]
    InvalidStatus(String),

    /// Incomplete shipping information.
    #[error("Shipping info incomplete: missing {0}")]
    ShippingIncomplete(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

fn format_ids(ids: &[ProductId]) -> String {
    ids.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_products_message_lists_every_id() {
        let err = MarketError::ProductsNotFound(vec![ProductId::new("a"), ProductId::new("b")]);
        assert_eq!(err.to_string(), "Products not found: a, b");
    }
}
