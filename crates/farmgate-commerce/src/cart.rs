//! Cart and cart line-item types.
//!
//! A cart is created lazily the first time a user mutates it, and holds one
//! row per distinct product. Row-level mutation semantics (find-or-create,
//! increment-on-add) are implemented by the storage layer; the types here
//! are the read model returned to the client after every mutation.

use crate::catalog::Product;
use crate::ids::{CartId, CartItemId, ProductId, UserId};
use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// The user this cart belongs to (one cart per user).
    pub user_id: UserId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A line item in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Unique cart-item identifier.
    pub id: CartItemId,
    /// Owning cart.
    pub cart_id: CartId,
    /// Product in the cart.
    pub product_id: ProductId,
    /// Quantity, always >= 1. Adding a product already in the cart
    /// increments this instead of inserting a second row.
    pub quantity: i64,
}

/// A cart item joined with its product data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Product,
}

/// The full cart as returned to the client: the cart row plus every line
/// with nested product data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartView {
    pub cart: Cart,
    pub lines: Vec<CartLine>,
}

impl CartView {
    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.item.quantity).sum()
    }

    /// Quantity of a specific product, 0 if absent.
    pub fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.lines
            .iter()
            .find(|l| &l.item.product_id == product_id)
            .map(|l| l.item.quantity)
            .unwrap_or(0)
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cart subtotal: Σ(quantity × product price), before any shipping fee.
    ///
    /// Returns `None` on currency mismatch or overflow.
    pub fn subtotal(&self, currency: Currency) -> Option<Money> {
        let mut acc = Money::zero(currency);
        for line in &self.lines {
            let line_total = line.product.price.try_multiply(line.item.quantity)?;
            acc = acc.try_add(&line_total)?;
        }
        Some(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::CategoryId;

    fn product(id: &str, price_minor: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: String::new(),
            price: Money::new(price_minor, Currency::NGN),
            stock: 10,
            image_url: String::new(),
            views: 0,
            owner_id: UserId::new("kp_seller"),
            category_id: CategoryId::new("cat"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn view(lines: Vec<(Product, i64)>) -> CartView {
        let cart = Cart {
            id: CartId::new("cart-1"),
            user_id: UserId::new("kp_buyer"),
            created_at: Utc::now(),
        };
        let lines = lines
            .into_iter()
            .map(|(product, quantity)| CartLine {
                item: CartItem {
                    id: CartItemId::generate(),
                    cart_id: cart.id.clone(),
                    product_id: product.id.clone(),
                    quantity,
                },
                product,
            })
            .collect();
        CartView { cart, lines }
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let view = view(vec![(product("a", 1000), 2), (product("b", 500), 3)]);
        assert_eq!(view.item_count(), 5);
        assert_eq!(view.quantity_of(&ProductId::new("a")), 2);
        assert_eq!(view.quantity_of(&ProductId::new("missing")), 0);
    }

    #[test]
    fn test_subtotal() {
        let view = view(vec![(product("a", 10_000), 2), (product("b", 5_000), 1)]);
        let subtotal = view.subtotal(Currency::NGN).unwrap();
        assert_eq!(subtotal.amount_minor, 25_000);
    }

    #[test]
    fn test_empty_cart() {
        let view = view(vec![]);
        assert!(view.is_empty());
        assert_eq!(view.item_count(), 0);
        assert!(view.subtotal(Currency::NGN).unwrap().is_zero());
    }
}
