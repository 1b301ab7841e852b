//! Cart queries.
//!
//! Mutations follow the contract of the cart endpoints: find-or-create the
//! user's cart, touch the one cart-item row, and re-fetch the whole cart
//! for the response. Concurrent mutations from the same user are not
//! synchronized; last write wins.

use crate::products::product_from_row;
use crate::{Store, StoreError};
use farmgate_commerce::cart::{Cart, CartItem, CartLine, CartView};
use farmgate_commerce::ids::{CartId, CartItemId, ProductId, UserId};
use sqlx::postgres::PgRow;
use sqlx::{query, query_as, Row};

const CART_COLUMNS: &str = "id, user_id, created_at";

const CART_LINES_SQL: &str = "SELECT ci.id AS item_id, ci.cart_id, ci.product_id, ci.quantity, \
            p.id, p.title, p.description, p.price_minor, p.currency, p.stock, \
            p.image_url, p.views, p.owner_id, p.category_id, p.created_at, p.updated_at \
     FROM cart_items ci \
     JOIN products p ON p.id = ci.product_id \
     WHERE ci.cart_id = $1";

/// Quantity stored after an add: a fresh row starts at 1, an existing row
/// collapses by incrementing exactly once.
pub(crate) fn quantity_after_add(existing: Option<i64>) -> i64 {
    match existing {
        Some(quantity) => quantity + 1,
        None => 1,
    }
}

impl Store {
    /// Find the user's cart, if one has been created.
    pub async fn find_cart(&self, user: &UserId) -> Result<Option<Cart>, StoreError> {
        let sql = format!("SELECT {CART_COLUMNS} FROM carts WHERE user_id = $1");
        let cart = query(&sql)
            .bind(user.as_str())
            .try_map(|row: PgRow| cart_from_row(&row))
            .fetch_optional(self.pool())
            .await?;
        Ok(cart)
    }

    /// Find the user's cart, creating it on first use.
    pub async fn find_or_create_cart(&self, user: &UserId) -> Result<Cart, StoreError> {
        if let Some(cart) = self.find_cart(user).await? {
            return Ok(cart);
        }

        let created = query(
            "INSERT INTO carts (id, user_id) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO NOTHING \
             RETURNING id, user_id, created_at",
        )
        .bind(CartId::generate().as_str())
        .bind(user.as_str())
        .try_map(|row: PgRow| cart_from_row(&row))
        .fetch_optional(self.pool())
        .await?;

        match created {
            Some(cart) => Ok(cart),
            // Lost a creation race; the other request's cart is ours too.
            None => self.find_cart(user).await?.ok_or(StoreError::NotFound),
        }
    }

    /// Fetch the user's full cart with nested product data.
    pub async fn cart_view(&self, user: &UserId) -> Result<Option<CartView>, StoreError> {
        let Some(cart) = self.find_cart(user).await? else {
            return Ok(None);
        };
        let lines = self.cart_lines(&cart.id).await?;
        Ok(Some(CartView { cart, lines }))
    }

    /// Add one unit of a product to the user's cart, creating the cart
    /// and/or the item row as needed. Returns the updated cart.
    pub async fn add_to_cart(
        &self,
        user: &UserId,
        product_id: &ProductId,
    ) -> Result<CartView, StoreError> {
        let cart = self.find_or_create_cart(user).await?;

        let existing: Option<(String, i64)> = query_as(
            "SELECT id, quantity FROM cart_items WHERE cart_id = $1 AND product_id = $2",
        )
        .bind(cart.id.as_str())
        .bind(product_id.as_str())
        .fetch_optional(self.pool())
        .await?;

        match &existing {
            Some((item_id, quantity)) => {
                query("UPDATE cart_items SET quantity = $2 WHERE id = $1")
                    .bind(item_id)
                    .bind(quantity_after_add(Some(*quantity)))
                    .execute(self.pool())
                    .await?;
            }
            None => {
                query(
                    "INSERT INTO cart_items (id, cart_id, product_id, quantity) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(CartItemId::generate().as_str())
                .bind(cart.id.as_str())
                .bind(product_id.as_str())
                .bind(quantity_after_add(None))
                .execute(self.pool())
                .await?;
            }
        }

        let lines = self.cart_lines(&cart.id).await?;
        Ok(CartView { cart, lines })
    }

    /// Overwrite the quantity of a product in the user's cart. A product
    /// not in the cart is a no-op, matching the loose update semantics of
    /// the endpoint; a missing cart is [`StoreError::NotFound`].
    pub async fn set_cart_quantity(
        &self,
        user: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartView, StoreError> {
        let cart = self.find_cart(user).await?.ok_or(StoreError::NotFound)?;

        query("UPDATE cart_items SET quantity = $3 WHERE cart_id = $1 AND product_id = $2")
            .bind(cart.id.as_str())
            .bind(product_id.as_str())
            .bind(quantity)
            .execute(self.pool())
            .await?;

        let lines = self.cart_lines(&cart.id).await?;
        Ok(CartView { cart, lines })
    }

    /// Remove a product from the user's cart.
    pub async fn remove_from_cart(
        &self,
        user: &UserId,
        product_id: &ProductId,
    ) -> Result<CartView, StoreError> {
        let cart = self.find_cart(user).await?.ok_or(StoreError::NotFound)?;

        query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart.id.as_str())
            .bind(product_id.as_str())
            .execute(self.pool())
            .await?;

        let lines = self.cart_lines(&cart.id).await?;
        Ok(CartView { cart, lines })
    }

    async fn cart_lines(&self, cart_id: &CartId) -> Result<Vec<CartLine>, StoreError> {
        let lines = query(CART_LINES_SQL)
            .bind(cart_id.as_str())
            .try_map(|row: PgRow| cart_line_from_row(&row))
            .fetch_all(self.pool())
            .await?;
        Ok(lines)
    }
}

fn cart_from_row(row: &PgRow) -> sqlx::Result<Cart> {
    Ok(Cart {
        id: CartId::new(row.try_get::<String, _>("id")?),
        user_id: UserId::new(row.try_get::<String, _>("user_id")?),
        created_at: row.try_get("created_at")?,
    })
}

fn cart_line_from_row(row: &PgRow) -> sqlx::Result<CartLine> {
    let item = CartItem {
        id: CartItemId::new(row.try_get::<String, _>("item_id")?),
        cart_id: CartId::new(row.try_get::<String, _>("cart_id")?),
        product_id: ProductId::new(row.try_get::<String, _>("product_id")?),
        quantity: row.try_get("quantity")?,
    };
    Ok(CartLine {
        item,
        product: product_from_row(row)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_collapses_by_incrementing_once() {
        assert_eq!(quantity_after_add(None), 1);
        assert_eq!(quantity_after_add(Some(1)), 2);
        assert_eq!(quantity_after_add(Some(7)), 8);
    }
}
