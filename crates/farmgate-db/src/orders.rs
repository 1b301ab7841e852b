//! Order queries.

use crate::products::product_from_row;
use crate::rows::{decode_error, money_from_row};
use crate::{Store, StoreError};
use farmgate_commerce::checkout::{
    Order, OrderDetail, OrderItem, OrderLine, OrderStatus, PlacedOrder, SellerGroup, ShippingInfo,
};
use farmgate_commerce::ids::{OrderId, OrderItemId, ProductId, UserId};
use sqlx::postgres::PgRow;
use sqlx::{query, Row};

const ORDER_COLUMNS: &str = "id, buyer_id, seller_id, status, total_minor, currency, \
     payment_method, payment_reference, tracking_number, created_at, updated_at";

const ORDER_LINES_SQL: &str = "SELECT oi.id AS item_id, oi.order_id, oi.product_id, oi.quantity, \
            p.id, p.title, p.description, p.price_minor, p.currency, p.stock, \
            p.image_url, p.views, p.owner_id, p.category_id, p.created_at, p.updated_at \
     FROM order_items oi \
     JOIN products p ON p.id = oi.product_id \
     WHERE oi.order_id = $1";

impl Store {
    /// Persist a checkout: one order per seller group, each with its own
    /// shipping snapshot and items, then clear the ordered items from the
    /// buyer's cart.
    ///
    /// Everything runs in a single transaction — a failure at any point
    /// leaves no orders behind and the cart untouched.
    pub async fn place_orders(
        &self,
        buyer: &UserId,
        groups: &[SellerGroup],
        shipping: &ShippingInfo,
        payment_method: &str,
        payment_reference: Option<&str>,
    ) -> Result<Vec<PlacedOrder>, StoreError> {
        let mut tx = self.pool().begin().await?;
        let mut placed = Vec::with_capacity(groups.len());

        for group in groups {
            let order_id = OrderId::generate();

            query(
                "INSERT INTO orders \
                     (id, buyer_id, seller_id, status, total_minor, currency, \
                      payment_method, payment_reference) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(order_id.as_str())
            .bind(buyer.as_str())
            .bind(group.seller_id.as_str())
            .bind(OrderStatus::Pending.as_str())
            .bind(group.total.amount_minor)
            .bind(group.total.currency.code())
            .bind(payment_method)
            .bind(payment_reference)
            .execute(&mut *tx)
            .await?;

            query(
                "INSERT INTO shipping_info \
                     (order_id, full_name, email, phone, address, city, country) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(order_id.as_str())
            .bind(&shipping.full_name)
            .bind(&shipping.email)
            .bind(&shipping.phone)
            .bind(&shipping.address)
            .bind(&shipping.city)
            .bind(&shipping.country)
            .execute(&mut *tx)
            .await?;

            for item in &group.items {
                query(
                    "INSERT INTO order_items (id, order_id, product_id, quantity) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(OrderItemId::generate().as_str())
                .bind(order_id.as_str())
                .bind(item.product_id.as_str())
                .bind(item.quantity)
                .execute(&mut *tx)
                .await?;
            }

            placed.push(PlacedOrder {
                order_id,
                seller_id: group.seller_id.clone(),
                amount: group.total,
            });
        }

        // Clear only what was ordered, not the whole cart.
        let ordered_ids: Vec<String> = groups
            .iter()
            .flat_map(|g| g.items.iter())
            .map(|item| item.product_id.as_str().to_string())
            .collect();
        query(
            "DELETE FROM cart_items \
             WHERE product_id = ANY($2) \
               AND cart_id IN (SELECT id FROM carts WHERE user_id = $1)",
        )
        .bind(buyer.as_str())
        .bind(&ordered_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(buyer = %buyer, orders = placed.len(), "checkout persisted");
        Ok(placed)
    }

    /// Fetch one order with shipping and lines, scoped to the buyer.
    pub async fn order_for_buyer(
        &self,
        id: &OrderId,
        buyer: &UserId,
    ) -> Result<Option<OrderDetail>, StoreError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND buyer_id = $2");
        let order = query(&sql)
            .bind(id.as_str())
            .bind(buyer.as_str())
            .try_map(|row: PgRow| order_from_row(&row))
            .fetch_optional(self.pool())
            .await?;
        match order {
            Some(order) => Ok(Some(self.order_detail(order).await?)),
            None => Ok(None),
        }
    }

    /// List a seller's orders with shipping and lines, newest first.
    pub async fn seller_orders(&self, seller: &UserId) -> Result<Vec<OrderDetail>, StoreError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE seller_id = $1 ORDER BY created_at DESC"
        );
        let orders = query(&sql)
            .bind(seller.as_str())
            .try_map(|row: PgRow| order_from_row(&row))
            .fetch_all(self.pool())
            .await?;
        self.order_details(orders).await
    }

    /// The seller's most recent orders, for the activity feed.
    pub async fn recent_seller_orders(
        &self,
        seller: &UserId,
        limit: i64,
    ) -> Result<Vec<OrderDetail>, StoreError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE seller_id = $1 ORDER BY created_at DESC LIMIT $2"
        );
        let orders = query(&sql)
            .bind(seller.as_str())
            .bind(limit)
            .try_map(|row: PgRow| order_from_row(&row))
            .fetch_all(self.pool())
            .await?;
        self.order_details(orders).await
    }

    /// Overwrite status (and optionally the tracking number), scoped to
    /// the owning seller. Zero matched rows — unknown order or someone
    /// else's — is [`StoreError::NotFound`].
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        seller: &UserId,
        status: OrderStatus,
        tracking_number: Option<&str>,
    ) -> Result<Order, StoreError> {
        let sql = format!(
            "UPDATE orders SET \
                 status = $3, \
                 tracking_number = COALESCE($4, tracking_number), \
                 updated_at = now() \
             WHERE id = $1 AND seller_id = $2 \
             RETURNING {ORDER_COLUMNS}"
        );
        let updated = query(&sql)
            .bind(id.as_str())
            .bind(seller.as_str())
            .bind(status.as_str())
            .bind(tracking_number)
            .try_map(|row: PgRow| order_from_row(&row))
            .fetch_optional(self.pool())
            .await?;
        updated.ok_or(StoreError::NotFound)
    }

    async fn order_details(&self, orders: Vec<Order>) -> Result<Vec<OrderDetail>, StoreError> {
        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            details.push(self.order_detail(order).await?);
        }
        Ok(details)
    }

    async fn order_detail(&self, order: Order) -> Result<OrderDetail, StoreError> {
        let shipping = query(
            "SELECT full_name, email, phone, address, city, country \
             FROM shipping_info WHERE order_id = $1",
        )
        .bind(order.id.as_str())
        .try_map(|row: PgRow| shipping_from_row(&row))
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| StoreError::Corrupt(format!("order {} has no shipping info", order.id)))?;

        let lines = query(ORDER_LINES_SQL)
            .bind(order.id.as_str())
            .try_map(|row: PgRow| order_line_from_row(&row))
            .fetch_all(self.pool())
            .await?;

        Ok(OrderDetail {
            order,
            shipping,
            lines,
        })
    }
}

fn order_from_row(row: &PgRow) -> sqlx::Result<Order> {
    let status: String = row.try_get("status")?;
    let status = OrderStatus::parse(&status)
        .map_err(|_| decode_error("status", format!("unknown order status: {status}")))?;
    Ok(Order {
        id: OrderId::new(row.try_get::<String, _>("id")?),
        buyer_id: UserId::new(row.try_get::<String, _>("buyer_id")?),
        seller_id: UserId::new(row.try_get::<String, _>("seller_id")?),
        status,
        total_amount: money_from_row(row, "total_minor", "currency")?,
        payment_method: row.try_get("payment_method")?,
        payment_reference: row.try_get("payment_reference")?,
        tracking_number: row.try_get("tracking_number")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn shipping_from_row(row: &PgRow) -> sqlx::Result<ShippingInfo> {
    Ok(ShippingInfo {
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        address: row.try_get("address")?,
        city: row.try_get("city")?,
        country: row.try_get("country")?,
    })
}

fn order_line_from_row(row: &PgRow) -> sqlx::Result<OrderLine> {
    let item = OrderItem {
        id: OrderItemId::new(row.try_get::<String, _>("item_id")?),
        order_id: OrderId::new(row.try_get::<String, _>("order_id")?),
        product_id: ProductId::new(row.try_get::<String, _>("product_id")?),
        quantity: row.try_get("quantity")?,
    };
    Ok(OrderLine {
        item,
        product: product_from_row(row)?,
    })
}
