//! Product queries.

use crate::rows::money_from_row;
use crate::{Store, StoreError};
use farmgate_commerce::catalog::{Category, Product, ProductPatch};
use farmgate_commerce::checkout::PricedProduct;
use farmgate_commerce::ids::{ProductId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{query, Row};

/// A product joined with its category, as returned by the public listing
/// and detail endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductWithCategory {
    pub product: Product,
    pub category: Category,
}

const PRODUCT_COLUMNS: &str = "id, title, description, price_minor, currency, stock, \
     image_url, views, owner_id, category_id, created_at, updated_at";

const PRODUCT_WITH_CATEGORY_SQL: &str = "SELECT p.id, p.title, p.description, p.price_minor, p.currency, p.stock, \
            p.image_url, p.views, p.owner_id, p.category_id, p.created_at, p.updated_at, \
            c.name AS category_name, c.description AS category_description, \
            c.image_url AS category_image_url, c.created_at AS category_created_at \
     FROM products p \
     JOIN categories c ON c.id = p.category_id";

impl Store {
    /// List all products with their categories.
    pub async fn list_products(&self) -> Result<Vec<ProductWithCategory>, StoreError> {
        let products = query(PRODUCT_WITH_CATEGORY_SQL)
            .try_map(|row: PgRow| product_with_category_from_row(&row))
            .fetch_all(self.pool())
            .await?;
        Ok(products)
    }

    /// Fetch one product with its category.
    pub async fn get_product(
        &self,
        id: &ProductId,
    ) -> Result<Option<ProductWithCategory>, StoreError> {
        let sql = format!("{PRODUCT_WITH_CATEGORY_SQL} WHERE p.id = $1");
        let product = query(&sql)
            .bind(id.as_str())
            .try_map(|row: PgRow| product_with_category_from_row(&row))
            .fetch_optional(self.pool())
            .await?;
        Ok(product)
    }

    /// Insert a new product.
    pub async fn create_product(&self, product: &Product) -> Result<(), StoreError> {
        query(
            "INSERT INTO products \
                 (id, title, description, price_minor, currency, stock, image_url, \
                  views, owner_id, category_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(product.id.as_str())
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price.amount_minor)
        .bind(product.price.currency.code())
        .bind(product.stock)
        .bind(&product.image_url)
        .bind(product.views)
        .bind(product.owner_id.as_str())
        .bind(product.category_id.as_str())
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Apply a partial update, scoped to the owning seller.
    ///
    /// Absent fields keep their stored value. A non-owner (or unknown id)
    /// matches zero rows and yields [`StoreError::NotFound`].
    pub async fn update_product(
        &self,
        id: &ProductId,
        owner: &UserId,
        patch: &ProductPatch,
    ) -> Result<Product, StoreError> {
        let sql = format!(
            "UPDATE products SET \
                 title = COALESCE($3, title), \
                 description = COALESCE($4, description), \
                 price_minor = COALESCE($5, price_minor), \
                 stock = COALESCE($6, stock), \
                 image_url = COALESCE($7, image_url), \
                 category_id = COALESCE($8, category_id), \
                 updated_at = now() \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let updated = query(&sql)
            .bind(id.as_str())
            .bind(owner.as_str())
            .bind(patch.title.as_deref())
            .bind(patch.description.as_deref())
            .bind(patch.price.map(|p| p.amount_minor))
            .bind(patch.stock)
            .bind(patch.image_url.as_deref())
            .bind(patch.category_id.as_ref().map(|c| c.as_str()))
            .try_map(|row: PgRow| product_from_row(&row))
            .fetch_optional(self.pool())
            .await?;
        updated.ok_or(StoreError::NotFound)
    }

    /// Delete a product, scoped to the owning seller.
    pub async fn delete_product(&self, id: &ProductId, owner: &UserId) -> Result<(), StoreError> {
        let result = query("DELETE FROM products WHERE id = $1 AND owner_id = $2")
            .bind(id.as_str())
            .bind(owner.as_str())
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Increment the view counter and return the updated product.
    pub async fn increment_views(&self, id: &ProductId) -> Result<Product, StoreError> {
        let sql = format!(
            "UPDATE products SET views = views + 1 WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        );
        let updated = query(&sql)
            .bind(id.as_str())
            .try_map(|row: PgRow| product_from_row(&row))
            .fetch_optional(self.pool())
            .await?;
        updated.ok_or(StoreError::NotFound)
    }

    /// List a seller's own products, newest first.
    pub async fn products_by_owner(&self, owner: &UserId) -> Result<Vec<Product>, StoreError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE owner_id = $1 ORDER BY created_at DESC"
        );
        let products = query(&sql)
            .bind(owner.as_str())
            .try_map(|row: PgRow| product_from_row(&row))
            .fetch_all(self.pool())
            .await?;
        Ok(products)
    }

    /// Batch-resolve price and owner for the given product ids (the
    /// checkout lookup). Ids with no matching product are simply absent
    /// from the result; the caller decides how to report them.
    pub async fn priced_products(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<PricedProduct>, StoreError> {
        let id_strings: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();
        let priced = query(
            "SELECT id, price_minor, currency, owner_id FROM products WHERE id = ANY($1)",
        )
        .bind(&id_strings)
        .try_map(|row: PgRow| {
            Ok(PricedProduct {
                id: ProductId::new(row.try_get::<String, _>("id")?),
                price: money_from_row(&row, "price_minor", "currency")?,
                owner_id: UserId::new(row.try_get::<String, _>("owner_id")?),
            })
        })
        .fetch_all(self.pool())
        .await?;
        Ok(priced)
    }
}

/// Decode a product from unprefixed product columns.
pub(crate) fn product_from_row(row: &PgRow) -> sqlx::Result<Product> {
    Ok(Product {
        id: ProductId::new(row.try_get::<String, _>("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        price: money_from_row(row, "price_minor", "currency")?,
        stock: row.try_get("stock")?,
        image_url: row.try_get("image_url")?,
        views: row.try_get("views")?,
        owner_id: UserId::new(row.try_get::<String, _>("owner_id")?),
        category_id: row.try_get::<String, _>("category_id")?.into(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Decode a product plus its `category_`-prefixed category columns.
fn product_with_category_from_row(row: &PgRow) -> sqlx::Result<ProductWithCategory> {
    let product = product_from_row(row)?;
    let category = Category {
        id: product.category_id.clone(),
        name: row.try_get("category_name")?,
        description: row.try_get("category_description")?,
        image_url: row.try_get("category_image_url")?,
        created_at: row.try_get("category_created_at")?,
    };
    Ok(ProductWithCategory { product, category })
}
