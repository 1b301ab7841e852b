//! Category queries.

use crate::{Store, StoreError};
use farmgate_commerce::catalog::Category;
use farmgate_commerce::ids::CategoryId;
use sqlx::postgres::PgRow;
use sqlx::{query, Row};

impl Store {
    /// List all categories, name ascending.
    pub async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let categories = query(
            "SELECT id, name, description, image_url, created_at \
             FROM categories ORDER BY name ASC",
        )
        .try_map(|row: PgRow| category_from_row(&row))
        .fetch_all(self.pool())
        .await?;
        Ok(categories)
    }

    /// Insert a new category. Duplicate names map to
    /// [`StoreError::Conflict`].
    pub async fn create_category(&self, category: &Category) -> Result<(), StoreError> {
        query(
            "INSERT INTO categories (id, name, description, image_url, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(category.id.as_str())
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.image_url)
        .bind(category.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| StoreError::from_insert(e, "category"))?;
        Ok(())
    }

    /// Insert a category unless one with the same name already exists.
    /// Returns whether a row was inserted. Used by the seeding command.
    pub async fn upsert_category(&self, category: &Category) -> Result<bool, StoreError> {
        let result = query(
            "INSERT INTO categories (id, name, description, image_url, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(category.id.as_str())
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.image_url)
        .bind(category.created_at)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn category_from_row(row: &PgRow) -> sqlx::Result<Category> {
    Ok(Category {
        id: CategoryId::new(row.try_get::<String, _>("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        image_url: row.try_get("image_url")?,
        created_at: row.try_get("created_at")?,
    })
}
