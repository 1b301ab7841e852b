//! PostgreSQL storage layer for the Farmgate marketplace.
//!
//! Provides a [`Store`] over an `sqlx` connection pool with typed query
//! methods for every entity, plus embedded schema migrations.
//!
//! # Example
//!
//! ```rust,ignore
//! use farmgate_db::Store;
//!
//! let store = Store::connect(&database_url).await?;
//! store.migrate().await?;
//!
//! let products = store.list_products().await?;
//! ```

mod error;
mod rows;

mod blog;
mod carts;
mod categories;
mod orders;
mod products;

pub use error::StoreError;
pub use products::ProductWithCategory;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// PostgreSQL-backed marketplace store.
#[derive(Debug, Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Connect to the database.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run pending schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
