//! E-commerce domain types and logic for the Farmgate marketplace.
//!
//! This crate provides the domain layer of a farm-products marketplace:
//!
//! - **Catalog**: Products and their categories
//! - **Cart**: Per-user shopping cart line items
//! - **Checkout**: Splitting a cart into one order per seller, orders,
//!   shipping snapshots
//! - **Activity**: Order-derived activity-feed entries for sellers
//! - **Blog**: Marketplace blog posts
//!
//! Persistence and HTTP live in their own crates; everything here is pure
//! and synchronous so the core rules (grouping, totals, status parsing,
//! validation) can be tested in isolation.
//!
//! # Example
//!
//! ```rust,ignore
//! use farmgate_commerce::prelude::*;
//!
//! let groups = split_by_seller(&line_items, &priced_products)?;
//! for group in &groups {
//!     println!("{} owes {}", group.seller_id, group.total.display());
//! }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod activity;
pub mod blog;
pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::MarketError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::MarketError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, NewCategory, NewProduct, Product, ProductPatch};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartLine, CartView};

    // Checkout
    pub use crate::checkout::{
        flat_shipping_fee, split_by_seller, LineItem, Order, OrderDetail, OrderItem, OrderLine,
        OrderStatus, PlacedOrder, PricedProduct, SellerGroup, ShippingInfo,
        FLAT_SHIPPING_FEE_MINOR,
    };

    // Activity
    pub use crate::activity::ActivityEntry;

    // Blog
    pub use crate::blog::{BlogPost, NewBlogPost};
}
