//! Product types.

use crate::error::MarketError;
use crate::ids::{CategoryId, ProductId, UserId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product listed on the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Listing price.
    pub price: Money,
    /// Units in stock.
    pub stock: i64,
    /// URL of the product image (hosted externally).
    pub image_url: String,
    /// View counter, incremented by the public view endpoint.
    pub views: i64,
    /// Identity-provider id of the seller who owns this listing.
    pub owner_id: UserId,
    /// Category this product belongs to.
    pub category_id: CategoryId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Check if the product has units available.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Fields required to create a product.
///
/// Create performs no negative-value validation; price and stock are only
/// checked on the update path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: Money,
    pub stock: i64,
    pub image_url: String,
    pub owner_id: UserId,
    pub category_id: CategoryId,
}

impl NewProduct {
    /// Materialize into a full product with a generated id and timestamps.
    pub fn into_product(self, now: DateTime<Utc>) -> Product {
        Product {
            id: ProductId::generate(),
            title: self.title,
            description: self.description,
            price: self.price,
            stock: self.stock,
            image_url: self.image_url,
            views: 0,
            owner_id: self.owner_id,
            category_id: self.category_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial update to a product.
///
/// Only fields that are present are written; fields that are present are
/// validated (price and stock must not be negative).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<i64>,
    pub image_url: Option<String>,
    pub category_id: Option<CategoryId>,
}

impl ProductPatch {
    /// Check whether the patch carries any field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.image_url.is_none()
            && self.category_id.is_none()
    }

    /// Validate the fields actually present in the patch.
    pub fn validate(&self) -> Result<(), MarketError> {
        if self.is_empty() {
            return Err(MarketError::ValidationError(
                "No fields provided for update".to_string(),
            ));
        }
        if let Some(price) = &self.price {
            if price.is_negative() {
                return Err(MarketError::ValidationError(
                    "Price cannot be negative".to_string(),
                ));
            }
        }
        if let Some(stock) = self.stock {
            if stock < 0 {
                return Err(MarketError::ValidationError(
                    "Stock cannot be negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn patch_with_price(minor: i64) -> ProductPatch {
        ProductPatch {
            price: Some(Money::new(minor, Currency::NGN)),
            ..ProductPatch::default()
        }
    }

    #[test]
    fn test_empty_patch_rejected() {
        let patch = ProductPatch::default();
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(patch_with_price(-1).validate().is_err());
        assert!(patch_with_price(0).validate().is_ok());
    }

    #[test]
    fn test_negative_stock_rejected() {
        let patch = ProductPatch {
            stock: Some(-5),
            ..ProductPatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_absent_fields_not_validated() {
        // A patch touching only the title never trips the price/stock checks.
        let patch = ProductPatch {
            title: Some("Fresh maize".to_string()),
            ..ProductPatch::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_new_product_skips_validation() {
        // Negative values are accepted on the create path; the invariant is
        // only enforced when updating.
        let new = NewProduct {
            title: "Yam".to_string(),
            description: "Tubers".to_string(),
            price: Money::new(-100, Currency::NGN),
            stock: -1,
            image_url: String::new(),
            owner_id: UserId::new("kp_seller"),
            category_id: CategoryId::new("cat"),
        };
        let product = new.into_product(Utc::now());
        assert_eq!(product.views, 0);
        assert!(product.price.is_negative());
    }
}
