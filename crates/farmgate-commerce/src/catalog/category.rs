//! Category types for product organization.

use crate::ids::CategoryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product category.
///
/// Categories are flat; names are unique across the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name (unique).
    pub name: String,
    /// Category description.
    pub description: String,
    /// Category image URL.
    pub image_url: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl NewCategory {
    /// Materialize into a full category with a generated id.
    pub fn into_category(self, now: DateTime<Utc>) -> Category {
        Category {
            id: CategoryId::generate(),
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_creation() {
        let cat = NewCategory {
            name: "Fruits".to_string(),
            description: "Fresh farm-grown fruits".to_string(),
            image_url: "https://example.com/images/fruits.jpg".to_string(),
        }
        .into_category(Utc::now());

        assert_eq!(cat.name, "Fruits");
        assert!(!cat.id.as_str().is_empty());
    }
}
