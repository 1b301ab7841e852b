//! Category seeding.

use anyhow::Result;
use chrono::Utc;
use farmgate_commerce::catalog::NewCategory;
use farmgate_db::Store;

/// The starter categories every fresh deployment gets.
const SEED_CATEGORIES: &[(&str, &str, &str)] = &[
    (
        "Fruits",
        "Fresh farm-grown fruits",
        "https://example.com/images/fruits.jpg",
    ),
    (
        "Vegetables",
        "Organic and healthy vegetables",
        "https://example.com/images/vegetables.jpg",
    ),
    (
        "Dairy",
        "Milk, cheese, and other dairy products",
        "https://example.com/images/dairy.jpg",
    ),
    (
        "Grains",
        "Maize, rice, wheat and more",
        "https://example.com/images/grains.jpg",
    ),
    (
        "Livestock",
        "Cattle, goats, poultry and others",
        "https://example.com/images/livestock.jpg",
    ),
];

/// Insert any starter category that does not already exist. Returns the
/// number of rows actually inserted.
pub async fn seed_categories(store: &Store) -> Result<usize> {
    let mut inserted = 0;
    for (name, description, image_url) in SEED_CATEGORIES {
        let category = NewCategory {
            name: (*name).to_string(),
            description: (*description).to_string(),
            image_url: (*image_url).to_string(),
        }
        .into_category(Utc::now());

        if store.upsert_category(&category).await? {
            inserted += 1;
            tracing::info!(name, "seeded category");
        }
    }
    Ok(inserted)
}
