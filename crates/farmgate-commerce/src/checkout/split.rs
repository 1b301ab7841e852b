//! The order-splitting routine.
//!
//! Checkout takes a flat list of line items, resolves authoritative price
//! and ownership for every referenced product, partitions the items into
//! one group per owning seller, and prices each group independently. The
//! storage layer then persists one order per group in a single
//! transaction.

use crate::error::MarketError;
use crate::ids::{OrderId, ProductId, UserId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Flat shipping fee in minor units (₦200.00), charged once per seller
/// group — not per line item and not per physical shipment.
pub const FLAT_SHIPPING_FEE_MINOR: i64 = 20_000;

/// The flat shipping fee in the given currency.
pub fn flat_shipping_fee(currency: Currency) -> Money {
    Money::new(FLAT_SHIPPING_FEE_MINOR, currency)
}

/// A (product, quantity) pair as submitted by the client at checkout,
/// prior to price/ownership resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Authoritative product data resolved in one batch lookup: the price to
/// charge and the seller who owns the listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricedProduct {
    pub id: ProductId,
    pub price: Money,
    pub owner_id: UserId,
}

/// The subset of a checkout's line items that belong to a single seller,
/// priced and ready to persist as one order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SellerGroup {
    pub seller_id: UserId,
    pub items: Vec<LineItem>,
    /// Σ(quantity × price) + flat shipping fee.
    pub total: Money,
}

/// One created order, as reported back to the buyer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub seller_id: UserId,
    pub amount: Money,
}

/// Partition validated line items into per-seller groups and price each
/// group.
///
/// Rejections (nothing is partially processed):
/// - empty item list
/// - any quantity < 1
/// - any referenced product missing from `products` — the error lists
///   exactly which ids were not found
///
/// Group order follows first appearance of each seller in the item list.
pub fn split_by_seller(
    items: &[LineItem],
    products: &[PricedProduct],
) -> Result<Vec<SellerGroup>, MarketError> {
    if items.is_empty() {
        return Err(MarketError::EmptyCheckout);
    }
    for item in items {
        if item.quantity < 1 {
            return Err(MarketError::InvalidQuantity(item.quantity));
        }
    }

    let missing = missing_ids(items, products);
    if !missing.is_empty() {
        return Err(MarketError::ProductsNotFound(missing));
    }

    // Group line items by owning seller, preserving first-seen order.
    let mut groups: Vec<(UserId, Vec<LineItem>)> = Vec::new();
    for item in items {
        let product = products
            .iter()
            .find(|p| p.id == item.product_id)
            .ok_or_else(|| MarketError::ProductsNotFound(vec![item.product_id.clone()]))?;

        match groups.iter_mut().find(|(seller, _)| seller == &product.owner_id) {
            Some((_, group_items)) => group_items.push(item.clone()),
            None => groups.push((product.owner_id.clone(), vec![item.clone()])),
        }
    }

    groups
        .into_iter()
        .map(|(seller_id, group_items)| {
            let total = group_total(&group_items, products)?;
            Ok(SellerGroup {
                seller_id,
                items: group_items,
                total,
            })
        })
        .collect()
}

/// Requested ids with no matching product, deduplicated, in request order.
fn missing_ids(items: &[LineItem], products: &[PricedProduct]) -> Vec<ProductId> {
    let mut missing: Vec<ProductId> = Vec::new();
    for item in items {
        let found = products.iter().any(|p| p.id == item.product_id);
        if !found && !missing.contains(&item.product_id) {
            missing.push(item.product_id.clone());
        }
    }
    missing
}

/// Σ(quantity × price) over the group plus the flat shipping fee.
fn group_total(items: &[LineItem], products: &[PricedProduct]) -> Result<Money, MarketError> {
    let mut currency: Option<Currency> = None;
    let mut subtotal: Option<Money> = None;

    for item in items {
        let product = products
            .iter()
            .find(|p| p.id == item.product_id)
            .ok_or_else(|| MarketError::ProductsNotFound(vec![item.product_id.clone()]))?;

        match currency {
            None => currency = Some(product.price.currency),
            Some(expected) if expected != product.price.currency => {
                return Err(MarketError::CurrencyMismatch {
                    expected: expected.code().to_string(),
                    got: product.price.currency.code().to_string(),
                });
            }
            Some(_) => {}
        }

        let line_total = product
            .price
            .try_multiply(item.quantity)
            .ok_or(MarketError::Overflow)?;
        subtotal = Some(match subtotal {
            None => line_total,
            Some(acc) => acc.try_add(&line_total).ok_or(MarketError::Overflow)?,
        });
    }

    let currency = currency.unwrap_or_default();
    let subtotal = subtotal.unwrap_or_else(|| Money::zero(currency));
    subtotal
        .try_add(&flat_shipping_fee(currency))
        .ok_or(MarketError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, quantity: i64) -> LineItem {
        LineItem {
            product_id: ProductId::new(id),
            quantity,
        }
    }

    fn priced(id: &str, price_minor: i64, owner: &str) -> PricedProduct {
        PricedProduct {
            id: ProductId::new(id),
            price: Money::new(price_minor, Currency::NGN),
            owner_id: UserId::new(owner),
        }
    }

    #[test]
    fn test_two_sellers_two_orders() {
        // Cart: product A (₦100.00, seller S1) × 2, product B (₦50.00,
        // seller S2) × 1, flat fee ₦200.00 per group.
        let items = vec![item("a", 2), item("b", 1)];
        let products = vec![priced("a", 10_000, "s1"), priced("b", 5_000, "s2")];

        let groups = split_by_seller(&items, &products).unwrap();
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].seller_id.as_str(), "s1");
        assert_eq!(groups[0].total.amount_minor, 40_000); // ₦400.00

        assert_eq!(groups[1].seller_id.as_str(), "s2");
        assert_eq!(groups[1].total.amount_minor, 25_000); // ₦250.00
    }

    #[test]
    fn test_same_seller_collapses_to_one_group() {
        let items = vec![item("a", 1), item("b", 2)];
        let products = vec![priced("a", 1_000, "s1"), priced("b", 2_000, "s1")];

        let groups = split_by_seller(&items, &products).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items.len(), 2);
        // 1000 + 2*2000 + 20000 fee
        assert_eq!(groups[0].total.amount_minor, 25_000);
    }

    #[test]
    fn test_fee_charged_once_per_group() {
        // Three items from one seller still pay a single fee.
        let items = vec![item("a", 1), item("b", 1), item("c", 1)];
        let products = vec![
            priced("a", 100, "s1"),
            priced("b", 100, "s1"),
            priced("c", 100, "s1"),
        ];

        let groups = split_by_seller(&items, &products).unwrap();
        assert_eq!(groups[0].total.amount_minor, 300 + FLAT_SHIPPING_FEE_MINOR);
    }

    #[test]
    fn test_missing_products_listed_exactly() {
        let items = vec![item("a", 1), item("ghost1", 1), item("ghost2", 1)];
        let products = vec![priced("a", 100, "s1")];

        let err = split_by_seller(&items, &products).unwrap_err();
        match err {
            MarketError::ProductsNotFound(ids) => {
                assert_eq!(
                    ids,
                    vec![ProductId::new("ghost1"), ProductId::new("ghost2")]
                );
            }
            other => panic!("expected ProductsNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_checkout_rejected() {
        let err = split_by_seller(&[], &[]).unwrap_err();
        assert!(matches!(err, MarketError::EmptyCheckout));
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let products = vec![priced("a", 100, "s1")];
        for quantity in [0, -3] {
            let err = split_by_seller(&[item("a", quantity)], &products).unwrap_err();
            assert!(matches!(err, MarketError::InvalidQuantity(q) if q == quantity));
        }
    }

    #[test]
    fn test_group_order_follows_first_appearance() {
        let items = vec![item("b2", 1), item("a1", 1), item("b1", 1)];
        let products = vec![
            priced("a1", 100, "s1"),
            priced("b1", 100, "s2"),
            priced("b2", 100, "s2"),
        ];

        let groups = split_by_seller(&items, &products).unwrap();
        assert_eq!(groups[0].seller_id.as_str(), "s2");
        assert_eq!(groups[1].seller_id.as_str(), "s1");
        assert_eq!(groups[0].items.len(), 2);
    }

    #[test]
    fn test_overflow_rejected() {
        let items = vec![item("a", 2)];
        let products = vec![priced("a", i64::MAX / 2 + 1, "s1")];

        let err = split_by_seller(&items, &products).unwrap_err();
        assert!(matches!(err, MarketError::Overflow));
    }
}
