//! Shipping information snapshot.

use crate::error::MarketError;
use serde::{Deserialize, Serialize};

/// Shipping details captured at checkout.
///
/// Every order gets its own copy; records are never shared between orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingInfo {
    /// Recipient full name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
}

impl ShippingInfo {
    /// Check if every field is filled in.
    pub fn is_complete(&self) -> bool {
        !self.full_name.is_empty()
            && !self.email.is_empty()
            && !self.phone.is_empty()
            && !self.address.is_empty()
            && !self.city.is_empty()
            && !self.country.is_empty()
    }

    /// Validate for checkout, naming the first missing field.
    pub fn validate(&self) -> Result<(), MarketError> {
        let missing = if self.full_name.is_empty() {
            "fullName"
        } else if self.email.is_empty() {
            "email"
        } else if self.phone.is_empty() {
            "phone"
        } else if self.address.is_empty() {
            "address"
        } else if self.city.is_empty() {
            "city"
        } else if self.country.is_empty() {
            "country"
        } else {
            return Ok(());
        };
        Err(MarketError::ShippingIncomplete(missing.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ShippingInfo {
        ShippingInfo {
            full_name: "Amina Bello".to_string(),
            email: "amina@example.com".to_string(),
            phone: "+2348012345678".to_string(),
            address: "12 Market Road".to_string(),
            city: "Ibadan".to_string(),
            country: "Nigeria".to_string(),
        }
    }

    #[test]
    fn test_complete_info_validates() {
        assert!(complete().is_complete());
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_missing_field_named() {
        let mut info = complete();
        info.phone = String::new();
        let err = info.validate().unwrap_err();
        assert_eq!(err.to_string(), "Shipping info incomplete: missing phone");
    }
}
