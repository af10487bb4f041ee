//! Product type.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A sellable product in the catalog.
///
/// `stock_quantity` is the remaining unreserved stock: units sitting in an
/// open cart have already been subtracted from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title (unique in the catalog, case-insensitive).
    pub title: String,
    /// Unit price.
    pub unit_price: Money,
    /// Units currently available for reservation.
    pub stock_quantity: u32,
}

impl Product {
    /// Create a new product.
    pub fn new(title: impl Into<String>, unit_price: Money, stock_quantity: u32) -> Self {
        Self {
            id: ProductId::generate(),
            title: title.into(),
            unit_price,
            stock_quantity,
        }
    }

    /// Check whether this product's title matches, ignoring case.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.eq_ignore_ascii_case(title)
    }

    /// Check if any stock is available.
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_product_creation() {
        let product = Product::new("Cap", Money::new(1499, Currency::INR), 12);
        assert_eq!(product.title, "Cap");
        assert_eq!(product.stock_quantity, 12);
        assert!(product.in_stock());
    }

    #[test]
    fn test_title_match_ignores_case() {
        let product = Product::new("Leather-Jacket", Money::new(14999, Currency::INR), 5);
        assert!(product.title_matches("leather-jacket"));
        assert!(product.title_matches("LEATHER-JACKET"));
        assert!(!product.title_matches("jacket"));
    }
}
