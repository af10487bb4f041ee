//! Order types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::checkout::Address;
use crate::ids::{OrderId, UserId};
use crate::money::Money;

/// Identity snapshot an order carries.
///
/// A flat value, not a user object: the order only needs the fields its
/// persisted record schema asks for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerInfo {
    /// Username, the ledger key.
    pub username: UserId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
}

impl CustomerInfo {
    /// Create a new customer snapshot.
    pub fn new(
        username: impl Into<UserId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payment method chosen at checkout.
///
/// Recorded as an opaque choice on the order; nothing is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Pay the rider at the doorstep.
    CashOnDelivery,
    /// Card details collected by the caller, not stored here.
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cash-on-delivery",
            PaymentMethod::Card => "card",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash-on-delivery" | "cod" => Some(PaymentMethod::CashOnDelivery),
            "card" => Some(PaymentMethod::Card),
            _ => None,
        }
    }
}

/// A committed purchase.
///
/// Created only by the checkout coordinator and immutable afterwards.
/// Retrieval ordering is (user, timestamp): the ledger appends in
/// chronological order and never reorders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Who placed the order.
    pub customer: CustomerInfo,
    /// Local time the checkout was coordinated.
    pub placed_at: NaiveDateTime,
    /// Snapshot copy of the cart's lines at checkout.
    pub line_items: Vec<LineItem>,
    /// Sum of unit_price × quantity over the lines.
    pub total: Money,
    /// Where the order ships.
    pub shipping_address: Address,
    /// Opaque payment choice, if the caller supplied one.
    pub payment_method: Option<PaymentMethod>,
}

impl Order {
    /// Total unit count across all lines.
    pub fn item_count(&self) -> u64 {
        self.line_items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_full_name() {
        let customer = CustomerInfo::new("maya01", "Maya", "Iyer");
        assert_eq!(customer.full_name(), "Maya Iyer");
        assert_eq!(customer.username.as_str(), "maya01");
    }

    #[test]
    fn test_payment_method_round_trip() {
        assert_eq!(
            PaymentMethod::from_str("cash-on-delivery"),
            Some(PaymentMethod::CashOnDelivery)
        );
        assert_eq!(PaymentMethod::from_str("COD"), Some(PaymentMethod::CashOnDelivery));
        assert_eq!(PaymentMethod::from_str("card"), Some(PaymentMethod::Card));
        assert_eq!(PaymentMethod::from_str("upi"), None);
        assert_eq!(
            PaymentMethod::from_str(PaymentMethod::Card.as_str()),
            Some(PaymentMethod::Card)
        );
    }
}
