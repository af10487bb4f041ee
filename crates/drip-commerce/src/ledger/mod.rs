//! Order ledger module.
//!
//! The ledger is the durable, append-only record of committed orders per
//! user. The trait is the seam between the engine and whatever storage
//! backs it; this crate ships an in-memory implementation, the data crate
//! ships the file-backed one.

use std::collections::HashMap;

use crate::checkout::Order;
use crate::error::StoreError;
use crate::ids::UserId;

/// Append-only store of committed orders, keyed by user.
pub trait OrderLedger {
    /// Durably append an order.
    ///
    /// Must never overwrite or reorder prior entries for the same user.
    /// A failure means the order is NOT committed; the coordinator relies
    /// on that to leave the cart untouched.
    fn append(&mut self, order: &Order) -> Result<(), StoreError>;

    /// Full chronological order history for a user.
    ///
    /// A user with no prior orders gets an empty sequence, not an error.
    fn history(&self, user: &UserId) -> Result<Vec<Order>, StoreError>;
}

/// In-process ledger for tests and embedders that don't need durability.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    orders: HashMap<UserId, Vec<Order>>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of committed orders across all users.
    pub fn len(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }

    /// Check if no orders have been committed.
    pub fn is_empty(&self) -> bool {
        self.orders.values().all(Vec::is_empty)
    }
}

impl OrderLedger for MemoryLedger {
    fn append(&mut self, order: &Order) -> Result<(), StoreError> {
        self.orders
            .entry(order.customer.username.clone())
            .or_default()
            .push(order.clone());
        tracing::debug!(order = %order.id, user = %order.customer.username, "order appended");
        Ok(())
    }

    fn history(&self, user: &UserId) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.get(user).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;
    use crate::checkout::{Address, CustomerInfo};
    use crate::ids::OrderId;
    use crate::money::{Currency, Money};

    fn order_for(username: &str, amount: i64) -> Order {
        Order {
            id: OrderId::generate(),
            customer: CustomerInfo::new(username, "Maya", "Iyer"),
            placed_at: chrono::Local::now().naive_local(),
            line_items: vec![LineItem {
                title: "Cap".to_string(),
                unit_price: Money::new(amount, Currency::INR),
                quantity: 1,
            }],
            total: Money::new(amount, Currency::INR),
            shipping_address: Address::new("12 Hill Rd", "Old Clock Tower", "Pune", "MH"),
            payment_method: None,
        }
    }

    #[test]
    fn test_history_preserves_append_order() {
        let mut ledger = MemoryLedger::new();
        let first = order_for("maya01", 1499);
        let second = order_for("maya01", 9999);
        ledger.append(&first).unwrap();
        ledger.append(&second).unwrap();

        let history = ledger.history(&UserId::new("maya01")).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, first.id);
        assert_eq!(history[1].id, second.id);
    }

    #[test]
    fn test_unknown_user_history_is_empty() {
        let ledger = MemoryLedger::new();
        assert!(ledger.history(&UserId::new("ghost")).unwrap().is_empty());
    }

    #[test]
    fn test_users_are_isolated() {
        let mut ledger = MemoryLedger::new();
        ledger.append(&order_for("maya01", 1499)).unwrap();
        ledger.append(&order_for("ravi22", 4499)).unwrap();

        assert_eq!(ledger.history(&UserId::new("maya01")).unwrap().len(), 1);
        assert_eq!(ledger.history(&UserId::new("ravi22")).unwrap().len(), 1);
        assert_eq!(ledger.len(), 2);
    }
}
