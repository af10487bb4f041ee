//! Cart and line item types.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::StoreError;
use crate::ids::CartId;
use crate::money::Money;

/// A line item in a cart or order.
///
/// `unit_price` is the price snapshot taken when the item was reserved;
/// later catalog repricing does not touch it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product title (denormalized for display and matching).
    pub title: String,
    /// Price at reservation time.
    pub unit_price: Money,
    /// Reserved quantity, always positive.
    pub quantity: u32,
}

impl LineItem {
    /// Total price for this line (`unit_price` × `quantity`).
    pub fn total(&self) -> Result<Money, StoreError> {
        self.unit_price
            .try_multiply(i64::from(self.quantity))
            .ok_or(StoreError::Overflow)
    }
}

/// A per-user staging area of reserved, not-yet-committed line items.
///
/// The cart never touches the catalog on its own: `add` reserves against
/// the product handle the caller passes in (under the catalog's writer
/// lock), and `remove` hands the freed quantity back for the caller to
/// restore. Line order is insertion order, for display only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self {
            id: CartId::generate(),
            items: Vec::new(),
        }
    }

    /// Reserve `quantity` units of `product` into the cart.
    ///
    /// Fails with `InvalidQuantity` for zero, `InsufficientStock` when the
    /// product cannot cover the request. On failure neither the cart nor
    /// the product changes. On success the product's stock is decremented
    /// immediately (reserve-on-add) and a line item is appended, or merged
    /// into an existing line with the same title.
    pub fn add(&mut self, product: &mut Product, quantity: u32) -> Result<(), StoreError> {
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity(quantity));
        }
        if product.stock_quantity < quantity {
            return Err(StoreError::InsufficientStock {
                title: product.title.clone(),
                requested: quantity,
                available: product.stock_quantity,
            });
        }

        // All checks pass before any mutation, so a failure leaves
        // stock and cart exactly as they were.
        let merged = match self
            .items
            .iter_mut()
            .find(|item| item.title.eq_ignore_ascii_case(&product.title))
        {
            Some(item) => {
                let updated = item
                    .quantity
                    .checked_add(quantity)
                    .ok_or(StoreError::Overflow)?;
                item.quantity = updated;
                true
            }
            None => {
                self.items.push(LineItem {
                    title: product.title.clone(),
                    unit_price: product.unit_price,
                    quantity,
                });
                false
            }
        };
        product.stock_quantity -= quantity;
        tracing::debug!(
            title = %product.title,
            quantity,
            merged,
            stock = product.stock_quantity,
            "reserved into cart"
        );
        Ok(())
    }

    /// Release `quantity` units of the titled line item.
    ///
    /// Returns the removed quantity so the caller can restore it to the
    /// catalog via `adjust_stock(title, +quantity)`; the cart itself holds
    /// no catalog reference. The line item is dropped when it reaches
    /// zero. On failure nothing changes.
    pub fn remove(&mut self, title: &str, quantity: u32) -> Result<u32, StoreError> {
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity(quantity));
        }
        let position = self
            .items
            .iter()
            .position(|item| item.title.eq_ignore_ascii_case(title))
            .ok_or_else(|| StoreError::ItemNotInCart(title.to_string()))?;

        let item = &mut self.items[position];
        if quantity > item.quantity {
            return Err(StoreError::InsufficientCartQuantity {
                title: item.title.clone(),
                requested: quantity,
                available: item.quantity,
            });
        }

        item.quantity -= quantity;
        if item.quantity == 0 {
            self.items.remove(position);
        }
        tracing::debug!(title, quantity, "released from cart");
        Ok(quantity)
    }

    /// Current line items and their aggregate total.
    ///
    /// The empty cart is a valid state, not an error: callers get an empty
    /// view with a zero total and must handle it explicitly.
    pub fn view(&self) -> Result<CartView, StoreError> {
        let currency = self
            .items
            .first()
            .map(|item| item.unit_price.currency)
            .unwrap_or_default();
        let totals = self
            .items
            .iter()
            .map(LineItem::total)
            .collect::<Result<Vec<_>, _>>()?;
        let total = Money::try_sum(totals, currency).ok_or(StoreError::Overflow)?;
        Ok(CartView {
            lines: self.items.clone(),
            total,
        })
    }

    /// Empty all line items. Invoked only by a successful checkout.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line item by title, ignoring case.
    pub fn line(&self, title: &str) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| item.title.eq_ignore_ascii_case(title))
    }

    /// Total unit count across all lines.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of a cart's contents for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartView {
    /// Line items in insertion order.
    pub lines: Vec<LineItem>,
    /// Aggregate total across all lines.
    pub total: Money,
}

impl CartView {
    /// Check if the view holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn cap(stock: u32) -> Product {
        Product::new("Cap", Money::new(1499, Currency::INR), stock)
    }

    #[test]
    fn test_add_reserves_stock() {
        let mut product = cap(12);
        let mut cart = Cart::new();

        cart.add(&mut product, 5).unwrap();

        assert_eq!(product.stock_quantity, 7);
        let line = cart.line("cap").unwrap();
        assert_eq!(line.quantity, 5);
        assert_eq!(line.unit_price, Money::new(1499, Currency::INR));
    }

    #[test]
    fn test_add_merges_same_title() {
        let mut product = cap(12);
        let mut cart = Cart::new();

        cart.add(&mut product, 2).unwrap();
        cart.add(&mut product, 3).unwrap();

        assert_eq!(cart.line("Cap").unwrap().quantity, 5);
        assert_eq!(cart.unit_count(), 5);
        assert_eq!(product.stock_quantity, 7);
    }

    #[test]
    fn test_add_insufficient_stock_changes_nothing() {
        let mut product = cap(12);
        let mut cart = Cart::new();

        let err = cart.add(&mut product, 15).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientStock { available: 12, requested: 15, .. }
        ));
        assert_eq!(product.stock_quantity, 12);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_zero_quantity() {
        let mut product = cap(12);
        let mut cart = Cart::new();

        let err = cart.add(&mut product, 0).unwrap_err();
        assert!(matches!(err, StoreError::InvalidQuantity(0)));
    }

    #[test]
    fn test_remove_returns_quantity() {
        let mut product = cap(12);
        let mut cart = Cart::new();
        cart.add(&mut product, 5).unwrap();

        let removed = cart.remove("CAP", 3).unwrap();
        assert_eq!(removed, 3);
        assert_eq!(cart.line("Cap").unwrap().quantity, 2);
    }

    #[test]
    fn test_remove_drops_line_at_zero() {
        let mut product = cap(12);
        let mut cart = Cart::new();
        cart.add(&mut product, 5).unwrap();

        cart.remove("Cap", 5).unwrap();
        assert!(cart.is_empty());
        assert!(cart.line("Cap").is_none());
    }

    #[test]
    fn test_remove_missing_item() {
        let mut cart = Cart::new();
        let err = cart.remove("Bandana", 1).unwrap_err();
        assert!(matches!(err, StoreError::ItemNotInCart(t) if t == "Bandana"));
    }

    #[test]
    fn test_remove_excess_quantity_changes_nothing() {
        let mut product = cap(12);
        let mut cart = Cart::new();
        cart.add(&mut product, 2).unwrap();

        let err = cart.remove("Cap", 3).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientCartQuantity { available: 2, requested: 3, .. }
        ));
        assert_eq!(cart.line("Cap").unwrap().quantity, 2);
    }

    #[test]
    fn test_view_totals() {
        let mut cap = cap(12);
        let mut hoodie = Product::new("Hoodie", Money::new(9999, Currency::INR), 10);
        let mut cart = Cart::new();
        cart.add(&mut cap, 2).unwrap();
        cart.add(&mut hoodie, 1).unwrap();

        let view = cart.view().unwrap();
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.total, Money::new(2998 + 9999, Currency::INR));
    }

    #[test]
    fn test_empty_view_is_valid() {
        let cart = Cart::new();
        let view = cart.view().unwrap();
        assert!(view.is_empty());
        assert!(view.total.is_zero());
    }

    #[test]
    fn test_clear() {
        let mut product = cap(12);
        let mut cart = Cart::new();
        cart.add(&mut product, 4).unwrap();

        cart.clear();
        assert!(cart.is_empty());
    }
}
