//! Checkout coordinator.

use crate::cart::Cart;
use crate::catalog::SharedCatalog;
use crate::checkout::{Address, CustomerInfo, Order, PaymentMethod};
use crate::error::StoreError;
use crate::ids::OrderId;
use crate::ledger::OrderLedger;

/// Orchestrates every operation that spans the cart and the catalog or
/// ledger: reserving units into a cart, releasing them back to stock, and
/// the atomic cart-to-order transition.
///
/// For checkout, the durable ledger append is the commit point: the cart
/// is cleared only after the append confirms, so a failed write surfaces
/// as `PersistenceFailure` with the cart (and its reservations) intact,
/// and a crash after the append leaves the committed order discoverable
/// in the ledger by id and timestamp.
pub struct Checkout<'a, L: OrderLedger> {
    catalog: &'a SharedCatalog,
    ledger: &'a mut L,
}

impl<'a, L: OrderLedger> Checkout<'a, L> {
    /// Create a coordinator over the shared catalog and the given ledger.
    pub fn new(catalog: &'a SharedCatalog, ledger: &'a mut L) -> Self {
        Self { catalog, ledger }
    }

    /// Reserve `quantity` units of the titled product into the cart.
    ///
    /// Lookup, reservation check, and stock decrement all run under the
    /// catalog's writer guard, so two sessions can never both pass the
    /// check against the same units.
    pub fn add_to_cart(
        &self,
        cart: &mut Cart,
        title: &str,
        quantity: u32,
    ) -> Result<(), StoreError> {
        let mut catalog = self.catalog.lock();
        let product = catalog.find_mut(title)?;
        cart.add(product, quantity)
    }

    /// Release `quantity` units of the titled line item back to stock.
    ///
    /// The cart reports how many units it freed; restoring them to the
    /// catalog happens here, under the writer guard. Returns the freed
    /// quantity.
    pub fn remove_from_cart(
        &self,
        cart: &mut Cart,
        title: &str,
        quantity: u32,
    ) -> Result<u32, StoreError> {
        let freed = cart.remove(title, quantity)?;
        self.catalog.lock().adjust_stock(title, i64::from(freed))?;
        Ok(freed)
    }

    /// Convert the cart's contents into a permanent order.
    ///
    /// Fails with `EmptyCart` before any other work, and with
    /// `InvalidAddress` when a structural part is missing. The address is
    /// re-checked here even though the presentation layer validates,
    /// since the coordinator may be driven by other callers. Neither
    /// failure performs a ledger write. Stock is not touched: reservation
    /// already happened when the items entered the cart.
    pub fn place_order(
        &mut self,
        cart: &mut Cart,
        customer: &CustomerInfo,
        shipping_address: Address,
        payment_method: Option<PaymentMethod>,
    ) -> Result<Order, StoreError> {
        let view = cart.view()?;
        if view.is_empty() {
            return Err(StoreError::EmptyCart);
        }
        if !shipping_address.is_complete() {
            return Err(StoreError::InvalidAddress(shipping_address.one_line()));
        }

        let order = Order {
            id: OrderId::generate(),
            customer: customer.clone(),
            placed_at: chrono::Local::now().naive_local(),
            line_items: view.lines,
            total: view.total,
            shipping_address,
            payment_method,
        };

        self.ledger.append(&order)?;
        cart.clear();
        tracing::info!(
            order = %order.id,
            user = %order.customer.username,
            total = order.total.amount,
            "order committed"
        );
        Ok(order)
    }
}
