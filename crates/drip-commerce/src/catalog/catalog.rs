//! Catalog collection and shared handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::catalog::Product;
use crate::error::StoreError;
use crate::ids::ProductId;
use crate::money::Money;

/// The list of sellable products and their stock counters.
///
/// Products are kept in insertion order and never deleted. All stock
/// movement goes through [`Catalog::adjust_stock`] or a cart reservation
/// against [`Catalog::find_mut`].
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new product.
    ///
    /// Fails with `DuplicateProduct` if a product with the same title
    /// (case-insensitive) is already present.
    pub fn add_product(
        &mut self,
        title: impl Into<String>,
        unit_price: Money,
        stock_quantity: u32,
    ) -> Result<ProductId, StoreError> {
        let title = title.into();
        if self.products.iter().any(|p| p.title_matches(&title)) {
            return Err(StoreError::DuplicateProduct(title));
        }
        let product = Product::new(title, unit_price, stock_quantity);
        let id = product.id.clone();
        tracing::debug!(title = %product.title, stock = stock_quantity, "product added");
        self.products.push(product);
        Ok(id)
    }

    /// Case-insensitive product lookup.
    pub fn find(&self, title: &str) -> Result<&Product, StoreError> {
        self.products
            .iter()
            .find(|p| p.title_matches(title))
            .ok_or_else(|| StoreError::ProductNotFound(title.to_string()))
    }

    /// Case-insensitive mutable product lookup.
    pub fn find_mut(&mut self, title: &str) -> Result<&mut Product, StoreError> {
        self.products
            .iter_mut()
            .find(|p| p.title_matches(title))
            .ok_or_else(|| StoreError::ProductNotFound(title.to_string()))
    }

    /// Apply a stock delta to a product.
    ///
    /// A delta that would push the stock below zero is a logic error in the
    /// caller: the cart's reservation check must fire first. It is reported
    /// as `InvariantViolation`, never clamped away. Returns the new
    /// quantity.
    pub fn adjust_stock(&mut self, title: &str, delta: i64) -> Result<u32, StoreError> {
        let product = self.find_mut(title)?;
        let updated = i64::from(product.stock_quantity) + delta;
        if updated < 0 {
            tracing::warn!(title = %product.title, delta, "stock adjustment would go negative");
            return Err(StoreError::InvariantViolation(format!(
                "stock of {} would become {} (delta {})",
                product.title, updated, delta
            )));
        }
        product.stock_quantity = u32::try_from(updated).map_err(|_| StoreError::Overflow)?;
        tracing::debug!(title = %product.title, delta, stock = product.stock_quantity, "stock adjusted");
        Ok(product.stock_quantity)
    }

    /// Snapshot of all products in insertion order, for display.
    pub fn list(&self) -> Vec<Product> {
        self.products.clone()
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Shared handle enforcing the single exclusive-writer discipline.
///
/// Every catalog mutation from a session goes through [`SharedCatalog::lock`],
/// so reservation checks and decrements can never interleave. A poisoned
/// lock is recovered rather than propagated: the catalog is consistent at
/// every point a panic could unwind through.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<Mutex<Catalog>>,
}

impl SharedCatalog {
    /// Wrap a catalog for shared use.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(catalog)),
        }
    }

    /// Acquire the exclusive writer guard.
    pub fn lock(&self) -> MutexGuard<'_, Catalog> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all products in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.lock().list()
    }

    /// Apply a stock delta under the writer lock.
    pub fn adjust_stock(&self, title: &str, delta: i64) -> Result<u32, StoreError> {
        self.lock().adjust_stock(title, delta)
    }
}
