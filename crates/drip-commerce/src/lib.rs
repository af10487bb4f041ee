//! Domain types and logic for a single-store retail simulator.
//!
//! This crate is the inventory-and-cart consistency engine:
//!
//! - **Catalog**: sellable products and their stock counters
//! - **Cart**: per-user staging area of reserved line items
//! - **Checkout**: the atomic cart-to-order transition
//! - **Ledger**: append-only record of committed orders per user
//!
//! Stock is reserved the moment an item enters a cart, returned when it
//! leaves, and committed for good when checkout appends the order to the
//! ledger. Stock never goes negative; an operation that would make it so
//! fails before anything is mutated.
//!
//! # Example
//!
//! ```rust
//! use drip_commerce::prelude::*;
//!
//! let mut catalog = Catalog::new();
//! catalog.add_product("Cap", Money::new(1499, Currency::INR), 12).unwrap();
//! let catalog = SharedCatalog::new(catalog);
//!
//! let mut ledger = MemoryLedger::new();
//! let mut cart = Cart::new();
//! let mut checkout = Checkout::new(&catalog, &mut ledger);
//!
//! checkout.add_to_cart(&mut cart, "Cap", 5).unwrap();
//!
//! let customer = CustomerInfo::new("maya01", "Maya", "Iyer");
//! let address = Address::new("12 Hill Rd", "Old Clock Tower", "Pune", "MH");
//! let order = checkout
//!     .place_order(&mut cart, &customer, address, None)
//!     .unwrap();
//!
//! assert!(cart.is_empty());
//! assert_eq!(order.total, Money::new(7495, Currency::INR));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod ledger;

pub use error::StoreError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::StoreError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Product, SharedCatalog};

    // Cart
    pub use crate::cart::{Cart, CartView, LineItem};

    // Checkout
    pub use crate::checkout::{Address, Checkout, CustomerInfo, Order, PaymentMethod};

    // Ledger
    pub use crate::ledger::{MemoryLedger, OrderLedger};
}
