//! Shopping cart module.
//!
//! Contains the cart, its line items, and the display view.

mod cart;

pub use cart::{Cart, CartView, LineItem};
