//! Checkout module.
//!
//! Contains the shipping address, order types, and the coordinator that
//! moves stock in and out of carts and converts a cart into a committed
//! order.

mod address;
mod coordinator;
mod order;

pub use address::Address;
pub use coordinator::Checkout;
pub use order::{CustomerInfo, Order, PaymentMethod};
