//! Store error types.

use thiserror::Error;

/// Errors that can occur in store operations.
///
/// All variants are recoverable at the call site; presentation layers catch
/// them and re-prompt or display a message. `InvariantViolation` is the one
/// exception in spirit: it reports a caller bug (state that the reservation
/// checks should have made unreachable), never user error.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A product with the same title already exists.
    #[error("Product already in catalog: {0}")]
    DuplicateProduct(String),

    /// Not enough stock to reserve the requested quantity.
    #[error("Insufficient stock for {title}: requested {requested}, available {available}")]
    InsufficientStock {
        title: String,
        requested: u32,
        available: u32,
    },

    /// Item not in the cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// The cart holds fewer units than the removal asked for.
    #[error("Cart holds too little of {title}: requested {requested}, available {available}")]
    InsufficientCartQuantity {
        title: String,
        requested: u32,
        available: u32,
    },

    /// Checkout attempted on an empty cart.
    #[error("Cart is empty, nothing to checkout")]
    EmptyCart,

    /// Shipping address is empty or missing structural parts.
    #[error("Invalid shipping address: {0}")]
    InvalidAddress(String),

    /// Quantity must be a positive integer.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Stock accounting would go negative. Indicates a bug in the caller,
    /// not user error: the reservation checks must prevent this path.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Arithmetic overflow in a money or stock calculation.
    #[error("Arithmetic overflow in store calculation")]
    Overflow,

    /// The durable ledger write failed; the checkout is not committed.
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),
}
