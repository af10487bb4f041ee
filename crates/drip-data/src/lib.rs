//! File-backed persistence for the store.
//!
//! Two kinds of state live on disk, both as one JSON object per line:
//!
//! - **Order ledger**: one append-only file per user, written through
//!   [`JsonlLedger`]. Every record the ledger writes it can re-parse.
//! - **User directory**: a single file mapping usernames to profiles,
//!   managed by [`UserDirectory`] for the login/account collaborator.
//!
//! Records are parsed with serde, never evaluated, and a malformed line
//! is an error, not something to skip past.

pub mod error;
pub mod ledger;
pub mod users;

pub use error::DataError;
pub use ledger::{JsonlLedger, OrderRecord, RecordItem, DATE_FORMAT};
pub use users::{UserDirectory, UserRecord};
