//! Product catalog module.
//!
//! Contains the product type, the catalog collection, and the shared
//! exclusive-writer handle sessions go through.

mod catalog;
mod product;

pub use catalog::{Catalog, SharedCatalog};
pub use product::Product;
