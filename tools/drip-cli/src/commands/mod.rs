//! CLI command implementations.

pub mod history;
pub mod products;
pub mod shop;

use clap::Args;

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Skip the welcome banner.
    #[arg(long)]
    pub no_banner: bool,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {}

/// Arguments for the history command.
#[derive(Args)]
pub struct HistoryArgs {
    /// Username whose purchase history to show.
    pub username: String,
}
