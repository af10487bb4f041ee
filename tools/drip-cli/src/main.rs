//! Drip CLI - the storefront for the drip store.
//!
//! Commands:
//! - `drip shop` - Interactive shopping session (login, cart, checkout)
//! - `drip products` - List the catalog
//! - `drip history` - Show a user's purchase history

mod commands;
mod config;
mod context;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::{HistoryArgs, ProductsArgs, ShopArgs};
use context::Context;
use output::Output;

/// Drip CLI - Browse, shop, and check out from the terminal
#[derive(Parser)]
#[command(name = "drip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive shopping session
    Shop(ShopArgs),

    /// List the products in the catalog
    Products(ProductsArgs),

    /// Show a user's purchase history
    History(HistoryArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new(cli.verbose, cli.json);

    let ctx = match Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Shop(args) => commands::shop::run(args, &ctx),
        Commands::Products(args) => commands::products::run(args, &ctx),
        Commands::History(args) => commands::history::run(args, &ctx),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
