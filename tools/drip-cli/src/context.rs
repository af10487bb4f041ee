//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};
use drip_commerce::catalog::{Catalog, SharedCatalog};
use drip_commerce::{Currency, Money};
use drip_data::{JsonlLedger, UserDirectory};

use crate::config::StoreConfig;
use crate::output::Output;

/// File names probed when no `--config` is given, from the working
/// directory upward.
const CONFIG_NAMES: [&str; 3] = ["store.toml", ".drip.toml", "store.json"];

/// Everything a command needs: configuration, output, and constructors
/// for the engine's collaborators.
pub struct Context {
    /// Store configuration.
    pub config: StoreConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Build the context, loading the given config file or discovering one.
    pub fn load(config_path: Option<&Path>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = match config_path {
            Some(path) => StoreConfig::load(path)?,
            None => discover_config(&cwd).unwrap_or_default(),
        };

        Ok(Self { config, output, cwd })
    }

    /// The store currency from config.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.config.store.currency)
            .ok_or_else(|| anyhow!("Unknown currency code: {}", self.config.store.currency))
    }

    /// The data directory, resolved against the working directory.
    pub fn data_dir(&self) -> PathBuf {
        let dir = PathBuf::from(&self.config.data.dir);
        if dir.is_absolute() {
            dir
        } else {
            self.cwd.join(dir)
        }
    }

    /// Build the catalog from the configured seed products.
    pub fn catalog(&self) -> Result<SharedCatalog> {
        let currency = self.currency()?;
        let mut catalog = Catalog::new();
        for product in &self.config.products {
            catalog
                .add_product(
                    product.title.as_str(),
                    Money::new(product.price, currency),
                    product.stock,
                )
                .with_context(|| format!("Failed to seed product: {}", product.title))?;
        }
        Ok(SharedCatalog::new(catalog))
    }

    /// Open the order ledger under the data directory.
    pub fn ledger(&self) -> Result<JsonlLedger> {
        JsonlLedger::open(self.data_dir(), self.currency()?)
            .context("Failed to open the order ledger")
    }

    /// Open the user directory under the data directory.
    pub fn users(&self) -> Result<UserDirectory> {
        UserDirectory::open(self.data_dir()).context("Failed to open the user directory")
    }
}

/// Walk from `start` to the filesystem root looking for a config file.
fn discover_config(start: &Path) -> Option<StoreConfig> {
    start
        .ancestors()
        .flat_map(|dir| CONFIG_NAMES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
        .and_then(|path| StoreConfig::load(&path).ok())
}
