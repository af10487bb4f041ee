//! Store configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the storefront, loaded from a TOML or JSON file.
///
/// Every section has defaults, so a missing or partial file still yields
/// a working store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store identity.
    #[serde(default)]
    pub store: StoreSection,

    /// Data directory settings.
    #[serde(default)]
    pub data: DataSection,

    /// Products seeded into the catalog at startup.
    #[serde(default = "default_products")]
    pub products: Vec<SeedProduct>,
}

impl StoreConfig {
    /// Read a config file, picking the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let parsed = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };
        Ok(parsed)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store: StoreSection::default(),
            data: DataSection::default(),
            products: default_products(),
        }
    }
}

/// Store identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    /// Store display name.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Currency code for all prices.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            currency: default_currency(),
        }
    }
}

/// Data directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSection {
    /// Directory holding the user directory and ledger files.
    #[serde(default = "default_data_dir")]
    pub dir: String,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

/// A product seeded into the catalog at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedProduct {
    /// Product title.
    pub title: String,
    /// Unit price in minor currency units.
    pub price: i64,
    /// Initial stock.
    pub stock: u32,
}

fn default_store_name() -> String {
    "Super Store".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_data_dir() -> String {
    "database".to_string()
}

fn default_products() -> Vec<SeedProduct> {
    [
        ("Hoodie", 9999, 10),
        ("T-shirt", 4499, 20),
        ("Pendant-chain", 7499, 15),
        ("Bandana", 2499, 25),
        ("Cap", 1499, 12),
        ("Rings", 3499, 30),
        ("Earrings", 1099, 35),
        ("Gucci-Belt", 14499, 7),
        ("Leather-Jacket", 14999, 5),
        ("Ripped-Jeans", 4999, 6),
    ]
    .into_iter()
    .map(|(title, price, stock)| SeedProduct {
        title: title.to_string(),
        price,
        stock,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_seed_the_full_catalog() {
        let config = StoreConfig::default();
        assert_eq!(config.store.currency, "INR");
        assert_eq!(config.data.dir, "database");
        assert_eq!(config.products.len(), 10);
        assert!(config.products.iter().any(|p| p.title == "Cap" && p.price == 1499));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let parsed: StoreConfig = toml::from_str("[store]\nname = \"Corner Shop\"\n").unwrap();
        assert_eq!(parsed.store.name, "Corner Shop");
        assert_eq!(parsed.store.currency, "INR");
        assert_eq!(parsed.products.len(), 10);
    }
}
