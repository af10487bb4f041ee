//! Catalog listing.

use anyhow::Result;
use drip_commerce::catalog::Product;

use super::ProductsArgs;
use crate::context::Context;
use crate::output::Output;

/// Run the products command.
pub fn run(_args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let products = catalog.list();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output
        .header(&format!("Products of {}", ctx.config.store.name));
    render_table(&products, &ctx.output);
    Ok(())
}

/// Render the catalog as a table.
pub fn render_table(products: &[Product], output: &Output) {
    if products.is_empty() {
        output.warn("No products available.");
        return;
    }

    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|product| {
            vec![
                product.title.clone(),
                product.unit_price.to_string(),
                product.stock_quantity.to_string(),
            ]
        })
        .collect();
    output.table(&["TITLE", "PRICE", "STOCK"], &rows);
}
