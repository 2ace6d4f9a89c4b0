//! Catalog listing.

use anyhow::{Context as _, Result};
use shopfloor_commerce::catalog::CatalogCache;

use super::CatalogArgs;
use crate::context::Context;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let client = ctx.session_client()?;
    let mut catalog = CatalogCache::new();

    let spinner = ctx.output.spinner("Loading catalog...");
    let result = catalog.load(&client).await;
    spinner.finish_and_clear();
    result.context("Could not load catalog")?;

    let needle = args.filter.map(|f| f.to_lowercase());
    let items: Vec<_> = catalog
        .items()
        .iter()
        .filter(|item| match &needle {
            Some(needle) => item.name.to_lowercase().contains(needle),
            None => true,
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header(&format!("Catalog ({} items)", items.len()));
    let widths = [8, 32, 12];
    ctx.output.table_header(&["ID", "NAME", "PRICE"], &widths);
    for item in items {
        ctx.output.table_row(
            &[
                &item.id.to_string(),
                &item.name,
                &item.unit_price.to_string(),
            ],
            &widths,
        );
    }

    Ok(())
}
