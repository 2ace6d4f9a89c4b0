//! Catalog module.

mod cache;
mod item;

pub use cache::{CatalogCache, CATALOG_PATH};
pub use item::CatalogItem;
