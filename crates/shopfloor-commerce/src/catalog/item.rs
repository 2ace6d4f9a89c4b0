//! Catalog item type.

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;
use crate::money::Money;

/// A sellable item as served by `GET /productos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub unit_price: Money,
}

impl CatalogItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
        }
    }
}
