//! Line items and the ordered line-item set.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::catalog::CatalogItem;
use crate::ids::ItemId;
use crate::money::Money;

/// Quantities offered by the quantity picker.
pub const QUANTITY_CHOICES: RangeInclusive<u32> = 1..=10;

/// One catalog item within a sale.
///
/// Name and price are copied from the catalog when the item is added and
/// do not follow later catalog reloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl LineItem {
    /// A fresh line for `item` with quantity 1.
    pub fn from_catalog(item: &CatalogItem) -> Self {
        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: 1,
        }
    }

    /// unit_price × quantity.
    pub fn subtotal(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// The items chosen for the current sale, in the order they were added.
///
/// Holds at most one line per item id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemSet {
    items: Vec<LineItem>,
}

impl LineItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` with quantity 1.
    ///
    /// If the item is already in the set nothing changes; the existing
    /// quantity is kept. Returns whether a line was added.
    pub fn add(&mut self, item: &CatalogItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(LineItem::from_catalog(item));
        true
    }

    /// Overwrite the quantity of an existing line.
    ///
    /// Unknown ids and a zero quantity are ignored. Returns whether a line
    /// was updated.
    pub fn set_quantity(&mut self, item_id: &ItemId, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        match self.items.iter_mut().find(|i| &i.item_id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove the line for `item_id`. Returns whether a line was removed.
    pub fn remove(&mut self, item_id: &ItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.item_id != item_id);
        self.items.len() < len_before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, item_id: &ItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.item_id == item_id)
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.get(item_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Σ unit_price × quantity.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }
}

impl<'a> IntoIterator for &'a LineItemSet {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
