//! The sale being composed.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogCache;
use crate::error::ValidationError;
use crate::ids::ItemId;
use crate::money::Money;
use crate::sale::{LineItemSet, SalePricing};

/// Who the sale is for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Required before submission.
    pub name: String,
    /// Empty when not given.
    pub phone: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }

    pub fn phone(&self) -> Option<&str> {
        let phone = self.phone.trim();
        (!phone.is_empty()).then_some(phone)
    }
}

/// A customer plus the items chosen for them.
///
/// The total is always derived from the line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub customer: Customer,
    items: LineItemSet,
}

impl Sale {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer.name = name.into();
    }

    pub fn set_customer_phone(&mut self, phone: impl Into<String>) {
        self.customer.phone = phone.into();
    }

    /// Add `item_id` from the catalog. Ids missing from the catalog and ids
    /// already in the sale are ignored.
    pub fn add_item(&mut self, catalog: &CatalogCache, item_id: &ItemId) -> bool {
        match catalog.get(item_id) {
            Some(item) => self.items.add(item),
            None => false,
        }
    }

    pub fn set_quantity(&mut self, item_id: &ItemId, quantity: u32) -> bool {
        self.items.set_quantity(item_id, quantity)
    }

    pub fn remove_item(&mut self, item_id: &ItemId) -> bool {
        self.items.remove(item_id)
    }

    pub fn items(&self) -> &LineItemSet {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.items.total()
    }

    pub fn pricing(&self) -> SalePricing {
        SalePricing::calculate(&self.items)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.customer == Customer::default()
    }

    /// Check the preconditions for submission, in order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.customer.name.trim().is_empty() {
            return Err(ValidationError::CustomerNameRequired);
        }
        if self.items.is_empty() {
            return Err(ValidationError::NoItems);
        }
        Ok(())
    }

    /// Back to the initial empty state.
    pub fn clear(&mut self) {
        self.customer = Customer::default();
        self.items.clear();
    }
}
