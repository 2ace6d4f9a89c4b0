//! Sale pricing breakdown.

use serde::Serialize;

use crate::ids::ItemId;
use crate::money::Money;
use crate::sale::LineItemSet;

/// Pricing for one line of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinePricing {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    /// unit_price × quantity.
    pub subtotal: Money,
}

/// Complete pricing breakdown for a sale.
///
/// A snapshot: computed from the line items on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalePricing {
    pub lines: Vec<LinePricing>,
    pub total: Money,
}

impl SalePricing {
    pub fn calculate(items: &LineItemSet) -> Self {
        let lines: Vec<LinePricing> = items
            .iter()
            .map(|item| LinePricing {
                item_id: item.item_id.clone(),
                name: item.name.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
                subtotal: item.subtotal(),
            })
            .collect();
        let total = lines.iter().map(|l| l.subtotal).sum();
        Self { lines, total }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
