//! Sale composition module.
//!
//! Contains the line-item set, the sale it belongs to, and pricing.

mod line_items;
mod pricing;
#[allow(clippy::module_inception)]
mod sale;

pub use line_items::{LineItem, LineItemSet, QUANTITY_CHOICES};
pub use pricing::{LinePricing, SalePricing};
pub use sale::{Customer, Sale};
