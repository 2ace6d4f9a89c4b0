//! Sale composition for the shopfloor console.
//!
//! This crate provides the point-of-sale core:
//!
//! - **Catalog**: sellable items, fetched once per session
//! - **Sale**: customer, ordered line items, derived total
//! - **Checkout**: validation, the `POST /ventas` payload, notifications
//! - **PointOfSale**: the screen state tying the three together
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfloor_commerce::prelude::*;
//! use shopfloor_data::HttpClient;
//!
//! let mut pos = PointOfSale::new(HttpClient::new("http://localhost:3001/api"));
//! pos.enter().await?;
//! pos.set_customer_name("Ana");
//! pos.add_item(&ItemId::Int(1));
//! pos.set_quantity(&ItemId::Int(1), 3);
//! println!("Total: {}", pos.total());
//! pos.submit().await?;
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod checkout;
pub mod pos;
pub mod sale;

pub use error::{CommerceError, ValidationError};
pub use ids::*;
pub use money::Money;
pub use pos::PointOfSale;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, ValidationError};
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{CatalogCache, CatalogItem};

    // Sale
    pub use crate::sale::{Customer, LineItem, LineItemSet, LinePricing, Sale, SalePricing};

    // Checkout
    pub use crate::checkout::{Notification, NotificationKind, PendingSale, SalePayload};

    pub use crate::pos::PointOfSale;
}
