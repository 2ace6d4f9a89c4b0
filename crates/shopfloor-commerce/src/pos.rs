//! The point-of-sale screen, minus the screen.
//!
//! [`PointOfSale`] owns the catalog cache, the sale being composed and the
//! notifications raised along the way. Everything that talks to the
//! backend goes through the injected client.

use shopfloor_data::{ApiClient, FetchError};

use crate::catalog::CatalogCache;
use crate::checkout::{failure_message, Notification, PendingSale, SALE_RECORDED};
use crate::error::{CommerceError, ValidationError};
use crate::ids::ItemId;
use crate::money::Money;
use crate::sale::{Sale, SalePricing};

/// Shown when the catalog cannot be fetched.
pub const CATALOG_LOAD_FAILED: &str = "could not load catalog";

/// Sale composition state for one operator session.
#[derive(Debug)]
pub struct PointOfSale<C> {
    client: C,
    catalog: CatalogCache,
    sale: Sale,
    notifications: Vec<Notification>,
}

impl<C: ApiClient> PointOfSale<C> {
    /// A screen with an empty catalog and an empty sale.
    pub fn new(client: C) -> Self {
        Self {
            client,
            catalog: CatalogCache::new(),
            sale: Sale::new(),
            notifications: Vec::new(),
        }
    }

    /// Screen entry: load the catalog.
    ///
    /// On failure the catalog is left empty and an error notification is
    /// raised; there is no retry.
    pub async fn enter(&mut self) -> Result<usize, FetchError> {
        match self.catalog.load(&self.client).await {
            Ok(count) => Ok(count),
            Err(e) => {
                self.notify(Notification::error(CATALOG_LOAD_FAILED));
                Err(e)
            }
        }
    }

    pub fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    pub fn sale(&self) -> &Sale {
        &self.sale
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.sale.set_customer_name(name);
    }

    pub fn set_customer_phone(&mut self, phone: impl Into<String>) {
        self.sale.set_customer_phone(phone);
    }

    /// Add a catalog item with quantity 1. No-op if the item is unknown or
    /// already in the sale.
    pub fn add_item(&mut self, item_id: &ItemId) -> bool {
        self.sale.add_item(&self.catalog, item_id)
    }

    pub fn set_quantity(&mut self, item_id: &ItemId, quantity: u32) -> bool {
        self.sale.set_quantity(item_id, quantity)
    }

    pub fn remove_item(&mut self, item_id: &ItemId) -> bool {
        self.sale.remove_item(item_id)
    }

    pub fn total(&self) -> Money {
        self.sale.total()
    }

    pub fn pricing(&self) -> SalePricing {
        self.sale.pricing()
    }

    /// Validate and snapshot the current sale.
    ///
    /// A validation failure raises an error notification and leaves the
    /// sale untouched.
    pub fn prepare_submission(&mut self) -> Result<PendingSale, ValidationError> {
        PendingSale::prepare(&self.sale).map_err(|e| {
            self.notify(Notification::error(e.to_string()));
            e
        })
    }

    /// Apply the outcome of a dispatched submission.
    ///
    /// Success resets the whole sale, including anything changed while the
    /// request was in flight. Failure leaves the sale as it is.
    pub fn complete_submission(
        &mut self,
        outcome: Result<(), FetchError>,
    ) -> Result<(), CommerceError> {
        match outcome {
            Ok(()) => {
                self.sale.clear();
                self.notify(Notification::success(SALE_RECORDED));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "sale submission failed");
                self.notify(Notification::error(failure_message(&e)));
                Err(e.into())
            }
        }
    }

    /// Validate, send and settle the current sale.
    pub async fn submit(&mut self) -> Result<(), CommerceError> {
        let pending = self.prepare_submission()?;
        let outcome = pending.dispatch(&self.client).await;
        self.complete_submission(outcome)
    }

    /// The most recent notification.
    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drain pending notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
