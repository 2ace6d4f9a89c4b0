//! Sale submission.
//!
//! Submitting is split in two so the snapshot point is explicit: a
//! [`PendingSale`] captures the sale when it is prepared, and what gets
//! dispatched is that snapshot, whatever happens to the live sale while the
//! request is in flight.

use shopfloor_data::{ApiClient, ApiClientExt, FetchError};

use crate::checkout::SalePayload;
use crate::error::ValidationError;
use crate::sale::Sale;

/// Sales path on the backend.
pub const SALES_PATH: &str = "/ventas";

/// Shown after a sale is recorded.
pub const SALE_RECORDED: &str = "sale recorded";

/// Shown when a submission fails and the server gave no message.
pub const SALE_FAILED: &str = "could not record the sale";

/// A validated snapshot of a sale, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSale {
    payload: SalePayload,
}

impl PendingSale {
    /// Validate `sale` and snapshot it.
    pub fn prepare(sale: &Sale) -> Result<Self, ValidationError> {
        sale.validate()?;
        Ok(Self {
            payload: SalePayload::from(sale),
        })
    }

    pub fn payload(&self) -> &SalePayload {
        &self.payload
    }

    /// Send the snapshot as a creation request.
    ///
    /// No idempotency key is attached: dispatching the same snapshot twice
    /// records two sales.
    pub async fn dispatch<C>(&self, client: &C) -> Result<(), FetchError>
    where
        C: ApiClient + ?Sized,
    {
        tracing::info!(
            lines = self.payload.items.len(),
            total = %self.payload.total,
            "submitting sale"
        );
        client.post(SALES_PATH, &self.payload).await?;
        Ok(())
    }
}

/// Best message for a failed submission: the server's, else a fallback.
pub fn failure_message(error: &FetchError) -> String {
    error
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(|| SALE_FAILED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogCache, CatalogItem};
    use crate::ids::ItemId;
    use crate::money::Money;
    use serde_json::json;
    use shopfloor_data::{FakeClient, Method};

    fn ready_sale() -> Sale {
        let catalog = CatalogCache::from_items(vec![CatalogItem::new(
            1_i64,
            "Widget",
            Money::from_cents(1000),
        )]);
        let mut sale = Sale::new();
        sale.set_customer_name("Ana");
        sale.add_item(&catalog, &ItemId::Int(1));
        sale
    }

    #[test]
    fn test_prepare_validates() {
        assert_eq!(
            PendingSale::prepare(&Sale::new()),
            Err(ValidationError::CustomerNameRequired)
        );
        assert!(PendingSale::prepare(&ready_sale()).is_ok());
    }

    #[test]
    fn test_snapshot_ignores_later_changes() {
        let mut sale = ready_sale();
        let pending = PendingSale::prepare(&sale).unwrap();
        sale.set_quantity(&ItemId::Int(1), 5);
        sale.set_customer_name("Luis");

        assert_eq!(pending.payload().items[0].quantity, 1);
        assert_eq!(pending.payload().customer.name, "Ana");
        assert_eq!(pending.payload().total, Money::from_cents(1000));
    }

    #[tokio::test]
    async fn test_dispatch_posts_payload() {
        let fake = FakeClient::new();
        fake.reply_json(Method::Post, SALES_PATH, 201, json!({"id": 10}));

        let pending = PendingSale::prepare(&ready_sale()).unwrap();
        pending.dispatch(&fake).await.unwrap();

        let sent: SalePayload = fake.last_request().unwrap().json_body().unwrap();
        assert_eq!(&sent, pending.payload());
    }

    #[test]
    fn test_failure_message() {
        let err = FetchError::HttpError {
            status: 500,
            message: Some("server error".to_string()),
        };
        assert_eq!(failure_message(&err), "server error");

        let err = FetchError::RequestError("timed out".to_string());
        assert_eq!(failure_message(&err), SALE_FAILED);
    }
}
