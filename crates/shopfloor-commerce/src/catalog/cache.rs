//! Per-session catalog cache.

use shopfloor_data::{ApiClient, ApiClientExt, FetchError};

use crate::catalog::CatalogItem;
use crate::ids::ItemId;

/// Catalog path on the backend.
pub const CATALOG_PATH: &str = "/productos";

/// Sellable items, fetched once when the sale screen opens.
///
/// Contents are replaced wholesale on every load. A failed load leaves the
/// cache empty rather than holding on to older data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogCache {
    items: Vec<CatalogItem>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache from already-fetched items.
    pub fn from_items(items: Vec<CatalogItem>) -> Self {
        let mut cache = Self::new();
        cache.replace(items);
        cache
    }

    /// Fetch the catalog and replace the cached items.
    pub async fn load<C>(&mut self, client: &C) -> Result<usize, FetchError>
    where
        C: ApiClient + ?Sized,
    {
        match client.get::<Vec<CatalogItem>>(CATALOG_PATH).await {
            Ok(items) => {
                self.replace(items);
                tracing::info!(items = self.items.len(), "catalog loaded");
                Ok(self.items.len())
            }
            Err(e) => {
                self.items.clear();
                tracing::warn!(error = %e, "catalog load failed");
                Err(e)
            }
        }
    }

    /// Items with a negative price or an id already seen are dropped.
    fn replace(&mut self, items: Vec<CatalogItem>) {
        self.items.clear();
        for item in items {
            if item.unit_price.is_negative() {
                tracing::warn!(id = %item.id, "skipping catalog item with negative price");
                continue;
            }
            if self.get(&item.id).is_some() {
                tracing::warn!(id = %item.id, "skipping duplicate catalog item");
                continue;
            }
            self.items.push(item);
        }
    }

    pub fn get(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Look up an item by id as typed by a user, regardless of whether the
    /// backend serves that id as a number or a string.
    pub fn find_by_input(&self, input: &str) -> Option<&CatalogItem> {
        let input = input.trim();
        self.items.iter().find(|i| i.id.to_string() == input)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use serde_json::json;
    use shopfloor_data::{FakeClient, Method};

    #[tokio::test]
    async fn test_load_replaces_items() {
        let fake = FakeClient::new();
        fake.reply_json(
            Method::Get,
            CATALOG_PATH,
            200,
            json!([
                {"id": 1, "nombre": "Widget", "precio": 10.0},
                {"id": 2, "nombre": "Gadget", "precio": "2.50"}
            ]),
        );

        let mut cache = CatalogCache::from_items(vec![CatalogItem::new(
            9_i64,
            "Old",
            Money::from_cents(1),
        )]);
        assert_eq!(cache.load(&fake).await.unwrap(), 2);
        assert!(cache.get(&ItemId::Int(9)).is_none());
        assert_eq!(
            cache.get(&ItemId::Int(2)).unwrap().unit_price,
            Money::from_cents(250)
        );
    }

    #[tokio::test]
    async fn test_failed_load_leaves_cache_empty() {
        let fake = FakeClient::new();
        fake.reply_json(
            Method::Get,
            CATALOG_PATH,
            200,
            json!([{"id": 1, "nombre": "Widget", "precio": 10.0}]),
        )
        .reply_json(Method::Get, CATALOG_PATH, 500, json!({}));

        let mut cache = CatalogCache::new();
        cache.load(&fake).await.unwrap();
        assert_eq!(cache.len(), 1);

        assert!(cache.load(&fake).await.is_err());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_error() {
        let fake = FakeClient::new();
        fake.reply_json(Method::Get, CATALOG_PATH, 200, json!({"not": "a list"}));

        let mut cache = CatalogCache::new();
        assert!(matches!(
            cache.load(&fake).await,
            Err(FetchError::ParseError(_))
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_replace_drops_invalid_items() {
        let cache = CatalogCache::from_items(vec![
            CatalogItem::new(1_i64, "A", Money::from_cents(100)),
            CatalogItem::new(1_i64, "A again", Money::from_cents(200)),
            CatalogItem::new(2_i64, "Refund", Money::from_cents(-5)),
        ]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.items()[0].name, "A");
    }

    #[test]
    fn test_find_by_input() {
        let cache = CatalogCache::from_items(vec![
            CatalogItem::new(7_i64, "Int id", Money::zero()),
            CatalogItem::new("x-1".to_string(), "Text id", Money::zero()),
        ]);
        assert_eq!(cache.find_by_input(" 7 ").unwrap().name, "Int id");
        assert_eq!(cache.find_by_input("x-1").unwrap().name, "Text id");
        assert!(cache.find_by_input("8").is_none());
    }

    #[test]
    fn test_find_by_input_with_numeric_text_id() {
        let items: Vec<CatalogItem> =
            serde_json::from_value(json!([{"id": "12", "nombre": "Widget", "precio": "10.00"}]))
                .unwrap();
        let cache = CatalogCache::from_items(items);

        assert!(cache.get(&ItemId::parse("12")).is_none());
        let found = cache.find_by_input("12").unwrap();
        assert_eq!(found.name, "Widget");
        assert_eq!(found.id, ItemId::Text("12".to_string()));
    }
}
