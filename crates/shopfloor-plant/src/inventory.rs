//! Inventory entries: goods received into the plant.
//!
//! CRUD over `/entradas-inventario`. An entry names the product as free
//! text and may or may not be tied to a supplier.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shopfloor_commerce::{EntryId, SupplierId};
use shopfloor_data::{ApiClient, ApiClientExt};

use crate::error::{FormError, PlantError};
use crate::wire::{null_as_empty, null_as_zero, optional_date};

/// Inventory entries path on the backend.
pub const INVENTORY_PATH: &str = "/entradas-inventario";

pub const ENTRY_SAVE_FAILED: &str = "could not save the inventory entry";
pub const ENTRY_DELETE_FAILED: &str = "could not delete the inventory entry";

/// Editable entry fields, as sent on create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntryForm {
    #[serde(rename = "proveedor_id", default)]
    pub supplier_id: Option<SupplierId>,
    #[serde(rename = "producto_nombre", default, deserialize_with = "null_as_empty")]
    pub product_name: String,
    #[serde(rename = "cantidad", default, deserialize_with = "null_as_zero")]
    pub quantity: u32,
    #[serde(rename = "fecha_entrada", default, with = "optional_date")]
    pub received_on: Option<NaiveDate>,
    #[serde(rename = "comentarios", default, deserialize_with = "null_as_empty")]
    pub comments: String,
}

impl InventoryEntryForm {
    /// A new entry dated `received_on`, usually today.
    pub fn new(product_name: impl Into<String>, quantity: u32, received_on: NaiveDate) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            received_on: Some(received_on),
            ..Self::default()
        }
    }

    pub fn with_supplier(mut self, supplier_id: SupplierId) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.product_name.trim().is_empty() {
            return Err(FormError::ProductRequired);
        }
        if self.quantity == 0 {
            return Err(FormError::QuantityRequired);
        }
        if self.received_on.is_none() {
            return Err(FormError::DateRequired);
        }
        Ok(())
    }

    pub fn trimmed(&self) -> Self {
        Self {
            supplier_id: self.supplier_id.clone(),
            product_name: self.product_name.trim().to_string(),
            quantity: self.quantity,
            received_on: self.received_on,
            comments: self.comments.trim().to_string(),
        }
    }
}

/// A stored inventory entry. `supplier_name` is filled in by the backend
/// and never sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub id: EntryId,
    #[serde(rename = "proveedor_nombre", default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(flatten)]
    pub details: InventoryEntryForm,
}

#[derive(Deserialize)]
struct Created {
    id: EntryId,
}

fn entry_path(id: &EntryId) -> String {
    format!("{}/{}", INVENTORY_PATH, id.to_path_segment())
}

/// Inventory entry CRUD over an injected client.
#[derive(Debug, Clone)]
pub struct InventoryService<C> {
    client: C,
}

impl<C: ApiClient> InventoryService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn list(&self) -> Result<Vec<InventoryEntry>, PlantError> {
        let entries: Vec<InventoryEntry> = self.client.get(INVENTORY_PATH).await?;
        tracing::debug!(count = entries.len(), "inventory entries loaded");
        Ok(entries)
    }

    pub async fn get(&self, id: &EntryId) -> Result<InventoryEntry, PlantError> {
        Ok(self.client.get(&entry_path(id)).await?)
    }

    /// Record an entry. Returns the new id when the backend reports one.
    pub async fn create(&self, form: &InventoryEntryForm) -> Result<Option<EntryId>, PlantError> {
        form.validate()?;
        let response = self.client.post(INVENTORY_PATH, &form.trimmed()).await?;
        let id = response.json::<Created>().ok().map(|created| created.id);
        tracing::info!(id = ?id, product = %form.product_name.trim(), "inventory entry created");
        Ok(id)
    }

    pub async fn update(&self, id: &EntryId, form: &InventoryEntryForm) -> Result<(), PlantError> {
        form.validate()?;
        self.client.put(&entry_path(id), &form.trimmed()).await?;
        tracing::info!(%id, "inventory entry updated");
        Ok(())
    }

    pub async fn delete(&self, id: &EntryId) -> Result<(), PlantError> {
        self.client.delete(&entry_path(id)).await?;
        tracing::info!(%id, "inventory entry deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shopfloor_data::{FakeClient, Method};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_wire_names() {
        let form = InventoryEntryForm::new("Lámina 2mm", 40, day())
            .with_supplier(SupplierId::Int(3))
            .with_comments("tarima 2");
        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            json!({
                "proveedor_id": 3,
                "producto_nombre": "Lámina 2mm",
                "cantidad": 40,
                "fecha_entrada": "2024-03-09",
                "comentarios": "tarima 2"
            })
        );
    }

    #[test]
    fn test_no_supplier_is_sent_as_null() {
        let json = serde_json::to_value(InventoryEntryForm::new("Tuerca", 1, day())).unwrap();
        assert_eq!(json["proveedor_id"], serde_json::Value::Null);
    }

    #[test]
    fn test_stored_entry_with_timestamp_date() {
        let entry: InventoryEntry = serde_json::from_value(json!({
            "id": 8,
            "proveedor_id": null,
            "proveedor_nombre": "Aceros",
            "producto_nombre": "Lámina",
            "cantidad": 5,
            "fecha_entrada": "2024-03-09T00:00:00.000Z",
            "comentarios": null
        }))
        .unwrap();
        assert_eq!(entry.id, EntryId::Int(8));
        assert_eq!(entry.supplier_name.as_deref(), Some("Aceros"));
        assert_eq!(entry.details.received_on, Some(day()));
        assert_eq!(entry.details.comments, "");
    }

    #[test]
    fn test_validation_order() {
        let form = InventoryEntryForm::default();
        assert_eq!(form.validate(), Err(FormError::ProductRequired));

        let form = InventoryEntryForm::new("Tuerca", 0, day());
        assert_eq!(form.validate(), Err(FormError::QuantityRequired));

        let form = InventoryEntryForm {
            received_on: None,
            ..InventoryEntryForm::new("Tuerca", 2, day())
        };
        assert_eq!(form.validate(), Err(FormError::DateRequired));
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let fake = FakeClient::new();
        let service = InventoryService::new(&fake);

        let err = service.create(&InventoryEntryForm::default()).await.unwrap_err();
        assert!(err.is_form());
        assert_eq!(fake.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_trims_and_returns_id() {
        let fake = FakeClient::new();
        fake.reply_json(Method::Post, INVENTORY_PATH, 201, json!({"id": "e-1"}));
        let service = InventoryService::new(&fake);

        let form = InventoryEntryForm::new("  Tuerca ", 3, day());
        let id = service.create(&form).await.unwrap();
        assert_eq!(id, Some(EntryId::Text("e-1".to_string())));

        let sent: InventoryEntryForm = fake.last_request().unwrap().json_body().unwrap();
        assert_eq!(sent.product_name, "Tuerca");
    }
}
