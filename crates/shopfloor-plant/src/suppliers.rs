//! Supplier records.
//!
//! A thin CRUD service over `/proveedores`. The only local rule is that a
//! supplier has a name; everything else is free text the backend stores
//! as given.

use serde::{Deserialize, Serialize};
use shopfloor_commerce::SupplierId;
use shopfloor_data::{ApiClient, ApiClientExt};

use crate::error::{FormError, PlantError};
use crate::wire::null_as_empty;

/// Suppliers path on the backend.
pub const SUPPLIERS_PATH: &str = "/proveedores";

/// Shown when saving a supplier fails and the server gave no message.
pub const SUPPLIER_SAVE_FAILED: &str = "could not save supplier";

/// Shown when deleting a supplier fails and the server gave no message.
pub const SUPPLIER_DELETE_FAILED: &str = "could not delete supplier";

/// Editable supplier fields, as sent on create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierForm {
    #[serde(rename = "nombre", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "contacto", default, deserialize_with = "null_as_empty")]
    pub contact: String,
    #[serde(rename = "telefono", default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(rename = "correo", default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(rename = "direccion", default, deserialize_with = "null_as_empty")]
    pub address: String,
}

impl SupplierForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = contact.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::SupplierNameRequired);
        }
        Ok(())
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            contact: self.contact.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }
}

/// A stored supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    #[serde(flatten)]
    pub details: SupplierForm,
}

#[derive(Deserialize)]
struct Created {
    id: SupplierId,
}

/// Find a supplier by id as typed by an operator, whether the backend
/// serves that id as a number or a string.
pub fn find_supplier<'a>(suppliers: &'a [Supplier], input: &str) -> Option<&'a Supplier> {
    let input = input.trim();
    suppliers.iter().find(|s| s.id.to_string() == input)
}

fn supplier_path(id: &SupplierId) -> String {
    format!("{}/{}", SUPPLIERS_PATH, id.to_path_segment())
}

/// Supplier CRUD over an injected client.
#[derive(Debug, Clone)]
pub struct SupplierService<C> {
    client: C,
}

impl<C: ApiClient> SupplierService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn list(&self) -> Result<Vec<Supplier>, PlantError> {
        let suppliers: Vec<Supplier> = self.client.get(SUPPLIERS_PATH).await?;
        tracing::debug!(count = suppliers.len(), "suppliers loaded");
        Ok(suppliers)
    }

    pub async fn get(&self, id: &SupplierId) -> Result<Supplier, PlantError> {
        Ok(self.client.get(&supplier_path(id)).await?)
    }

    /// Create a supplier. Returns the new id when the backend reports one.
    pub async fn create(&self, form: &SupplierForm) -> Result<Option<SupplierId>, PlantError> {
        form.validate()?;
        let response = self.client.post(SUPPLIERS_PATH, &form.trimmed()).await?;
        let id = response.json::<Created>().ok().map(|created| created.id);
        tracing::info!(id = ?id, "supplier created");
        Ok(id)
    }

    pub async fn update(&self, id: &SupplierId, form: &SupplierForm) -> Result<(), PlantError> {
        form.validate()?;
        self.client.put(&supplier_path(id), &form.trimmed()).await?;
        tracing::info!(%id, "supplier updated");
        Ok(())
    }

    pub async fn delete(&self, id: &SupplierId) -> Result<(), PlantError> {
        self.client.delete(&supplier_path(id)).await?;
        tracing::info!(%id, "supplier deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shopfloor_data::{FakeClient, Method};

    #[test]
    fn test_wire_names() {
        let form = SupplierForm::new("Aceros del Norte")
            .with_contact("Rosa")
            .with_phone("555-0101")
            .with_email("ventas@aceros.mx")
            .with_address("Calle 5");
        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            json!({
                "nombre": "Aceros del Norte",
                "contacto": "Rosa",
                "telefono": "555-0101",
                "correo": "ventas@aceros.mx",
                "direccion": "Calle 5"
            })
        );
    }

    #[test]
    fn test_nulls_and_missing_fields_become_empty() {
        let supplier: Supplier = serde_json::from_value(json!({
            "id": 4,
            "nombre": "Tornillos SA",
            "contacto": null
        }))
        .unwrap();
        assert_eq!(supplier.id, SupplierId::Int(4));
        assert_eq!(supplier.details.name, "Tornillos SA");
        assert_eq!(supplier.details.contact, "");
        assert_eq!(supplier.details.address, "");
    }

    #[test]
    fn test_find_supplier_with_text_ids() {
        let suppliers: Vec<Supplier> = serde_json::from_value(json!([
            {"id": "12", "nombre": "Aceros"},
            {"id": 3, "nombre": "Tornillos"}
        ]))
        .unwrap();

        let found = find_supplier(&suppliers, "12").unwrap();
        assert_eq!(found.id, SupplierId::Text("12".to_string()));
        assert_eq!(find_supplier(&suppliers, " 3").unwrap().details.name, "Tornillos");
        assert!(find_supplier(&suppliers, "4").is_none());
    }

    #[test]
    fn test_name_required() {
        assert_eq!(
            SupplierForm::new("  ").validate(),
            Err(FormError::SupplierNameRequired)
        );
        assert!(SupplierForm::new("x").validate().is_ok());
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let fake = FakeClient::new();
        let service = SupplierService::new(&fake);

        let err = service.create(&SupplierForm::default()).await.unwrap_err();
        assert!(err.is_form());
        assert_eq!(fake.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_returns_new_id() {
        let fake = FakeClient::new();
        fake.reply_json(Method::Post, SUPPLIERS_PATH, 201, json!({"id": 12}));
        let service = SupplierService::new(&fake);

        let id = service.create(&SupplierForm::new(" Rosa ")).await.unwrap();
        assert_eq!(id, Some(SupplierId::Int(12)));

        let sent: SupplierForm = fake.last_request().unwrap().json_body().unwrap();
        assert_eq!(sent.name, "Rosa");
    }

    #[tokio::test]
    async fn test_create_without_id_in_reply() {
        let fake = FakeClient::new();
        fake.reply_json(Method::Post, SUPPLIERS_PATH, 201, json!({"ok": true}));
        let service = SupplierService::new(&fake);

        assert_eq!(service.create(&SupplierForm::new("Rosa")).await.unwrap(), None);
    }
}
