//! Delivery estimates: when a supplier expects to deliver what.
//!
//! CRUD over `/estimados`, plus the per-supplier listing at
//! `/proveedores/{id}/estimados`. Deleting a supplier removes its
//! estimates on the backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shopfloor_commerce::{EstimateId, SupplierId};
use shopfloor_data::{ApiClient, ApiClientExt};

use crate::error::{FormError, PlantError};
use crate::suppliers::SUPPLIERS_PATH;
use crate::wire::{null_as_empty, null_as_zero, optional_date};

/// Delivery estimates path on the backend.
pub const ESTIMATES_PATH: &str = "/estimados";

pub const ESTIMATE_SAVE_FAILED: &str = "could not save the delivery estimate";
pub const ESTIMATE_DELETE_FAILED: &str = "could not delete the delivery estimate";

/// Editable estimate fields, as sent on create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateForm {
    #[serde(rename = "proveedor_id", default)]
    pub supplier_id: Option<SupplierId>,
    #[serde(rename = "producto_nombre", default, deserialize_with = "null_as_empty")]
    pub product_name: String,
    #[serde(rename = "fecha_estimada", default, with = "optional_date")]
    pub expected_on: Option<NaiveDate>,
    #[serde(rename = "cantidad", default, deserialize_with = "null_as_zero")]
    pub quantity: u32,
    #[serde(rename = "comentarios", default, deserialize_with = "null_as_empty")]
    pub comments: String,
}

impl EstimateForm {
    pub fn new(
        supplier_id: SupplierId,
        product_name: impl Into<String>,
        quantity: u32,
        expected_on: NaiveDate,
    ) -> Self {
        Self {
            supplier_id: Some(supplier_id),
            product_name: product_name.into(),
            expected_on: Some(expected_on),
            quantity,
            comments: String::new(),
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    /// Check required fields in form order: supplier, product, date,
    /// quantity.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.supplier_id.is_none() {
            return Err(FormError::SupplierRequired);
        }
        if self.product_name.trim().is_empty() {
            return Err(FormError::ProductRequired);
        }
        if self.expected_on.is_none() {
            return Err(FormError::DateRequired);
        }
        if self.quantity == 0 {
            return Err(FormError::QuantityRequired);
        }
        Ok(())
    }

    pub fn trimmed(&self) -> Self {
        Self {
            supplier_id: self.supplier_id.clone(),
            product_name: self.product_name.trim().to_string(),
            expected_on: self.expected_on,
            quantity: self.quantity,
            comments: self.comments.trim().to_string(),
        }
    }
}

/// A stored delivery estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    pub id: EstimateId,
    #[serde(flatten)]
    pub details: EstimateForm,
}

#[derive(Deserialize)]
struct Created {
    id: EstimateId,
}

fn estimate_path(id: &EstimateId) -> String {
    format!("{}/{}", ESTIMATES_PATH, id.to_path_segment())
}

fn supplier_estimates_path(supplier_id: &SupplierId) -> String {
    format!(
        "{}/{}{}",
        SUPPLIERS_PATH,
        supplier_id.to_path_segment(),
        ESTIMATES_PATH
    )
}

/// Delivery estimate CRUD over an injected client.
#[derive(Debug, Clone)]
pub struct EstimateService<C> {
    client: C,
}

impl<C: ApiClient> EstimateService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Estimates for one supplier.
    pub async fn for_supplier(
        &self,
        supplier_id: &SupplierId,
    ) -> Result<Vec<Estimate>, PlantError> {
        let estimates: Vec<Estimate> = self
            .client
            .get(&supplier_estimates_path(supplier_id))
            .await?;
        tracing::debug!(supplier = %supplier_id, count = estimates.len(), "estimates loaded");
        Ok(estimates)
    }

    pub async fn get(&self, id: &EstimateId) -> Result<Estimate, PlantError> {
        Ok(self.client.get(&estimate_path(id)).await?)
    }

    /// Create an estimate. Returns the new id when the backend reports one.
    pub async fn create(&self, form: &EstimateForm) -> Result<Option<EstimateId>, PlantError> {
        form.validate()?;
        let response = self.client.post(ESTIMATES_PATH, &form.trimmed()).await?;
        let id = response.json::<Created>().ok().map(|created| created.id);
        tracing::info!(id = ?id, "delivery estimate created");
        Ok(id)
    }

    pub async fn update(&self, id: &EstimateId, form: &EstimateForm) -> Result<(), PlantError> {
        form.validate()?;
        self.client.put(&estimate_path(id), &form.trimmed()).await?;
        tracing::info!(%id, "delivery estimate updated");
        Ok(())
    }

    pub async fn delete(&self, id: &EstimateId) -> Result<(), PlantError> {
        self.client.delete(&estimate_path(id)).await?;
        tracing::info!(%id, "delivery estimate deleted");
        Ok(())
    }
}
