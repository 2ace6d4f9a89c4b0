//! Production records.
//!
//! One record per run: which machine made which product, how many units,
//! over how many hours and in what state the machine was left. The recorder
//! loads the machine and product pickers, holds the form and posts it to
//! `/produccion`. Like the fault reporter, success resets the form and
//! failure keeps it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopfloor_commerce::catalog::CatalogCache;
use shopfloor_commerce::{EmployeeId, ItemId, MachineId};
use shopfloor_data::{ApiClient, ApiClientExt, FetchError};

use crate::error::{FormError, PlantError};
use crate::faults::{fetch_machines, find_machine, Machine, DEFAULT_EMPLOYEE};

/// Production records path on the backend.
pub const PRODUCTION_PATH: &str = "/produccion";

pub const PRODUCTION_RECORDED: &str = "production record saved";
pub const PRODUCTION_SAVE_FAILED: &str = "could not save the production record";
pub const PICKERS_LOAD_FAILED: &str = "could not load machines and products";

/// State the machine was in at the end of the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineStatus {
    #[default]
    #[serde(rename = "operativa")]
    Running,
    #[serde(rename = "parada")]
    Stopped,
    #[serde(rename = "en mantenimiento")]
    Maintenance,
    #[serde(rename = "fallo")]
    Failed,
}

impl MachineStatus {
    pub const ALL: [MachineStatus; 4] = [
        MachineStatus::Running,
        MachineStatus::Stopped,
        MachineStatus::Maintenance,
        MachineStatus::Failed,
    ];

    /// Wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineStatus::Running => "operativa",
            MachineStatus::Stopped => "parada",
            MachineStatus::Maintenance => "en mantenimiento",
            MachineStatus::Failed => "fallo",
        }
    }
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the wire labels and English names, any case.
impl FromStr for MachineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "operativa" | "running" => Ok(MachineStatus::Running),
            "parada" | "stopped" => Ok(MachineStatus::Stopped),
            "en mantenimiento" | "mantenimiento" | "maintenance" => {
                Ok(MachineStatus::Maintenance)
            }
            "fallo" | "failed" => Ok(MachineStatus::Failed),
            other => Err(format!("unknown machine status '{}'", other)),
        }
    }
}

/// Work shift a run belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    #[default]
    #[serde(rename = "mañana")]
    Morning,
    #[serde(rename = "tarde")]
    Afternoon,
    #[serde(rename = "noche")]
    Night,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "mañana",
            Shift::Afternoon => "tarde",
            Shift::Night => "noche",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mañana" | "manana" | "morning" => Ok(Shift::Morning),
            "tarde" | "afternoon" => Ok(Shift::Afternoon),
            "noche" | "night" => Ok(Shift::Night),
            other => Err(format!("unknown shift '{}'", other)),
        }
    }
}

/// The production record being filled in.
///
/// `quantity` may be zero: a run that ended in a failure can produce
/// nothing. It still has to be entered.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionForm {
    pub employee_id: EmployeeId,
    pub machine_id: Option<MachineId>,
    pub product_id: Option<ItemId>,
    pub quantity: Option<u32>,
    pub status: MachineStatus,
    pub hours_worked: Option<f64>,
    pub shift: Shift,
    pub description: String,
}

impl Default for ProductionForm {
    fn default() -> Self {
        Self {
            employee_id: EmployeeId::Int(DEFAULT_EMPLOYEE),
            machine_id: None,
            product_id: None,
            quantity: None,
            status: MachineStatus::default(),
            hours_worked: None,
            shift: Shift::default(),
            description: String::new(),
        }
    }
}

impl ProductionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check required fields in picker order: machine, product, quantity,
    /// hours. Hours must be a non-negative number.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.machine_id.is_none() {
            return Err(FormError::MachineRequired);
        }
        if self.product_id.is_none() {
            return Err(FormError::ProductRequired);
        }
        if self.quantity.is_none() {
            return Err(FormError::QuantityRequired);
        }
        match self.hours_worked {
            Some(hours) if hours.is_finite() && hours >= 0.0 => Ok(()),
            _ => Err(FormError::HoursRequired),
        }
    }

    /// Validate and build the request body, stamped with `recorded_at`.
    pub fn to_payload(&self, recorded_at: DateTime<Utc>) -> Result<ProductionPayload, FormError> {
        self.validate()?;
        let (Some(machine_id), Some(product_id), Some(quantity), Some(hours_worked)) = (
            &self.machine_id,
            &self.product_id,
            self.quantity,
            self.hours_worked,
        ) else {
            return Err(FormError::MachineRequired);
        };
        Ok(ProductionPayload {
            employee_id: self.employee_id.clone(),
            product_id: product_id.clone(),
            quantity,
            shift: self.shift,
            recorded_at,
            machine_id: machine_id.clone(),
            hours_worked,
            status: self.status,
            description: self.description.trim().to_string(),
        })
    }
}

/// Body of `POST /produccion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPayload {
    #[serde(rename = "empleado_id")]
    pub employee_id: EmployeeId,
    #[serde(rename = "producto_id")]
    pub product_id: ItemId,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "turno")]
    pub shift: Shift,
    #[serde(rename = "fecha")]
    pub recorded_at: DateTime<Utc>,
    #[serde(rename = "maquina_id")]
    pub machine_id: MachineId,
    #[serde(rename = "horas_trabajadas")]
    pub hours_worked: f64,
    #[serde(rename = "estado_produccion")]
    pub status: MachineStatus,
    #[serde(rename = "descripcion")]
    pub description: String,
}

/// Production registration screen state.
#[derive(Debug)]
pub struct ProductionRecorder<C> {
    client: C,
    machines: Vec<Machine>,
    products: CatalogCache,
    form: ProductionForm,
}

impl<C: ApiClient> ProductionRecorder<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            machines: Vec::new(),
            products: CatalogCache::new(),
            form: ProductionForm::default(),
        }
    }

    /// Fetch machines, then products. A failed fetch leaves that list
    /// empty and stops there.
    pub async fn load_pickers(&mut self) -> Result<(), FetchError> {
        match fetch_machines(&self.client).await {
            Ok(machines) => self.machines = machines,
            Err(e) => {
                tracing::warn!(error = %e, "machine list load failed");
                self.machines.clear();
                return Err(e);
            }
        }
        self.products.load(&self.client).await?;
        Ok(())
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn products(&self) -> &CatalogCache {
        &self.products
    }

    pub fn find_machine(&self, input: &str) -> Option<&Machine> {
        find_machine(&self.machines, input)
    }

    pub fn form(&self) -> &ProductionForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductionForm {
        &mut self.form
    }

    /// Validate and send the form, stamped with the current time.
    pub async fn submit(&mut self) -> Result<(), PlantError> {
        self.submit_at(Utc::now()).await
    }

    /// Validate and send the form. Success resets it to defaults.
    pub async fn submit_at(&mut self, recorded_at: DateTime<Utc>) -> Result<(), PlantError> {
        let payload = self.form.to_payload(recorded_at)?;
        tracing::info!(
            machine = %payload.machine_id,
            product = %payload.product_id,
            quantity = payload.quantity,
            status = %payload.status,
            "recording production"
        );
        match self.client.post(PRODUCTION_PATH, &payload).await {
            Ok(_) => {
                self.form = ProductionForm::default();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "production record failed");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use shopfloor_data::{FakeClient, Method};

    fn filled_form() -> ProductionForm {
        ProductionForm {
            employee_id: EmployeeId::Int(1),
            machine_id: Some(MachineId::Int(2)),
            product_id: Some(ItemId::Int(5)),
            quantity: Some(120),
            status: MachineStatus::Maintenance,
            hours_worked: Some(7.5),
            shift: Shift::Morning,
            description: " cambio de molde ".to_string(),
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap()
    }

    #[test]
    fn test_required_fields_in_order() {
        let form = ProductionForm {
            machine_id: None,
            product_id: None,
            ..filled_form()
        };
        assert_eq!(form.validate(), Err(FormError::MachineRequired));

        let form = ProductionForm {
            product_id: None,
            quantity: None,
            ..filled_form()
        };
        assert_eq!(form.validate(), Err(FormError::ProductRequired));

        let form = ProductionForm {
            quantity: None,
            ..filled_form()
        };
        assert_eq!(form.validate(), Err(FormError::QuantityRequired));

        let form = ProductionForm {
            hours_worked: Some(-1.0),
            ..filled_form()
        };
        assert_eq!(form.validate(), Err(FormError::HoursRequired));
    }

    #[test]
    fn test_zero_units_is_a_valid_run() {
        let form = ProductionForm {
            quantity: Some(0),
            status: MachineStatus::Failed,
            ..filled_form()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_payload_shape() {
        let payload = filled_form().to_payload(at()).unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "empleado_id": 1,
                "producto_id": 5,
                "cantidad": 120,
                "turno": "mañana",
                "fecha": "2024-03-09T14:05:00Z",
                "maquina_id": 2,
                "horas_trabajadas": 7.5,
                "estado_produccion": "en mantenimiento",
                "descripcion": "cambio de molde"
            })
        );
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "en-mantenimiento".parse::<MachineStatus>().unwrap(),
            MachineStatus::Maintenance
        );
        assert_eq!("FAILED".parse::<MachineStatus>().unwrap(), MachineStatus::Failed);
        assert!("broken".parse::<MachineStatus>().is_err());
        assert_eq!("tarde".parse::<Shift>().unwrap(), Shift::Afternoon);
    }

    #[tokio::test]
    async fn test_pickers_stop_at_machine_failure() {
        let fake = FakeClient::new();
        fake.fail(Method::Get, crate::faults::MACHINES_PATH, "refused");
        let mut recorder = ProductionRecorder::new(&fake);

        assert!(recorder.load_pickers().await.is_err());
        assert!(recorder.machines().is_empty());
        assert!(recorder.products().is_empty());
        assert_eq!(fake.request_count(), 1);
    }

    #[tokio::test]
    async fn test_submit_keeps_form_on_failure() {
        let fake = FakeClient::new();
        fake.reply_json(Method::Post, PRODUCTION_PATH, 500, json!({}));
        let mut recorder = ProductionRecorder::new(&fake);
        *recorder.form_mut() = filled_form();

        let err = recorder.submit_at(at()).await.unwrap_err();
        assert_eq!(err.user_message(PRODUCTION_SAVE_FAILED), PRODUCTION_SAVE_FAILED);
        assert_eq!(recorder.form(), &filled_form());
    }
}
