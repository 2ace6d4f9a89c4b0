//! Machine fault reporting.
//!
//! The reporter loads the machine list once, holds the form the operator is
//! filling in and posts it to `/fallas`. A successful report resets the
//! form to its defaults; a failed one leaves it for another attempt.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopfloor_commerce::{EmployeeId, MachineId};
use shopfloor_data::{ApiClient, ApiClientExt, FetchError};

use crate::error::{FormError, PlantError};

/// Machines path on the backend.
pub const MACHINES_PATH: &str = "/maquinas";

/// Fault reports path on the backend.
pub const FAULTS_PATH: &str = "/fallas";

/// Timestamp layout the backend expects for `fecha_reporte`.
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Employee a new form is attributed to.
pub const DEFAULT_EMPLOYEE: i64 = 1;

pub const FAULT_REPORTED: &str = "fault reported";
pub const FAULT_REPORT_FAILED: &str = "could not save the report";
pub const MACHINES_LOAD_FAILED: &str = "could not load machines";

/// A machine on the production line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub id: MachineId,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Find a machine by id as typed by an operator, whether the backend
/// serves that id as a number or a string.
pub fn find_machine<'a>(machines: &'a [Machine], input: &str) -> Option<&'a Machine> {
    let input = input.trim();
    machines.iter().find(|m| m.id.to_string() == input)
}

pub(crate) async fn fetch_machines<C>(client: &C) -> Result<Vec<Machine>, FetchError>
where
    C: ApiClient,
{
    let machines: Vec<Machine> = client.get(MACHINES_PATH).await?;
    tracing::debug!(count = machines.len(), "machines loaded");
    Ok(machines)
}

/// How badly a fault affects production.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[default]
    Baja,
    Media,
    Alta,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Baja, Severity::Media, Severity::Alta];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Baja => "Baja",
            Severity::Media => "Media",
            Severity::Alta => "Alta",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the wire labels and their English equivalents, any case.
impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baja" | "low" => Ok(Severity::Baja),
            "media" | "medium" => Ok(Severity::Media),
            "alta" | "high" => Ok(Severity::Alta),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// The fault report being filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultReportForm {
    pub employee_id: EmployeeId,
    pub machine_id: Option<MachineId>,
    pub description: String,
    pub severity: Severity,
    pub reported_at: Option<DateTime<Utc>>,
}

impl Default for FaultReportForm {
    fn default() -> Self {
        Self {
            employee_id: EmployeeId::Int(DEFAULT_EMPLOYEE),
            machine_id: None,
            description: String::new(),
            severity: Severity::default(),
            reported_at: None,
        }
    }
}

impl FaultReportForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check required fields, description first.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.description.trim().is_empty() {
            return Err(FormError::DescriptionRequired);
        }
        if self.reported_at.is_none() {
            return Err(FormError::ReportDateRequired);
        }
        if self.machine_id.is_none() {
            return Err(FormError::MachineRequired);
        }
        Ok(())
    }

    /// Validate and build the request body.
    pub fn to_payload(&self) -> Result<FaultPayload, FormError> {
        self.validate()?;
        let (Some(machine_id), Some(reported_at)) = (&self.machine_id, &self.reported_at) else {
            return Err(FormError::MachineRequired);
        };
        Ok(FaultPayload {
            employee_id: self.employee_id.clone(),
            machine_id: machine_id.clone(),
            description: self.description.trim().to_string(),
            severity: self.severity,
            reported_at: reported_at.format(REPORT_DATE_FORMAT).to_string(),
        })
    }
}

/// Body of `POST /fallas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultPayload {
    #[serde(rename = "empleado_id")]
    pub employee_id: EmployeeId,
    #[serde(rename = "maquina_id")]
    pub machine_id: MachineId,
    #[serde(rename = "descripcion_falla")]
    pub description: String,
    #[serde(rename = "severidad")]
    pub severity: Severity,
    #[serde(rename = "fecha_reporte")]
    pub reported_at: String,
}

/// Fault report screen state.
#[derive(Debug)]
pub struct FaultReporter<C> {
    client: C,
    machines: Vec<Machine>,
    form: FaultReportForm,
}

impl<C: ApiClient> FaultReporter<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            machines: Vec::new(),
            form: FaultReportForm::default(),
        }
    }

    /// Fetch the machine list. On failure the list is left empty.
    pub async fn load_machines(&mut self) -> Result<&[Machine], FetchError> {
        match fetch_machines(&self.client).await {
            Ok(machines) => {
                self.machines = machines;
                Ok(&self.machines)
            }
            Err(e) => {
                tracing::warn!(error = %e, "machine list load failed");
                self.machines.clear();
                Err(e)
            }
        }
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn machine(&self, id: &MachineId) -> Option<&Machine> {
        self.machines.iter().find(|m| &m.id == id)
    }

    /// Look up a loaded machine by operator input.
    pub fn find_machine(&self, input: &str) -> Option<&Machine> {
        find_machine(&self.machines, input)
    }

    pub fn form(&self) -> &FaultReportForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FaultReportForm {
        &mut self.form
    }

    /// Validate and send the form. Success resets it to defaults.
    pub async fn submit(&mut self) -> Result<(), PlantError> {
        let payload = self.form.to_payload()?;
        tracing::info!(
            machine = %payload.machine_id,
            severity = %payload.severity,
            "reporting fault"
        );
        match self.client.post(FAULTS_PATH, &payload).await {
            Ok(_) => {
                self.form = FaultReportForm::default();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "fault report failed");
                Err(e.into())
            }
        }
    }
}
