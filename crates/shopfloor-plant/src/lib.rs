//! Plant-side screens of the shopfloor console.
//!
//! - **Suppliers**: list, inspect, create, update and delete supplier records
//! - **Estimates**: expected deliveries per supplier
//! - **Inventory**: goods received into the plant
//! - **Production**: what each machine made during a run
//! - **Faults**: report a machine fault against the production line
//!
//! All are thin typed services over an injected [`ApiClient`], with the
//! same local validation the console forms apply before anything is sent.
//!
//! [`ApiClient`]: shopfloor_data::ApiClient

pub mod error;
pub mod estimates;
pub mod faults;
pub mod inventory;
pub mod production;
pub mod suppliers;
pub mod wire;

pub use error::{FormError, PlantError};
pub use estimates::{Estimate, EstimateForm, EstimateService};
pub use faults::{FaultReportForm, FaultReporter, Machine, Severity};
pub use inventory::{InventoryEntry, InventoryEntryForm, InventoryService};
pub use production::{MachineStatus, ProductionForm, ProductionRecorder, Shift};
pub use suppliers::{Supplier, SupplierForm, SupplierService};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{FormError, PlantError};
    pub use crate::estimates::{Estimate, EstimateForm, EstimateService};
    pub use crate::faults::{FaultPayload, FaultReportForm, FaultReporter, Machine, Severity};
    pub use crate::inventory::{InventoryEntry, InventoryEntryForm, InventoryService};
    pub use crate::production::{
        MachineStatus, ProductionForm, ProductionPayload, ProductionRecorder, Shift,
    };
    pub use crate::suppliers::{Supplier, SupplierForm, SupplierService};
}
