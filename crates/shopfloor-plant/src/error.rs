//! Plant error types.

use shopfloor_data::FetchError;
use thiserror::Error;

/// A required form field is missing. Never reaches the network.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("supplier name required")]
    SupplierNameRequired,

    #[error("machine required")]
    MachineRequired,

    #[error("fault description required")]
    DescriptionRequired,

    #[error("report date required")]
    ReportDateRequired,

    #[error("supplier required")]
    SupplierRequired,

    #[error("product required")]
    ProductRequired,

    #[error("quantity required")]
    QuantityRequired,

    #[error("hours worked required")]
    HoursRequired,

    #[error("date required")]
    DateRequired,
}

/// Errors raised by the plant services.
#[derive(Error, Debug)]
pub enum PlantError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl PlantError {
    pub fn is_form(&self) -> bool {
        matches!(self, PlantError::Form(_))
    }

    /// Message to show the operator: the form error, the server's message,
    /// or `fallback` when the server said nothing useful.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            PlantError::Form(e) => e.to_string(),
            PlantError::Fetch(e) => e
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}
