//! Commerce error types.

use shopfloor_data::FetchError;
use thiserror::Error;

/// A local precondition on a sale failed. Never reaches the network.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("customer name required")]
    CustomerNameRequired,

    #[error("at least one item required")]
    NoItems,
}

/// Errors that can occur in sale operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// The sale failed local validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend could not be reached or refused the request.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl CommerceError {
    pub fn is_validation(&self) -> bool {
        matches!(self, CommerceError::Validation(_))
    }
}
