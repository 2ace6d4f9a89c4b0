//! Authentication errors.

use shopfloor_data::FetchError;
use thiserror::Error;

use crate::UnauthenticatedReason;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The backend rejected the username/password pair.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// No usable session.
    #[error("not authenticated: {0}")]
    Unauthenticated(UnauthenticatedReason),

    /// Login request failed for a reason other than bad credentials.
    #[error("login request failed: {0}")]
    Fetch(#[from] FetchError),

    /// Reading or writing the stored token failed.
    #[error("token store error: {0}")]
    Store(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::Unauthenticated(_)
        )
    }
}

impl From<std::io::Error> for AuthError {
    fn from(e: std::io::Error) -> Self {
        AuthError::Store(e.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::Serialization(e.to_string())
    }
}
