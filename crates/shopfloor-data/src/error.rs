//! API client error types.

use thiserror::Error;

/// Errors that can occur when talking to the backend API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request or read the response.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx response. `message` is the server-provided `{message}` field, if any.
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
    HttpError {
        status: u16,
        message: Option<String>,
    },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// No usable session; the request never left the process.
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),
}

impl FetchError {
    /// The message the server attached to an error response, if there was one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            FetchError::HttpError {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }

    /// HTTP status of an error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}
