//! API client capability for the shopfloor console.
//!
//! Every screen talks to the backend REST API through an injected
//! [`ApiClient`]. This crate provides:
//!
//! - [`ApiClient`] / [`ApiClientExt`] - the capability (`send`, `get`, `post`, `put`, `delete`)
//! - [`HttpClient`] - reqwest transport against a configured base address
//! - [`FakeClient`] - scripted in-memory client for tests
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfloor_data::{ApiClientExt, HttpClient};
//!
//! let client = HttpClient::new("http://localhost:3001/api");
//! let items: Vec<serde_json::Value> = client.get("/productos").await?;
//! ```

mod client;
mod error;
mod fake;
mod http;
mod request;
mod response;

pub use client::{ApiClient, ApiClientExt};
pub use error::FetchError;
pub use fake::{FakeClient, FakeReply};
pub use http::HttpClient;
pub use request::{Method, Request};
pub use response::Response;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, ApiClientExt, FetchError, HttpClient, Method, Request, Response};
}
