//! Authentication for the shopfloor console.
//!
//! Provides login, the explicit [`SessionContext`] that replaces ambient
//! token lookups, and [`SessionClient`], which performs requests under a
//! session.

mod client;
mod error;
mod login;
mod session;
mod store;
mod token;

pub use client::SessionClient;
pub use error::AuthError;
pub use login::{login, Credentials, LOGIN_PATH};
pub use session::{SessionContext, UnauthenticatedReason};
pub use store::TokenStore;
pub use token::AuthToken;
