//! An [`ApiClient`] that performs every request under a session.

use async_trait::async_trait;
use shopfloor_data::{ApiClient, FetchError, Request, Response};

use crate::{AuthError, SessionContext};

/// Wraps a transport and attaches the session's bearer token.
///
/// Without a usable token the request fails with
/// [`FetchError::Unauthenticated`] and never reaches the transport.
#[derive(Debug, Clone)]
pub struct SessionClient<C> {
    inner: C,
    session: SessionContext,
}

impl<C: ApiClient> SessionClient<C> {
    pub fn new(inner: C, session: SessionContext) -> Self {
        Self { inner, session }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Replace the session, e.g. after a fresh login.
    pub fn set_session(&mut self, session: SessionContext) {
        self.session = session;
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: ApiClient> ApiClient for SessionClient<C> {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let token = self.session.bearer().map_err(|e| match e {
            AuthError::Unauthenticated(reason) => FetchError::Unauthenticated(reason.to_string()),
            other => FetchError::Unauthenticated(other.to_string()),
        })?;
        self.inner.send(request.bearer_auth(token)).await
    }
}
