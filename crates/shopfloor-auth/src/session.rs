//! Explicit session context.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::token::{current_timestamp, AuthToken};
use crate::AuthError;

/// Why there is no usable session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnauthenticatedReason {
    /// No token was ever stored.
    NeverLoggedIn,
    /// The token passed its local expiry.
    Expired,
    /// The user logged out.
    LoggedOut,
}

impl fmt::Display for UnauthenticatedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnauthenticatedReason::NeverLoggedIn => write!(f, "not logged in"),
            UnauthenticatedReason::Expired => write!(f, "session expired"),
            UnauthenticatedReason::LoggedOut => write!(f, "logged out"),
        }
    }
}

/// The session a component performs requests under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionContext {
    Authenticated(AuthToken),
    Unauthenticated(UnauthenticatedReason),
}

impl SessionContext {
    /// A session nobody has logged into.
    pub fn anonymous() -> Self {
        SessionContext::Unauthenticated(UnauthenticatedReason::NeverLoggedIn)
    }

    /// Build a context from a token, downgrading it if already expired.
    pub fn from_token(token: AuthToken) -> Self {
        if token.is_expired() {
            SessionContext::Unauthenticated(UnauthenticatedReason::Expired)
        } else {
            SessionContext::Authenticated(token)
        }
    }

    /// The bearer token to send at time `now`.
    pub fn bearer_at(&self, now: i64) -> Result<&str, AuthError> {
        match self {
            SessionContext::Authenticated(token) if token.is_expired_at(now) => Err(
                AuthError::Unauthenticated(UnauthenticatedReason::Expired),
            ),
            SessionContext::Authenticated(token) => Ok(token.as_str()),
            SessionContext::Unauthenticated(reason) => Err(AuthError::Unauthenticated(*reason)),
        }
    }

    /// The bearer token to send right now.
    pub fn bearer(&self) -> Result<&str, AuthError> {
        self.bearer_at(current_timestamp())
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer().is_ok()
    }

    pub fn token(&self) -> Option<&AuthToken> {
        match self {
            SessionContext::Authenticated(token) => Some(token),
            SessionContext::Unauthenticated(_) => None,
        }
    }

    /// Drop the token.
    pub fn logout(&mut self) {
        *self = SessionContext::Unauthenticated(UnauthenticatedReason::LoggedOut);
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_no_bearer() {
        let session = SessionContext::anonymous();
        assert!(!session.is_authenticated());
        assert!(matches!(
            session.bearer(),
            Err(AuthError::Unauthenticated(
                UnauthenticatedReason::NeverLoggedIn
            ))
        ));
    }

    #[test]
    fn test_authenticated_bearer() {
        let session = SessionContext::from_token(AuthToken::new("abc"));
        assert_eq!(session.bearer().unwrap(), "abc");
        assert!(session.token().is_some());
    }

    #[test]
    fn test_expired_token_downgrades() {
        let token = AuthToken {
            token: "abc".to_string(),
            issued_at: 0,
            expires_at: Some(1),
        };
        let session = SessionContext::from_token(token);
        assert_eq!(
            session,
            SessionContext::Unauthenticated(UnauthenticatedReason::Expired)
        );
    }

    #[test]
    fn test_token_expiring_mid_session() {
        let token = AuthToken::new("abc").with_ttl(10);
        let issued = token.issued_at;
        let session = SessionContext::Authenticated(token);
        assert!(session.bearer_at(issued + 5).is_ok());
        assert!(session.bearer_at(issued + 10).is_err());
    }

    #[test]
    fn test_logout() {
        let mut session = SessionContext::from_token(AuthToken::new("abc"));
        session.logout();
        assert_eq!(
            session,
            SessionContext::Unauthenticated(UnauthenticatedReason::LoggedOut)
        );
    }
}
