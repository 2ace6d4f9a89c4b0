//! Bearer tokens issued by the backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bearer token plus the local bookkeeping needed to expire it.
///
/// The backend hands out an opaque string with no expiry information, so
/// `expires_at` is whatever lifetime the console was configured with
/// (`None` means the token is used until the server rejects it).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// The token value.
    pub token: String,
    /// Unix timestamp when the token was received.
    pub issued_at: i64,
    /// Unix timestamp after which the token is no longer sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl AuthToken {
    /// Wrap a freshly issued token with no local expiry.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            issued_at: current_timestamp(),
            expires_at: None,
        }
    }

    /// Expire the token `ttl_secs` after it was issued.
    pub fn with_ttl(mut self, ttl_secs: i64) -> Self {
        self.expires_at = Some(self.issued_at + ttl_secs);
        self
    }

    /// Check expiry against an explicit clock.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }

    /// Check if token is expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp())
    }

    /// Seconds until expiry, `None` for tokens without a local expiry.
    pub fn time_to_expiry(&self) -> Option<i64> {
        self.expires_at
            .map(|exp| (exp - current_timestamp()).max(0))
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("token", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Get current Unix timestamp.
pub(crate) fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_without_ttl_never_expires() {
        let token = AuthToken::new("abc");
        assert!(!token.is_expired());
        assert!(!token.is_expired_at(i64::MAX));
        assert_eq!(token.time_to_expiry(), None);
    }

    #[test]
    fn test_token_with_ttl() {
        let token = AuthToken::new("abc").with_ttl(60);
        assert!(!token.is_expired_at(token.issued_at + 59));
        assert!(token.is_expired_at(token.issued_at + 60));
    }

    #[test]
    fn test_debug_redacts_value() {
        let token = AuthToken::new("super-secret");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_serde_shape() {
        let token = AuthToken {
            token: "abc".to_string(),
            issued_at: 100,
            expires_at: None,
        };
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json, serde_json::json!({"token": "abc", "issued_at": 100}));
    }
}
