//! Username/password login.

use serde::{Deserialize, Serialize};
use shopfloor_data::{ApiClient, ApiClientExt, FetchError};
use std::fmt;

use crate::{AuthError, AuthToken, SessionContext};

/// Login path on the backend.
pub const LOGIN_PATH: &str = "/login";

/// What the login form submits.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Exchange credentials for a session.
///
/// Any 4xx answer counts as rejected credentials. `ttl_secs` sets the local
/// expiry of the issued token.
pub async fn login<C>(
    client: &C,
    credentials: &Credentials,
    ttl_secs: Option<i64>,
) -> Result<SessionContext, AuthError>
where
    C: ApiClient + ?Sized,
{
    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return Err(AuthError::InvalidCredentials);
    }

    let response: LoginResponse = match client.post_json(LOGIN_PATH, credentials).await {
        Ok(response) => response,
        Err(FetchError::HttpError { status, .. }) if (400..500).contains(&status) => {
            tracing::info!(username = %credentials.username, status, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        Err(e) => return Err(e.into()),
    };

    let mut token = AuthToken::new(response.token);
    if let Some(ttl) = ttl_secs {
        token = token.with_ttl(ttl);
    }
    tracing::info!(username = %credentials.username, "logged in");
    Ok(SessionContext::Authenticated(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shopfloor_data::{FakeClient, Method};

    #[tokio::test]
    async fn test_login_success() {
        let fake = FakeClient::new();
        fake.reply_json(Method::Post, LOGIN_PATH, 200, json!({"token": "jwt"}));

        let session = login(&fake, &Credentials::new("ana", "pw"), Some(3600))
            .await
            .unwrap();

        assert_eq!(session.bearer().unwrap(), "jwt");
        let body: serde_json::Value = fake.last_request().unwrap().json_body().unwrap();
        assert_eq!(body, json!({"username": "ana", "password": "pw"}));
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let fake = FakeClient::new();
        fake.reply_json(Method::Post, LOGIN_PATH, 401, json!({"message": "nope"}));

        let err = login(&fake, &Credentials::new("ana", "bad"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_server_failure_is_fetch_error() {
        let fake = FakeClient::new();
        fake.reply_json(Method::Post, LOGIN_PATH, 503, json!({}));

        let err = login(&fake, &Credentials::new("ana", "pw"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_blank_credentials_skip_network() {
        let fake = FakeClient::new();
        let err = login(&fake, &Credentials::new("  ", "pw"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(fake.request_count(), 0);
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("ana", "hunter2"));
        assert!(!debug.contains("hunter2"));
    }
}
