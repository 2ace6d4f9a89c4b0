//! reqwest-backed transport.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{ApiClient, FetchError, Method, Request, Response};

/// HTTP client bound to the backend's base address.
///
/// No timeout or retry is configured; a request runs until the transport
/// gives up on it.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
    default_headers: HashMap<String, String>,
}

impl HttpClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client around an existing reqwest client.
    pub fn with_client(inner: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            inner,
            base_url: base_url.into(),
            default_headers: HashMap::new(),
        }
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// The configured base address.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a request path against the base address.
    ///
    /// Absolute URLs are passed through untouched.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl ApiClient for HttpClient {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let url = self.url_for(&request.path);
        tracing::debug!(method = %request.method, %url, "sending request");

        let mut builder = self.inner.request(to_reqwest_method(request.method), &url);
        for (key, value) in &self.default_headers {
            if request.header_value(key).is_none() {
                builder = builder.header(key.as_str(), value.as_str());
            }
        }
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "request failed");
            FetchError::from(e)
        })?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(%url, status, bytes = body.len(), "received response");
        Ok(Response::new(status, headers, body))
    }
}
