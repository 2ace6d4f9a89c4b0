//! Transport-independent HTTP request.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// HTTP methods used by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request against the API, addressed by a path relative to the client's base URL.
///
/// Header names are stored lowercased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// Create a new request.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Add a header to the request, replacing any previous value.
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Add a header only if the request does not already carry it.
    pub fn default_header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .entry(key.as_ref().to_ascii_lowercase())
            .or_insert_with(|| value.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.body = Some(json);
        Ok(self.header("Content-Type", "application/json"))
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// Get a header value.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Decode the JSON body.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| FetchError::ParseError("request has no body".to_string()))?;
        serde_json::from_slice(body).map_err(|e| FetchError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_names() {
        let names: Vec<_> = [Method::Get, Method::Post, Method::Put, Method::Delete]
            .iter()
            .map(Method::to_string)
            .collect();
        assert_eq!(names, ["GET", "POST", "PUT", "DELETE"]);
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let req = Request::get("/productos").header("X-Trace", "abc");
        assert_eq!(req.header_value("x-trace"), Some("abc"));
        assert_eq!(req.header_value("X-TRACE"), Some("abc"));
    }

    #[test]
    fn test_default_header_does_not_override() {
        let req = Request::get("/")
            .header("Accept", "text/plain")
            .default_header("accept", "application/json");
        assert_eq!(req.header_value("Accept"), Some("text/plain"));
    }

    #[test]
    fn test_json_body() {
        let req = Request::post("/ventas").json(&json!({"total": 30.0})).unwrap();
        assert_eq!(req.header_value("content-type"), Some("application/json"));
        let body: serde_json::Value = req.json_body().unwrap();
        assert_eq!(body["total"], 30.0);
    }

    #[test]
    fn test_json_body_missing() {
        let req = Request::get("/productos");
        assert!(req.json_body::<serde_json::Value>().is_err());
    }

    #[test]
    fn test_bearer_auth() {
        let req = Request::get("/").bearer_auth("tok");
        assert_eq!(req.header_value("authorization"), Some("Bearer tok"));
    }
}
