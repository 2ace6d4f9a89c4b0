//! In-memory [`ApiClient`] for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::{ApiClient, FetchError, Method, Request, Response};

/// A scripted outcome for one request.
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// Answer with this response.
    Respond(Response),
    /// Fail at the transport level with this message.
    TransportError(String),
}

/// Records every request and answers from a per-route script.
///
/// Replies queued for a route are consumed in order; the last one keeps
/// answering once the queue is down to it. Unscripted routes get a 404.
#[derive(Debug, Default)]
pub struct FakeClient {
    routes: Mutex<HashMap<(Method, String), VecDeque<FakeReply>>>,
    requests: Mutex<Vec<Request>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `method path`.
    pub fn reply(&self, method: Method, path: impl Into<String>, reply: FakeReply) -> &Self {
        lock(&self.routes)
            .entry((method, path.into()))
            .or_default()
            .push_back(reply);
        self
    }

    /// Queue a JSON response for `method path`.
    pub fn reply_json(
        &self,
        method: Method,
        path: impl Into<String>,
        status: u16,
        body: serde_json::Value,
    ) -> &Self {
        self.reply(
            method,
            path,
            FakeReply::Respond(Response::json_body(status, &body)),
        )
    }

    /// Queue a transport failure for `method path`.
    pub fn fail(
        &self,
        method: Method,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> &Self {
        self.reply(method, path, FakeReply::TransportError(message.into()))
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        lock(&self.requests).clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<Request> {
        lock(&self.requests).last().cloned()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn next_reply(&self, method: Method, path: &str) -> Option<FakeReply> {
        let mut routes = lock(&self.routes);
        let queue = routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl ApiClient for FakeClient {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let reply = self.next_reply(request.method, &request.path);
        lock(&self.requests).push(request);

        match reply {
            Some(FakeReply::Respond(response)) => Ok(response),
            Some(FakeReply::TransportError(message)) => Err(FetchError::RequestError(message)),
            None => Ok(Response::json_body(
                404,
                &serde_json::json!({ "message": "no route" }),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_replies_in_order_then_sticky() {
        let client = FakeClient::new();
        client
            .reply_json(Method::Get, "/x", 500, json!({}))
            .reply_json(Method::Get, "/x", 200, json!({}));

        assert_eq!(client.send(Request::get("/x")).await.unwrap().status, 500);
        assert_eq!(client.send(Request::get("/x")).await.unwrap().status, 200);
        assert_eq!(client.send(Request::get("/x")).await.unwrap().status, 200);
        assert_eq!(client.request_count(), 3);
    }

    #[tokio::test]
    async fn test_unscripted_route_is_404() {
        let client = FakeClient::new();
        let response = client.send(Request::get("/nothing")).await.unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let client = FakeClient::new();
        client.fail(Method::Post, "/ventas", "connection reset");

        let err = client.send(Request::post("/ventas")).await.unwrap_err();
        assert!(matches!(err, FetchError::RequestError(_)));
        assert_eq!(client.last_request().unwrap().path, "/ventas");
    }
}
