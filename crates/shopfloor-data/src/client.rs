//! The API client capability.
//!
//! Screens never reach for a global fetch. They receive something that
//! implements [`ApiClient`] and talk to the backend through it, which is
//! what lets tests swap in a [`FakeClient`](crate::FakeClient).

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{FetchError, Request, Response};

/// Sends requests to the backend API.
///
/// Implementations resolve [`Request::path`] against their own base address.
/// Any response that arrives is returned as-is; status handling belongs to the
/// caller (see [`ApiClientExt`]).
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, FetchError>;
}

#[async_trait]
impl<C: ApiClient + ?Sized> ApiClient for &C {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<C: ApiClient + ?Sized> ApiClient for Arc<C> {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<C: ApiClient + ?Sized> ApiClient for Box<C> {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        (**self).send(request).await
    }
}

/// `get`/`post`/`put`/`delete` on top of [`ApiClient::send`].
///
/// Every method treats a non-2xx status as [`FetchError::HttpError`].
#[async_trait]
pub trait ApiClientExt: ApiClient {
    /// GET `path` and decode the JSON body.
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> Result<T, FetchError>;

    /// POST `body` as JSON to `path`.
    async fn post<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, FetchError>;

    /// POST `body` as JSON to `path` and decode the JSON reply.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, FetchError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send;

    /// PUT `body` as JSON to `path`.
    async fn put<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, FetchError>;

    /// DELETE `path`.
    async fn delete(&self, path: &str) -> Result<Response, FetchError>;
}

#[async_trait]
impl<C: ApiClient + ?Sized> ApiClientExt for C {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> Result<T, FetchError> {
        let request = Request::get(path).accept("application/json");
        self.send(request).await?.error_for_status()?.json()
    }

    async fn post<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, FetchError> {
        let request = Request::post(path).json(body)?;
        self.send(request).await?.error_for_status()
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, FetchError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let request = Request::post(path).json(body)?.accept("application/json");
        self.send(request).await?.error_for_status()?.json()
    }

    async fn put<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, FetchError> {
        let request = Request::put(path).json(body)?;
        self.send(request).await?.error_for_status()
    }

    async fn delete(&self, path: &str) -> Result<Response, FetchError> {
        self.send(Request::delete(path)).await?.error_for_status()
    }
}
