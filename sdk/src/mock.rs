//! In-memory [`Fetcher`] for tests
//!
//! Routes are registered as `(method, path)` pairs with a canned envelope. Every
//! request is recorded, including requests to unregistered routes, so tests can
//! assert that validation failures never reach the network.

use crate::{
    api_types::Envelope,
    client::{Fetcher, HttpMethod, RequestInit},
    error::{QueuectlError, Result},
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

/// A request observed by [`MockFetcher`]
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

/// Replays canned envelopes and records requests
#[derive(Debug, Default)]
pub struct MockFetcher {
    routes: Mutex<HashMap<(HttpMethod, String), Value>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a raw envelope for `method path`
    pub fn respond(&self, method: HttpMethod, path: impl Into<String>, envelope: Value) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method, path.into()), envelope);
    }

    /// Register `{ success: true, errors: [], result }` for `method path`
    pub fn respond_ok(&self, method: HttpMethod, path: impl Into<String>, result: Value) {
        self.respond(
            method,
            path,
            json!({ "success": true, "errors": [], "result": result }),
        );
    }

    /// Register a `success: false` envelope with a single error item
    pub fn respond_error(&self, method: HttpMethod, path: impl Into<String>, code: i64, message: &str) {
        self.respond(
            method,
            path,
            json!({
                "success": false,
                "errors": [{ "code": code, "message": message }],
                "result": null
            }),
        );
    }

    /// All requests seen so far, in order
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn route(&self, method: HttpMethod, path: &str) -> Option<Value> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(method, path.to_string()))
            .cloned()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch_result<T>(&self, path: &str, init: RequestInit) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method: init.method,
                path: path.to_string(),
                body: init.body,
            });

        let raw = self.route(init.method, path).ok_or_else(|| {
            QueuectlError::Generic(format!("no mock response for {} {path}", init.method))
        })?;
        let envelope: Envelope = serde_json::from_value(raw)?;
        envelope.into_result(path)
    }
}
