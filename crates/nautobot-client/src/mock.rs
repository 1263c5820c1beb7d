//! Mock NautobotClient for unit testing
//!
//! Serves canned JSON bodies from memory so the mapping functions and the
//! loader can be exercised without a running Nautobot instance.

use crate::common::status_error;
use crate::error::NautobotError;
use crate::nautobot_trait::NautobotClientTrait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mock NautobotClient for testing
///
/// Responses are keyed by `endpoint/` for collections and `endpoint/id/`
/// for single objects. Unknown keys answer 404.
#[derive(Debug, Clone)]
pub struct MockNautobotClient {
    base_url: String,
    responses: Arc<Mutex<HashMap<String, Value>>>,
    failures: Arc<Mutex<HashMap<String, StatusCode>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockNautobotClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve `items` as the first (and only) page of a collection
    pub fn set_collection(&self, endpoint: &str, items: Vec<Value>) {
        let body = json!({
            "count": items.len(),
            "next": null,
            "previous": null,
            "results": items,
        });
        self.set_response(endpoint, None, body);
    }

    /// Serve a single object; its `id` key selects the URL
    pub fn set_object(&self, endpoint: &str, object: Value) {
        let id = match object.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        self.set_response(endpoint, Some(&id), object);
    }

    /// Serve an arbitrary body for a collection or object URL
    pub fn set_response(&self, endpoint: &str, id: Option<&str>, body: Value) {
        lock(&self.responses).insert(key(endpoint, id), body);
    }

    /// Make every request under `endpoint` fail with `status`
    pub fn fail_endpoint(&self, endpoint: &str, status: StatusCode) {
        lock(&self.failures).insert(key(endpoint, None), status);
    }

    /// Requests seen so far, as `endpoint/[id/][?query]`
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }
}

#[async_trait::async_trait]
impl NautobotClientTrait for MockNautobotClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(
        &self,
        endpoint: &str,
        id: Option<&str>,
        params: &[(&str, &str)],
    ) -> Result<Value, NautobotError> {
        let path = key(endpoint, id);
        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let logged = if query.is_empty() { path.clone() } else { format!("{path}?{query}") };
        lock(&self.requests).push(logged);

        let url = format!("{}/{}", self.base_url, path);
        if let Some(status) = lock(&self.failures).get(&key(endpoint, None)).copied() {
            return Err(status_error(status, url, "mock failure"));
        }

        lock(&self.responses)
            .get(&path)
            .cloned()
            .ok_or_else(|| status_error(StatusCode::NOT_FOUND, url, "no mock response"))
    }
}

fn key(endpoint: &str, id: Option<&str>) -> String {
    let endpoint = endpoint.trim_matches('/');
    match id {
        Some(id) => format!("{endpoint}/{id}/"),
        None => format!("{endpoint}/"),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
