//! Common utilities for Nautobot API client
//!
//! Provides the authenticated GET wrapper used by every resource call.

pub mod query;

use crate::error::NautobotError;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

/// Longest response body kept in error messages
const MAX_ERROR_BODY_CHARS: usize = 500;

/// HTTP client wrapper with authentication
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: &str, token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `{base_url}/{endpoint}/` or `{base_url}/{endpoint}/{id}/`
    pub fn build_url(&self, endpoint: &str, id: Option<&str>) -> String {
        let endpoint = endpoint.trim_matches('/');
        match id {
            Some(id) => format!("{}/{}/{}/", self.base_url, endpoint, urlencoding::encode(id)),
            None => format!("{}/{}/", self.base_url, endpoint),
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Token {}", self.token)
    }

    /// Build query string from filters, preserving their order
    pub fn build_query_string(&self, filters: &[(&str, &str)]) -> String {
        filters
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// GET a resource or collection and return the decoded JSON body
    pub async fn get_json(
        &self,
        endpoint: &str,
        id: Option<&str>,
        filters: &[(&str, &str)],
    ) -> Result<Value, NautobotError> {
        let mut url = self.build_url(endpoint, id);
        if !filters.is_empty() {
            url = format!("{}?{}", url, self.build_query_string(filters));
        }
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, self.auth_header())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(NautobotError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, url, &body));
        }

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            NautobotError::InvalidResponse(format!(
                "error decoding response body from {}: {} - Response (first {} chars): {}",
                url,
                e,
                MAX_ERROR_BODY_CHARS,
                truncate(&response_text)
            ))
        })
    }
}

// Keep the token out of Debug output.
impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

pub(crate) fn status_error(status: StatusCode, url: String, body: &str) -> NautobotError {
    if status == StatusCode::NOT_FOUND {
        return NautobotError::NotFound(format!("Resource not found: {} - {}", url, truncate(body)));
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return NautobotError::Authentication { status, url };
    }
    NautobotError::Api {
        status,
        url,
        body: truncate(body),
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
