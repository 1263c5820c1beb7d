//! Nautobot client errors

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when interacting with the Nautobot API
#[derive(Debug, Error)]
pub enum NautobotError {
    /// HTTP transport error (connection refused, TLS failure, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Nautobot returned a non-success status
    #[error("GET {url} failed: {status} - {body}")]
    Api {
        /// Response status
        status: StatusCode,
        /// Requested URL
        url: String,
        /// Response body, truncated
        body: String,
    },

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication failed (401/403: invalid token, insufficient permissions)
    #[error("Authentication failed: {status} for {url}")]
    Authentication {
        /// 401 or 403
        status: StatusCode,
        /// Requested URL
        url: String,
    },

    /// JSON deserialization error while converting a raw object
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid request (e.g. empty object id)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl NautobotError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(e) => e.status(),
            Self::Api { status, .. } | Self::Authentication { status, .. } => Some(*status),
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::Serialization(_)
            | Self::InvalidResponse(_)
            | Self::InvalidRequest(_)
            | Self::InvalidConfig(_) => None,
        }
    }
}
