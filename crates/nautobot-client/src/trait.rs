//! NautobotClient trait for mocking
//!
//! This trait abstracts the raw fetch so the mapping functions in
//! [`crate::common::query`] run unchanged against the real client or a mock.

use crate::error::NautobotError;
use serde_json::Value;

/// Trait for Nautobot API client operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait NautobotClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// GET `{base_url}/{endpoint}/` (or `.../{id}/`) and return the raw JSON body.
    ///
    /// Non-success statuses are errors; the body is not inspected further.
    async fn fetch(
        &self,
        endpoint: &str,
        id: Option<&str>,
        params: &[(&str, &str)],
    ) -> Result<Value, NautobotError>;
}
