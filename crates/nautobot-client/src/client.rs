//! Nautobot API client
//!
//! Read-only access to the DCIM collections under `{base_url}/dcim/...`.
//! Every call is a single GET; there is no retry and no pagination beyond
//! the first page of `results`.

use crate::common::query;
use crate::common::HttpClient;
use crate::config::NautobotConfig;
use crate::error::NautobotError;
use crate::models::{Device, GenericObject, Location, Rack, RackGroup};
use crate::nautobot_trait::NautobotClientTrait;
use crate::resource::{Collection, ResourceMap};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Per-request timeout applied by the underlying HTTP client.
///
/// Fixed and not configurable. A collection page slower than this fails
/// with [`NautobotError::Http`] instead of waiting indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Nautobot API client
#[derive(Debug, Clone)]
pub struct NautobotClient {
    http: HttpClient,
}

impl NautobotClient {
    /// Create a new Nautobot client
    ///
    /// # Arguments
    /// * `config` - Base URL, token and TLS policy
    pub fn new(config: &NautobotConfig) -> Result<Self, NautobotError> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(NautobotError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got {:?}",
                config.base_url
            )));
        }
        if config.accept_invalid_certs {
            warn!(
                "TLS certificate verification is disabled for {}",
                config.base_url
            );
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(NautobotError::Http)?;

        debug!("Created Nautobot client for {}", config.base_url);
        Ok(Self {
            http: HttpClient::new(client, &config.base_url, config.token.clone()),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Fetch one record of type `R` by id.
    ///
    /// A blank id is rejected with [`NautobotError::InvalidRequest`] rather
    /// than read as the whole collection; use [`list`](Self::list) for that.
    pub async fn get<R: Collection>(
        &self,
        id: &str,
        params: &[(&str, &str)],
    ) -> Result<R, NautobotError> {
        query::get_resource(self, id, params).await
    }

    /// Fetch the first page of `R`'s collection, keyed by id
    pub async fn list<R: Collection>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<ResourceMap<R>, NautobotError> {
        query::list_resources(self, params).await
    }

    /// Fetch one object of an arbitrary endpoint (e.g. `dcim/sites`)
    pub async fn get_object(
        &self,
        endpoint: &str,
        id: &str,
        params: &[(&str, &str)],
    ) -> Result<GenericObject, NautobotError> {
        query::get_object(self, endpoint, id, params).await
    }

    /// List objects of an arbitrary endpoint
    pub async fn list_objects(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<ResourceMap<GenericObject>, NautobotError> {
        query::list_objects(self, endpoint, params).await
    }

    /// Get a location by ID
    pub async fn get_location(&self, id: &str) -> Result<Location, NautobotError> {
        self.get(id, &[]).await
    }

    /// Query locations
    pub async fn query_locations(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<ResourceMap<Location>, NautobotError> {
        self.list(filters).await
    }

    /// Get a rack group by ID
    pub async fn get_rack_group(&self, id: &str) -> Result<RackGroup, NautobotError> {
        self.get(id, &[]).await
    }

    /// Query rack groups
    pub async fn query_rack_groups(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<ResourceMap<RackGroup>, NautobotError> {
        self.list(filters).await
    }

    /// Get a rack by ID
    pub async fn get_rack(&self, id: &str) -> Result<Rack, NautobotError> {
        self.get(id, &[]).await
    }

    /// Query racks
    pub async fn query_racks(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<ResourceMap<Rack>, NautobotError> {
        self.list(filters).await
    }

    /// Get a device by ID
    pub async fn get_device(&self, id: &str) -> Result<Device, NautobotError> {
        self.get(id, &[]).await
    }

    /// Query devices
    pub async fn query_devices(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<ResourceMap<Device>, NautobotError> {
        self.list(filters).await
    }
}

#[async_trait::async_trait]
impl NautobotClientTrait for NautobotClient {
    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn fetch(
        &self,
        endpoint: &str,
        id: Option<&str>,
        params: &[(&str, &str)],
    ) -> Result<Value, NautobotError> {
        self.http.get_json(endpoint, id, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = NautobotClient::new(&NautobotConfig::new("https://nautobot.lab/api//", "t"))
            .expect("client");
        assert_eq!(client.base_url(), "https://nautobot.lab/api");
    }

    #[test]
    fn test_new_rejects_non_http_url() {
        let err = NautobotClient::new(&NautobotConfig::new("nautobot.lab/api", "t"))
            .expect_err("scheme required");
        assert!(matches!(err, NautobotError::InvalidConfig(_)));
    }

    #[test]
    fn test_new_accepts_insecure_opt_in() {
        let config = NautobotConfig::new("https://nautobot.lab/api", "t").with_accept_invalid_certs(true);
        assert!(NautobotClient::new(&config).is_ok());
    }
}
