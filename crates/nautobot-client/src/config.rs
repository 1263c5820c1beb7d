//! Client configuration
//!
//! Built once at process start and handed to [`crate::NautobotClient::new`].
//! Nothing here is global: two clients with different configs can coexist.

use std::env;
use tracing::warn;

/// Environment variable holding the Nautobot base URL (including `/api`)
pub const BASE_URL_ENV: &str = "NAUTOBOT_API_BASE_URL";
/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "NAUTOBOT_API_TOKEN";
/// Environment variable enabling acceptance of invalid TLS certificates
pub const ACCEPT_INVALID_CERTS_ENV: &str = "NAUTOBOT_ACCEPT_INVALID_CERTS";

/// Placeholder base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://nautobot.yourorganization.com";
/// Placeholder token used when none is configured
pub const DEFAULT_TOKEN: &str = "YourSecureTokenHere";

/// Connection settings for a Nautobot instance
#[derive(Clone, PartialEq, Eq)]
pub struct NautobotConfig {
    /// Base URL, without trailing slash (e.g. `https://nautobot.example.com/api`)
    pub base_url: String,
    /// API token, sent as `Authorization: Token <token>`
    pub token: String,
    /// Skip TLS certificate verification. Off unless explicitly requested.
    pub accept_invalid_certs: bool,
}

impl NautobotConfig {
    /// Create a config with certificate verification enabled
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            accept_invalid_certs: false,
        }
    }

    /// Opt in to (or out of) accepting invalid TLS certificates
    #[must_use]
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Load configuration from the process environment.
    ///
    /// Unset or empty URL/token fall back to [`DEFAULT_BASE_URL`] and
    /// [`DEFAULT_TOKEN`]; requests made with those placeholders will fail
    /// against any real server, which surfaces as an ordinary request error.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] but reading from an arbitrary lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = non_empty(BASE_URL_ENV).unwrap_or_else(|| {
            warn!("{} not set, using placeholder {}", BASE_URL_ENV, DEFAULT_BASE_URL);
            DEFAULT_BASE_URL.to_string()
        });
        let token = non_empty(TOKEN_ENV).unwrap_or_else(|| {
            warn!("{} not set, using placeholder token", TOKEN_ENV);
            DEFAULT_TOKEN.to_string()
        });
        let accept_invalid_certs = non_empty(ACCEPT_INVALID_CERTS_ENV)
            .is_some_and(|v| parse_flag(&v));

        Self::new(base_url, token).with_accept_invalid_certs(accept_invalid_certs)
    }
}

// Keep the token out of logs and panic messages.
impl std::fmt::Debug for NautobotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NautobotConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
