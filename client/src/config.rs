//! Client configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
const DEFAULT_WS_URL: &str = "ws://localhost:3000";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Configuration values controlling ride service endpoints and timeouts.
///
/// Field defaults are supplied through the derive so loading succeeds with
/// no environment, file, or CLI input at all.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RIDE_CLIENT")]
pub struct ClientSettings {
    /// Base URL for the ride REST endpoints.
    #[ortho_config(default = DEFAULT_API_BASE_URL.to_owned())]
    pub api_base_url: String,
    /// WebSocket URL for push events.
    #[ortho_config(default = DEFAULT_WS_URL.to_owned())]
    pub ws_url: String,
    /// Whole-request timeout for REST calls, in milliseconds.
    #[ortho_config(default = DEFAULT_REQUEST_TIMEOUT_MS)]
    pub request_timeout_ms: u64,
    /// Optional bearer token attached to REST calls.
    pub access_token: Option<String>,
}

impl ClientSettings {
    /// Parse the configured REST base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a valid URL.
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.api_base_url)
    }

    /// Parse the configured push URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a valid URL.
    pub fn ws_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.ws_url)
    }

    /// Return the configured request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
