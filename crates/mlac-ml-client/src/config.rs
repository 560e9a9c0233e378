//! ML API client configuration.
//!
//! Configures the base endpoint of the artifact-metadata service. Defaults
//! point to the in-cluster system endpoint. Override via environment
//! variables or explicit construction for testing.

use url::Url;
use zeroize::Zeroizing;

/// Default in-cluster endpoint of the ML API.
pub const DEFAULT_ENDPOINT: &str = "http://vsystem-internal:8796/app/ml-api/api";

/// Request timeout applied to every metadata lookup.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for connecting to the ML artifact-metadata service.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct MlApiConfig {
    /// Base endpoint; the API version segment is appended per request.
    pub endpoint: Url,
    /// Optional bearer token for API authentication.
    pub api_token: Option<Zeroizing<String>>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for MlApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MlApiConfig")
            .field("endpoint", &self.endpoint)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl MlApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `VSYSTEM_ENDPOINT` (default: `http://vsystem-internal:8796/app/ml-api/api`)
    /// - `VSYSTEM_API_TOKEN` (optional)
    ///
    /// The timeout is always [`DEFAULT_TIMEOUT_SECS`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: env_url("VSYSTEM_ENDPOINT", DEFAULT_ENDPOINT)?,
            api_token: std::env::var("VSYSTEM_API_TOKEN")
                .ok()
                .filter(|t| !t.is_empty())
                .map(Zeroizing::new),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Create a configuration from an explicit endpoint.
    pub fn with_endpoint(endpoint: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: Url::parse(endpoint)
                .map_err(|e| ConfigError::InvalidUrl(endpoint.to_string(), e.to_string()))?,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        let mut config = Self::with_endpoint(&format!("http://127.0.0.1:{port}"))?;
        config.timeout_secs = 5;
        Ok(config)
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("API token is not a valid header value")]
    InvalidToken,
    #[error("endpoint {0} cannot be used as a base URL")]
    NotABase(String),
}
