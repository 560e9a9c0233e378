//! # mlac-ml-client -- Typed Rust client for the ML artifact-metadata API
//!
//! Provides typed access to the artifacts resource of the ML API. The
//! artifact consumer uses it to resolve an artifact id to its storage URI.
//!
//! ## API Path Convention
//!
//! The configured endpoint is the API root. The full URL pattern is
//! `{endpoint}/{version}/{resource}`, for example
//! `http://vsystem-internal:8796/app/ml-api/api/v1/artifacts/{id}`.
//!
//! Requests are never retried: the caller treats every failure as terminal.

pub mod artifacts;
pub mod config;
pub mod error;

pub use artifacts::{ArtifactClient, ArtifactMetadata};
pub use config::MlApiConfig;
pub use error::MlApiError;

use std::time::Duration;

/// Top-level ML API client.
#[derive(Debug, Clone)]
pub struct MlClient {
    endpoint: url::Url,
    artifacts: ArtifactClient,
}

impl MlClient {
    /// Create a new ML API client from configuration.
    pub fn new(config: MlApiConfig) -> Result<Self, MlApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        if let Some(token) = &config.api_token {
            let mut value =
                reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                    .map_err(|_| MlApiError::Config(config::ConfigError::InvalidToken))?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(MlApiError::ClientInit)?;

        Ok(Self {
            artifacts: ArtifactClient::new(http, config.endpoint.clone(), config.timeout_secs),
            endpoint: config.endpoint,
        })
    }

    /// The resolved service endpoint.
    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }

    /// Access the artifacts client.
    pub fn artifacts(&self) -> &ArtifactClient {
        &self.artifacts
    }
}
