//! Typed client for the ML API artifacts resource.
//!
//! | Method | Path (relative to endpoint) | Operation |
//! |--------|-----------------------------|-----------|
//! | GET    | `/v1/artifacts/{artifactId}` | Get artifact metadata |

use mlac_core::ArtifactId;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::error::MlApiError;

/// API version path segment.
pub const API_VERSION: &str = "v1";

// -- Types matching ML API schemas --------------------------------------------

/// Artifact metadata as returned by the ML API.
///
/// Only `URI` is required. The live API returns further fields that are not
/// modeled here; unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Storage location, e.g. `dh-dl-s3://myConn/folder/file.csv`.
    #[serde(rename = "URI")]
    pub uri: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
}

// -- Client -------------------------------------------------------------------

/// Client for the ML API artifacts resource.
#[derive(Debug, Clone)]
pub struct ArtifactClient {
    http: reqwest::Client,
    base_url: url::Url,
    timeout_secs: u64,
}

impl ArtifactClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url, timeout_secs: u64) -> Self {
        Self {
            http,
            base_url,
            timeout_secs,
        }
    }

    /// Build `{base_url}/v1/artifacts/{id}`, percent-encoding the id.
    pub fn artifact_url(&self, id: &ArtifactId) -> Result<url::Url, MlApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConfigError::NotABase(self.base_url.to_string()))?
            .pop_if_empty()
            .extend([API_VERSION, "artifacts", id.as_str()]);
        Ok(url)
    }

    /// Fetch metadata for one artifact.
    ///
    /// Calls `GET {base_url}/v1/artifacts/{id}`. A single attempt; any
    /// transport failure, non-2xx status or undecodable body is an error.
    pub async fn get(&self, id: &ArtifactId) -> Result<ArtifactMetadata, MlApiError> {
        let url = self.artifact_url(id)?;

        tracing::debug!(%url, "requesting artifact metadata");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(id, e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(MlApiError::Status {
                artifact_id: id.to_string(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(id, e)
            } else {
                MlApiError::InvalidMetadata {
                    artifact_id: id.to_string(),
                    source: e,
                }
            }
        })
    }

    fn transport_error(&self, id: &ArtifactId, source: reqwest::Error) -> MlApiError {
        if source.is_timeout() {
            MlApiError::Timeout {
                artifact_id: id.to_string(),
                timeout_secs: self.timeout_secs,
            }
        } else {
            MlApiError::Unreachable {
                artifact_id: id.to_string(),
                source,
            }
        }
    }
}
