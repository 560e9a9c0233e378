//! Failures of the artifact metadata lookup.
//!
//! Every lookup variant names the artifact it was resolving, so an error
//! record on its own says which message could not be routed.

/// Errors from ML API calls.
#[derive(Debug, thiserror::Error)]
pub enum MlApiError {
    /// No response arrived within the configured request timeout.
    #[error("metadata lookup for artifact {artifact_id} timed out after {timeout_secs}s")]
    Timeout {
        artifact_id: String,
        timeout_secs: u64,
    },
    /// The request never produced a response: refused, reset, DNS, TLS.
    #[error("metadata lookup for artifact {artifact_id} could not reach the ML API: {source}")]
    Unreachable {
        artifact_id: String,
        source: reqwest::Error,
    },
    /// The ML API answered with a non-2xx status.
    #[error("ML API answered {status} for artifact {artifact_id}: {body}")]
    Status {
        artifact_id: String,
        status: u16,
        body: String,
    },
    /// The response body is not artifact metadata with a `URI`.
    #[error("metadata for artifact {artifact_id} is unusable: {source}")]
    InvalidMetadata {
        artifact_id: String,
        source: reqwest::Error,
    },
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build the ML API HTTP client: {0}")]
    ClientInit(#[source] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl MlApiError {
    /// Whether the failure was the request timeout elapsing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// The artifact whose lookup failed, if the failure belongs to one.
    pub fn artifact_id(&self) -> Option<&str> {
        match self {
            Self::Timeout { artifact_id, .. }
            | Self::Unreachable { artifact_id, .. }
            | Self::Status { artifact_id, .. }
            | Self::InvalidMetadata { artifact_id, .. } => Some(artifact_id),
            Self::ClientInit(_) | Self::Config(_) => None,
        }
    }
}
