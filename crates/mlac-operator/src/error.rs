//! Artifact consumer error taxonomy.

use mlac_core::{ExtractionError, UriError};
use mlac_ml_client::MlApiError;

use crate::params::ConfigurationError;
use crate::report::Operation;

/// Any failure of the artifact consumer.
#[derive(Debug, thiserror::Error)]
pub enum ConsumerError {
    /// Missing or invalid mandatory parameter. Fatal to setup only.
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),

    /// The inbound message carries no usable artifact id.
    #[error("{0}")]
    Extraction(#[from] ExtractionError),

    /// The metadata lookup failed: transport, timeout, status or body.
    #[error("{0}")]
    Lookup(#[from] MlApiError),

    /// The returned URI has an unrecognized scheme.
    #[error("{0}")]
    Parse(#[from] UriError),

    /// A message arrived before setup resolved the metadata endpoint.
    #[error("ML API endpoint has not been resolved; setup did not run")]
    NotSetUp,
}

impl ConsumerError {
    /// The operation label this failure is reported under.
    pub fn operation(&self) -> Operation {
        match self {
            Self::Configuration(_) => Operation::MandatoryParameters,
            Self::Extraction(_) => Operation::IncomingMessage,
            Self::Lookup(_) | Self::Parse(_) | Self::NotSetUp => Operation::MlApi,
        }
    }
}
