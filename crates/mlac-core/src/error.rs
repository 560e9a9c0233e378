//! # Error Types
//!
//! Errors raised while reading an inbound message or decomposing a storage
//! URI. Both are terminal for the message being processed.

use thiserror::Error;

/// The inbound message does not carry a usable artifact identifier.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The message has no `artifact` attribute.
    #[error("message has no artifact attributes")]
    MissingArtifact,

    /// The artifact attributes have no `id` field.
    #[error("artifactID is missing")]
    MissingId,

    /// The `id` field is present but is not a JSON string.
    #[error("artifactID is not a string")]
    IdNotString,

    /// The `id` field is an empty string.
    #[error("artifactID is empty")]
    EmptyId,

    /// The raw payload could not be decoded into a message at all.
    #[error("malformed message: {0}")]
    MalformedMessage(#[from] serde_json::Error),
}

/// The artifact URI could not be decomposed into a storage location.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    /// The URI carries a scheme outside the `dh-dl` storage family.
    #[error("unspecified protocol {0:?}")]
    UnspecifiedProtocol(String),
}
