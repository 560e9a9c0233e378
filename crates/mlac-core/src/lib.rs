//! # mlac-core — Foundational Types for the ML Artifact Consumer
//!
//! Defines the data the artifact-consumer operator reads and writes. The
//! crate performs no I/O; the HTTP lookup lives in `mlac-ml-client` and the
//! operator lifecycle in `mlac-operator`.
//!
//! ## Key Design Principles
//!
//! 1. **Typed messages.** Inbound graph messages are decoded into [`Message`]
//!    with a typed optional `artifact` attribute. Every other attribute, an
//!    inbound `file` included, and the body pass through untouched.
//!
//! 2. **Validated identifiers.** An [`ArtifactId`] is never empty. Extraction
//!    from a message distinguishes a missing id, a non-string id and an empty
//!    one.
//!
//! 3. **Literal URI decomposition.** [`uri::split_scheme`] and
//!    [`uri::split_leading_segment`] guarantee that the connection id and the
//!    path concatenate back to the post-scheme URI.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mlac-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod message;
pub mod uri;

pub use error::{ExtractionError, UriError};
pub use identity::ArtifactId;
pub use message::{
    ArtifactAttributes, Attributes, Connection, FileLocation, Message,
    CONNECTION_MANAGEMENT, FILE_ATTRIBUTE,
};
pub use uri::{split_leading_segment, split_scheme, StorageLocation, STORAGE_SCHEME_MARKER};
