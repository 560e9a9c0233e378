//! # mlac-operator — The ArtifactConsumer Pipeline Operator
//!
//! On each inbound message carrying an artifact id, queries the ML API for
//! the artifact's storage URI, decomposes it into a connection id and a
//! path, writes that location into the message's `file` attribute and
//! forwards the message.
//!
//! ## Collaborators
//!
//! The host runtime is represented by three seams:
//!
//! - [`ParameterSource`] — injected string parameters (`apiVersion`,
//!   `processName`).
//! - [`Port`]`<Message>` — the optional outbound artifact port.
//! - [`Port`]`<ErrorRecord>` — the optional error port.
//!
//! ## Failure Policy
//!
//! No retries. Every failure is terminal for its message and produces
//! exactly one [`ErrorRecord`]; nothing is re-raised to the host.

pub mod error;
pub mod operator;
pub mod params;
pub mod port;
pub mod report;

pub use error::ConsumerError;
pub use operator::{ArtifactConsumer, ArtifactConsumerBuilder};
pub use params::{
    ConfigurationError, EnvParameters, ParameterSource, StaticParameters, API_VERSION_KEY,
    PROCESS_NAME_KEY, SUPPORTED_API_VERSION,
};
pub use port::{ChannelPort, Port, PortError};
pub use report::{ErrorRecord, ErrorReporter, Operation, Stage, OPERATOR_NAME, OPERATOR_PATH};
