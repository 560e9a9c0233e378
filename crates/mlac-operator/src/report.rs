//! # Error Reporting
//!
//! Every failure in setup or message handling ends in exactly one call to
//! [`ErrorReporter::report`]. The reporter logs the failure and emits an
//! [`ErrorRecord`] to the error port, if one is connected. Reporting never
//! fails: a closed port is logged and ignored.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::params::{ParameterSource, PROCESS_NAME_KEY};
use crate::port::Port;

/// Operator name carried in logs and error records.
pub const OPERATOR_NAME: &str = "ArtifactConsumer";

/// Registered path of the operator in the graph repository.
pub const OPERATOR_PATH: &str = "com.sap.ml.artifact.consumer.v2";

/// The step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "MandatoryParameters")]
    MandatoryParameters,
    #[serde(rename = "incoming message")]
    IncomingMessage,
    #[serde(rename = "ML-API")]
    MlApi,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MandatoryParameters => "MandatoryParameters",
            Self::IncomingMessage => "incoming message",
            Self::MlApi => "ML-API",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operator entry point during which the failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Setup,
    InArtifact,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "Setup"),
            Self::InArtifact => write!(f, "InArtifact"),
        }
    }
}

/// Structured error event emitted on the error port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub operator_name: String,
    pub operator_path: String,
    pub operation: Operation,
    pub process_name: String,
    pub stage: Stage,
    pub message: String,
    /// RFC 3339, UTC, seconds precision.
    pub timestamp: String,
}

impl ErrorRecord {
    pub fn new(
        operation: Operation,
        stage: Stage,
        process_name: impl Into<String>,
        message: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            operator_name: OPERATOR_NAME.to_string(),
            operator_path: OPERATOR_PATH.to_string(),
            operation,
            process_name: process_name.into(),
            stage,
            message: message.into(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Logs failures and forwards them to the error port.
#[derive(Clone)]
pub struct ErrorReporter {
    params: Arc<dyn ParameterSource>,
    port: Option<Arc<dyn Port<ErrorRecord>>>,
}

impl fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("port", &self.port.as_ref().map(|_| "[connected]"))
            .finish()
    }
}

impl ErrorReporter {
    pub fn new(
        params: Arc<dyn ParameterSource>,
        port: Option<Arc<dyn Port<ErrorRecord>>>,
    ) -> Self {
        Self { params, port }
    }

    /// Report one failure.
    pub fn report(&self, operation: Operation, stage: Stage, err: &dyn std::error::Error) {
        let process_name = self.params.get_string(PROCESS_NAME_KEY);

        tracing::error!(
            operator = OPERATOR_NAME,
            operator_path = OPERATOR_PATH,
            %operation,
            %stage,
            process_name = %process_name,
            "{OPERATOR_NAME}: {stage}: {operation}: {err}"
        );

        let Some(port) = &self.port else {
            return;
        };
        let record = ErrorRecord::new(operation, stage, process_name, err.to_string(), Utc::now());
        if let Err(e) = port.send(record) {
            tracing::debug!(operator = OPERATOR_NAME, "dropping error record: {e}");
        }
    }
}
