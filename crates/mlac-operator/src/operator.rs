//! # ArtifactConsumer
//!
//! Resolves the artifact referenced by an inbound message to its storage
//! location and forwards the message with that location attached.
//!
//! ## Lifecycle
//!
//! 1. **Setup** — resolve the ML API endpoint (write-once), then check the
//!    mandatory parameters. Failures are reported, never raised.
//! 2. **InArtifact** — per message: extract the artifact id, look up its
//!    metadata, split the URI into connection id and path, attach
//!    `attributes.file`, forward. Each failure is reported once and the
//!    message is dropped.

use std::sync::{Arc, OnceLock};

use mlac_core::{split_leading_segment, split_scheme, ArtifactId, FileLocation, Message};
use mlac_ml_client::{MlApiConfig, MlClient};

use crate::error::ConsumerError;
use crate::params::{check_mandatory_parameters, ConfigurationError, ParameterSource};
use crate::port::Port;
use crate::report::{ErrorRecord, ErrorReporter, Operation, Stage, OPERATOR_NAME};

/// The artifact consumer operator.
///
/// `Send + Sync`; share it behind an `Arc` to handle messages concurrently.
pub struct ArtifactConsumer {
    api_config: MlApiConfig,
    client: OnceLock<MlClient>,
    params: Arc<dyn ParameterSource>,
    out_artifact: Option<Arc<dyn Port<Message>>>,
    reporter: ErrorReporter,
}

impl std::fmt::Debug for ArtifactConsumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactConsumer")
            .field("api_config", &self.api_config)
            .field("endpoint", &self.client.get().map(|c| c.endpoint().as_str()))
            .field("out_artifact", &self.out_artifact.as_ref().map(|_| "[connected]"))
            .field("reporter", &self.reporter)
            .finish()
    }
}

/// Wires an [`ArtifactConsumer`] to its collaborators.
pub struct ArtifactConsumerBuilder {
    api_config: MlApiConfig,
    params: Arc<dyn ParameterSource>,
    out_artifact: Option<Arc<dyn Port<Message>>>,
    out_error: Option<Arc<dyn Port<ErrorRecord>>>,
}

impl ArtifactConsumerBuilder {
    /// Connect the outbound artifact port.
    pub fn out_artifact(mut self, port: impl Port<Message> + 'static) -> Self {
        let port: Arc<dyn Port<Message>> = Arc::new(port);
        self.out_artifact = Some(port);
        self
    }

    /// Connect the error port.
    pub fn out_error(mut self, port: impl Port<ErrorRecord> + 'static) -> Self {
        let port: Arc<dyn Port<ErrorRecord>> = Arc::new(port);
        self.out_error = Some(port);
        self
    }

    pub fn build(self) -> ArtifactConsumer {
        ArtifactConsumer {
            api_config: self.api_config,
            client: OnceLock::new(),
            reporter: ErrorReporter::new(self.params.clone(), self.out_error),
            params: self.params,
            out_artifact: self.out_artifact,
        }
    }
}

impl ArtifactConsumer {
    /// Start building an operator with no ports connected.
    pub fn builder(
        api_config: MlApiConfig,
        params: Arc<dyn ParameterSource>,
    ) -> ArtifactConsumerBuilder {
        ArtifactConsumerBuilder {
            api_config,
            params,
            out_artifact: None,
            out_error: None,
        }
    }

    /// The resolved ML API client, once setup has run.
    pub fn client(&self) -> Option<&MlClient> {
        self.client.get()
    }

    /// Run setup, reporting any failure under the `Setup` stage.
    pub fn setup(&self) {
        if let Err(e) = self.try_setup() {
            self.reporter.report(e.operation(), Stage::Setup, &e);
        }
    }

    /// Resolve the endpoint and validate mandatory parameters.
    ///
    /// The endpoint is recorded before validation, so it stays available
    /// even when the parameter check fails. Later calls keep the first
    /// recorded endpoint.
    pub fn try_setup(&self) -> Result<(), ConsumerError> {
        let client = match self.client.get() {
            Some(client) => client,
            None => {
                let client =
                    MlClient::new(self.api_config.clone()).map_err(ConfigurationError::Client)?;
                self.client.get_or_init(|| client)
            }
        };
        tracing::info!(
            operator = OPERATOR_NAME,
            endpoint = %client.endpoint(),
            "using ML API endpoint"
        );

        check_mandatory_parameters(self.params.as_ref())?;
        Ok(())
    }

    /// Handle one inbound message.
    ///
    /// On success the message, with `attributes.file` set, goes to the
    /// outbound port. On failure one error record is emitted and nothing is
    /// forwarded.
    pub async fn in_artifact(&self, message: Message) {
        tracing::info!(operator = OPERATOR_NAME, "incoming message");
        match self.try_in_artifact(message).await {
            Ok(message) => self.forward(message),
            Err(e) => self.reporter.report(e.operation(), Stage::InArtifact, &e),
        }
    }

    /// Decode a JSON message and handle it.
    ///
    /// Undecodable input is reported as an `incoming message` failure.
    pub async fn in_artifact_json(&self, raw: &str) {
        match Message::from_json(raw) {
            Ok(message) => self.in_artifact(message).await,
            Err(e) => {
                self.reporter
                    .report(Operation::IncomingMessage, Stage::InArtifact, &ConsumerError::from(e));
            }
        }
    }

    /// Resolve and attach the file location without reporting or forwarding.
    pub async fn try_in_artifact(&self, mut message: Message) -> Result<Message, ConsumerError> {
        let artifact_id = message.artifact_id()?;
        tracing::info!(operator = OPERATOR_NAME, %artifact_id, "found artifactID");

        let file = self.receive_file_location(&artifact_id).await?;
        tracing::info!(
            operator = OPERATOR_NAME,
            %artifact_id,
            connection_id = %file.connection.connection_id,
            path = %file.path,
            "resolved file location"
        );

        message.attach_file(file);
        Ok(message)
    }

    async fn receive_file_location(
        &self,
        artifact_id: &ArtifactId,
    ) -> Result<FileLocation, ConsumerError> {
        let client = self.client.get().ok_or(ConsumerError::NotSetUp)?;
        let metadata = client.artifacts().get(artifact_id).await?;

        // The scheme only gates the storage family; it is not forwarded.
        let (protocol, path) = split_scheme(&metadata.uri)?;
        tracing::debug!(operator = OPERATOR_NAME, protocol, path, "parsed artifact URI");

        let (connection_id, path) = split_leading_segment(path);
        Ok(FileLocation::new(connection_id, path))
    }

    fn forward(&self, message: Message) {
        let Some(port) = &self.out_artifact else {
            return;
        };
        if let Err(e) = port.send(message) {
            tracing::warn!(operator = OPERATOR_NAME, "outbound message dropped: {e}");
        }
    }
}
