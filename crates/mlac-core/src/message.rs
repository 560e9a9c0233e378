//! # Graph Message Model
//!
//! The operator consumes and produces graph messages of the shape
//! `{ "attributes": { ... }, "body": ... }`. Only `artifact` is decoded into a
//! typed form; it must carry a non-empty string `id`.
//!
//! `file` is written, never read. An inbound `file` of any shape stays in the
//! pass-through map until [`Message::attach_file`] replaces it. All remaining
//! attributes, and the body (including its absence), round-trip unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

use crate::error::ExtractionError;
use crate::identity::ArtifactId;

/// Marker placed in `file.connection.configurationType`.
pub const CONNECTION_MANAGEMENT: &str = "Connection Management";

/// Attribute key the resolved location is written under.
pub const FILE_ATTRIBUTE: &str = "file";

/// A message flowing through the pipeline graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub attributes: Attributes,
    /// `None` when the inbound message had no `body` key; an explicit
    /// `null` is kept as `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub body: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Message attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<ArtifactAttributes>,
    /// Attributes this operator does not interpret, `file` included.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// The `artifact` attribute of an inbound message.
///
/// `id` stays a raw JSON value until [`ArtifactAttributes::artifact_id`]
/// validates it, so a missing id and a mistyped id report differently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ArtifactAttributes {
    /// Validate and return the artifact identifier.
    pub fn artifact_id(&self) -> Result<ArtifactId, ExtractionError> {
        match &self.id {
            None => Err(ExtractionError::MissingId),
            Some(Value::String(s)) => ArtifactId::new(s.as_str()),
            Some(_) => Err(ExtractionError::IdNotString),
        }
    }
}

/// Storage location of an artifact, written into `attributes.file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLocation {
    pub connection: Connection,
    pub path: String,
}

/// Reference to a pre-configured storage connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(rename = "configurationType")]
    pub configuration_type: String,
    #[serde(rename = "connectionID")]
    pub connection_id: String,
}

impl FileLocation {
    /// Build a descriptor managed through Connection Management.
    pub fn new(connection_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            connection: Connection {
                configuration_type: CONNECTION_MANAGEMENT.to_string(),
                connection_id: connection_id.into(),
            },
            path: path.into(),
        }
    }
}

impl From<FileLocation> for Value {
    fn from(file: FileLocation) -> Self {
        json!({
            "connection": {
                "configurationType": file.connection.configuration_type,
                "connectionID": file.connection.connection_id,
            },
            "path": file.path,
        })
    }
}

impl Message {
    /// Decode a message from its JSON text form.
    pub fn from_json(raw: &str) -> Result<Self, ExtractionError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Decode a message from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, ExtractionError> {
        Ok(serde_json::from_value(value)?)
    }

    /// The artifact identifier this message refers to.
    pub fn artifact_id(&self) -> Result<ArtifactId, ExtractionError> {
        self.attributes
            .artifact
            .as_ref()
            .ok_or(ExtractionError::MissingArtifact)?
            .artifact_id()
    }

    /// Record the resolved storage location, replacing any previous `file`
    /// attribute whatever its shape.
    pub fn attach_file(&mut self, file: FileLocation) {
        self.attributes
            .other
            .insert(FILE_ATTRIBUTE.to_string(), file.into());
    }

    /// The `file` attribute, if present and shaped as a [`FileLocation`].
    pub fn file(&self) -> Option<FileLocation> {
        self.attributes
            .other
            .get(FILE_ATTRIBUTE)
            .and_then(|v| FileLocation::deserialize(v).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn msg(value: Value) -> Message {
        Message::from_value(value).unwrap()
    }

    #[test]
    fn extracts_string_id() {
        let m = msg(json!({"attributes": {"artifact": {"id": "art-1"}}}));
        assert_eq!(m.artifact_id().unwrap().as_str(), "art-1");
    }

    #[test]
    fn missing_artifact_attributes() {
        let m = msg(json!({"attributes": {"other": 1}}));
        assert!(matches!(m.artifact_id(), Err(ExtractionError::MissingArtifact)));
    }

    #[test]
    fn missing_id() {
        let m = msg(json!({"attributes": {"artifact": {"name": "model"}}}));
        assert!(matches!(m.artifact_id(), Err(ExtractionError::MissingId)));
    }

    #[test]
    fn non_string_id() {
        let m = msg(json!({"attributes": {"artifact": {"id": 42}}}));
        assert!(matches!(m.artifact_id(), Err(ExtractionError::IdNotString)));
    }

    #[test]
    fn empty_id() {
        let m = msg(json!({"attributes": {"artifact": {"id": ""}}}));
        assert!(matches!(m.artifact_id(), Err(ExtractionError::EmptyId)));
    }

    #[test]
    fn non_object_artifact_is_malformed() {
        let result = Message::from_value(json!({"attributes": {"artifact": "art-1"}}));
        assert!(matches!(result, Err(ExtractionError::MalformedMessage(_))));
    }

    #[test]
    fn unknown_attributes_and_body_pass_through() {
        let input = json!({
            "attributes": {
                "artifact": {"id": "art-1", "kind": "model"},
                "message.commit.token": "t-9"
            },
            "body": {"rows": [1, 2, 3]}
        });
        let m = msg(input.clone());
        assert_eq!(serde_json::to_value(&m).unwrap(), input);
    }

    #[test]
    fn attached_file_serializes_with_wire_names() {
        let mut m = msg(json!({"attributes": {"artifact": {"id": "art-1"}}, "body": null}));
        m.attach_file(FileLocation::new("myConn", "/folder/file.csv"));
        let out = serde_json::to_value(&m).unwrap();
        assert_eq!(
            out["attributes"]["file"],
            json!({
                "connection": {
                    "configurationType": "Connection Management",
                    "connectionID": "myConn"
                },
                "path": "/folder/file.csv"
            })
        );
        assert_eq!(out["attributes"]["artifact"]["id"], "art-1");
    }

    #[test]
    fn upstream_file_of_any_shape_is_accepted_and_replaced() {
        for upstream in [
            json!("s3://legacy"),
            json!({"connection": {"configurationType": "Manual"}, "path": "/old"}),
        ] {
            let mut m = msg(json!({
                "attributes": {"artifact": {"id": "art-1"}, "file": upstream.clone()}
            }));
            assert_eq!(m.attributes.other["file"], upstream);
            assert_eq!(m.file(), None);

            m.attach_file(FileLocation::new("c", "/p"));
            assert_eq!(m.file(), Some(FileLocation::new("c", "/p")));
        }
    }

    #[test]
    fn absent_body_stays_absent() {
        let input = json!({"attributes": {"artifact": {"id": "art-1"}}});
        let m = msg(input.clone());
        assert_eq!(m.body, None);
        assert_eq!(serde_json::to_value(&m).unwrap(), input);
    }

    #[test]
    fn null_body_is_kept() {
        let input = json!({"attributes": {}, "body": null});
        let m = msg(input.clone());
        assert_eq!(m.body, Some(Value::Null));
        assert_eq!(serde_json::to_value(&m).unwrap(), input);
    }

    #[test]
    fn from_json_rejects_invalid_text() {
        assert!(matches!(
            Message::from_json("{not json"),
            Err(ExtractionError::MalformedMessage(_))
        ));
    }
}
