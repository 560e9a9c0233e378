//! # mlac-cli — ArtifactConsumer Command-Line Harness
//!
//! Runs the operator outside a graph runtime, for local checks against a
//! live or mocked ML API.
//!
//! ## Subcommands
//!
//! - `run` — setup, then InArtifact over JSON-lines messages
//! - `parse-uri` — decompose an artifact URI without network access
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to the operator crates.

pub mod logging;
pub mod output;
pub mod parse_uri;
pub mod run;
