//! # Parse-URI Subcommand
//!
//! Shows how an artifact URI decomposes into the scheme, connection id and
//! path that `InArtifact` would attach. No network access.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use mlac_core::uri::StorageLocation;

/// Arguments for the `mlac parse-uri` subcommand.
#[derive(Args, Debug)]
pub struct ParseUriArgs {
    /// Artifact URI, e.g. dh-dl-s3://myConn/folder/file.csv
    #[arg(value_name = "URI")]
    pub uri: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct ParsedUri {
    scheme: String,
    #[serde(rename = "connectionID")]
    connection_id: String,
    path: String,
}

/// Execute the parse-uri subcommand.
///
/// Returns exit code: 0 when the URI is accepted, 1 when its scheme is not
/// a storage scheme.
pub fn run_parse_uri(args: &ParseUriArgs) -> Result<u8> {
    match StorageLocation::parse(&args.uri) {
        Ok(location) => {
            let parsed = ParsedUri {
                scheme: location.scheme,
                connection_id: location.connection_id,
                path: location.path,
            };
            println!("{}", serde_json::to_string_pretty(&parsed)?);
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {e}");
            Ok(1)
        }
    }
}
