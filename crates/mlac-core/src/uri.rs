//! # Storage URI Parsing
//!
//! Artifact URIs returned by the metadata service take one of two forms:
//!
//! - `dh-dl-<store>://<connectionID>/<path>` — data-lake storage, or
//! - `<connectionID>/<path>` — no scheme.
//!
//! Any other scheme is rejected. The connection id is the first
//! `/`-delimited token; the path is the remainder, including its leading `/`.

use crate::error::UriError;

/// Substring a scheme must contain to be accepted.
pub const STORAGE_SCHEME_MARKER: &str = "dh-dl";

const SCHEME_SEPARATOR: &str = "://";

/// Split `uri` into `(scheme, path)`.
///
/// Splits at the first `"://"`. The scheme must contain
/// [`STORAGE_SCHEME_MARKER`]. A URI without `"://"` yields an empty scheme
/// and the whole input as path.
pub fn split_scheme(uri: &str) -> Result<(&str, &str), UriError> {
    match uri.split_once(SCHEME_SEPARATOR) {
        Some((scheme, path)) if scheme.contains(STORAGE_SCHEME_MARKER) => Ok((scheme, path)),
        Some((scheme, _)) => Err(UriError::UnspecifiedProtocol(scheme.to_string())),
        None => Ok(("", uri)),
    }
}

/// Split `path` into its leading `/`-delimited segment and the remainder.
///
/// The remainder is `path` with the first occurrence of the segment removed.
/// Since the segment is always a prefix, `segment + remainder == path`.
pub fn split_leading_segment(path: &str) -> (String, String) {
    let segment = path.split('/').next().unwrap_or_default();
    let remainder = path.replacen(segment, "", 1);
    (segment.to_string(), remainder)
}

/// A fully decomposed artifact URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    /// Scheme, empty when the URI had none.
    pub scheme: String,
    pub connection_id: String,
    pub path: String,
}

impl StorageLocation {
    /// Decompose an artifact URI.
    pub fn parse(uri: &str) -> Result<Self, UriError> {
        let (scheme, rest) = split_scheme(uri)?;
        let (connection_id, path) = split_leading_segment(rest);
        Ok(Self {
            scheme: scheme.to_string(),
            connection_id,
            path,
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Segment and remainder concatenate back to the input, and the
        /// remainder equals a single first-occurrence removal of the segment.
        #[test]
        fn leading_segment_round_trip(uri in "[a-zA-Z0-9_./-]{0,64}") {
            let (segment, remainder) = split_leading_segment(&uri);
            prop_assert!(!segment.contains('/'));
            prop_assert!(uri.starts_with(&segment));
            prop_assert_eq!(format!("{segment}{remainder}"), uri.clone());
            prop_assert_eq!(uri.replacen(&segment, "", 1), remainder);
        }

        /// Scheme-less URIs are never rejected and keep their full text as path.
        #[test]
        fn schemeless_uri_passes_through(uri in "[a-zA-Z0-9_./-]{0,64}") {
            let (scheme, path) = split_scheme(&uri).unwrap();
            prop_assert_eq!(scheme, "");
            prop_assert_eq!(path, uri.as_str());
        }
    }
}
