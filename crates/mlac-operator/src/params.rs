//! # Operator Parameters
//!
//! The host runtime injects string parameters into the operator. They are
//! read through [`ParameterSource`] so that the operator never touches
//! ambient global state.
//!
//! ## Parameters
//!
//! | Key | Required | Use |
//! |-----|----------|-----|
//! | `apiVersion` | yes, must be `"v1"` | mandatory-parameter check in setup |
//! | `processName` | no | carried in error records |

use std::collections::HashMap;

use mlac_ml_client::MlApiError;

/// Parameter key of the API version.
pub const API_VERSION_KEY: &str = "apiVersion";

/// Parameter key of the process name.
pub const PROCESS_NAME_KEY: &str = "processName";

/// The only API version this operator supports.
pub const SUPPORTED_API_VERSION: &str = "v1";

/// Read access to host-injected operator parameters.
pub trait ParameterSource: Send + Sync {
    /// Value of `key`, or `None` if the host did not set it.
    fn get(&self, key: &str) -> Option<String>;

    /// Value of `key`, empty if unset.
    fn get_string(&self, key: &str) -> String {
        self.get(key).unwrap_or_default()
    }
}

/// Parameters held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticParameters {
    values: HashMap<String, String>,
}

impl StaticParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl ParameterSource for StaticParameters {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Parameters read from environment variables.
///
/// `apiVersion` is looked up as `{prefix}API_VERSION`.
#[derive(Debug, Clone)]
pub struct EnvParameters {
    prefix: String,
}

impl EnvParameters {
    pub const DEFAULT_PREFIX: &'static str = "MLAC_";

    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Environment variable name for a camelCase parameter key.
    pub fn var_name(&self, key: &str) -> String {
        let mut name = self.prefix.clone();
        for (i, c) in key.chars().enumerate() {
            if c.is_ascii_uppercase() && i > 0 {
                name.push('_');
            }
            name.push(c.to_ascii_uppercase());
        }
        name
    }
}

impl Default for EnvParameters {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}

impl ParameterSource for EnvParameters {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(self.var_name(key)).ok()
    }
}

/// Setup-time configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("mandatory parameter {0:?} is not set")]
    MissingParameter(String),

    #[error("apiVersion should be {expected:?}, got {actual:?}")]
    UnsupportedApiVersion { expected: String, actual: String },

    /// The metadata-service client could not be built from its configuration.
    #[error("ML API client: {0}")]
    Client(#[from] MlApiError),
}

/// Read a parameter that must be present and non-empty.
pub fn check_mandatory_parameter(
    params: &dyn ParameterSource,
    key: &str,
) -> Result<String, ConfigurationError> {
    match params.get(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigurationError::MissingParameter(key.to_string())),
    }
}

/// Validate every mandatory operator parameter.
pub fn check_mandatory_parameters(params: &dyn ParameterSource) -> Result<(), ConfigurationError> {
    let version = check_mandatory_parameter(params, API_VERSION_KEY)?;
    if version != SUPPORTED_API_VERSION {
        return Err(ConfigurationError::UnsupportedApiVersion {
            expected: SUPPORTED_API_VERSION.to_string(),
            actual: version,
        });
    }
    Ok(())
}
