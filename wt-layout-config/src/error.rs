//! Typed error variants for the wt-layout-config crate.
//!
//! Callers that embed the compiler can match on these instead of opaque
//! strings when a configuration document is rejected.

use std::fmt;

/// Errors that can occur when loading configuration.
///
/// # Example
///
/// ```rust
/// use wt_layout_config::{ConfigError, LayoutConfig};
///
/// match LayoutConfig::from_yaml_str("host: 42") {
///     Err(ConfigError::Parse(e)) => eprintln!("YAML parse error: {e}"),
///     Err(ConfigError::Validation(msg)) => eprintln!("Validation: {msg}"),
///     Ok(_) => unreachable!(),
/// }
/// ```
#[derive(Debug)]
pub enum ConfigError {
    /// The document contained invalid YAML or did not match the schema.
    Parse(serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "YAML parse error in config: {e}"),
            ConfigError::Validation(msg) => write!(f, "Config validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

impl From<serde_yaml_ng::Error> for ConfigError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        ConfigError::Parse(e)
    }
}
