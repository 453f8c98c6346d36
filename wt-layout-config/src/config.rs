//! Top-level configuration document.

use crate::compile::CompileOptions;
use crate::error::ConfigError;
use crate::host::HostConfig;
use crate::sanitizer::SanitizerConfig;
use serde::{Deserialize, Serialize};

/// Everything the compiler and launcher can be told, in one document.
///
/// ```yaml
/// host:
///   executable: wt
///   window_target: "0"
///   launch_mode: auto
/// sanitizer:
///   markers:
///     - root_var: VIRTUAL_ENV
/// compile:
///   expand_variables: true
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub host: HostConfig,
    pub sanitizer: SanitizerConfig,
    pub compile: CompileOptions,
}

impl LayoutConfig {
    /// Parse a YAML document and validate the result.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        log::debug!(
            "Loaded layout config: host={:?}, {} marker set(s)",
            config.host.executable,
            config.sanitizer.markers.len()
        );
        Ok(config)
    }

    /// Check semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.executable.trim().is_empty() {
            return Err(ConfigError::Validation(
                "host.executable must not be empty".to_string(),
            ));
        }
        if let Some(target) = &self.host.window_target
            && target.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "host.window_target must not be empty when set".to_string(),
            ));
        }
        if !HostConfig::PRECISION_RANGE.contains(&self.host.size_precision) {
            return Err(ConfigError::Validation(format!(
                "host.size_precision must be between {} and {}, got {}",
                HostConfig::PRECISION_RANGE.start(),
                HostConfig::PRECISION_RANGE.end(),
                self.host.size_precision
            )));
        }
        for (i, markers) in self.sanitizer.markers.iter().enumerate() {
            if markers.root_var.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "sanitizer.markers[{i}].root_var must not be empty"
                )));
            }
            if markers.search_path_var.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "sanitizer.markers[{i}].search_path_var must not be empty"
                )));
            }
        }
        Ok(())
    }
}
