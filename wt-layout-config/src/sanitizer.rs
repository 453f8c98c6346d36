//! Virtual-environment marker configuration for the environment sanitizer.

use serde::{Deserialize, Serialize};

/// A saved variable that an activation script stashed away, and the
/// variable it should be restored into on deactivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreRule {
    /// Variable holding the pre-activation value (e.g. `_OLD_VIRTUAL_PATH`)
    pub saved: String,
    /// Variable the saved value is written back to (e.g. `PATH`)
    pub target: String,
}

impl RestoreRule {
    pub fn new(saved: &str, target: &str) -> Self {
        Self {
            saved: saved.to_string(),
            target: target.to_string(),
        }
    }
}

/// The variables one virtual-environment tool sets while it is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualEnvMarkers {
    /// Activation marker holding the environment root (e.g. `VIRTUAL_ENV`)
    pub root_var: String,

    /// Search-path variable the activation script prepended to
    #[serde(default = "crate::defaults::search_path_var")]
    pub search_path_var: String,

    /// Executable directories below the root (`Scripts` on Windows, `bin` elsewhere)
    #[serde(default = "crate::defaults::executable_dirs")]
    pub executable_dirs: Vec<String>,

    /// Extra variables removed outright
    #[serde(default)]
    pub clear_vars: Vec<String>,

    #[serde(default)]
    pub restore: Vec<RestoreRule>,
}

/// Settings for neutralizing an active virtual environment before spawning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    pub enabled: bool,

    pub markers: Vec<VirtualEnvMarkers>,

    /// Separator between search-path entries
    pub path_separator: char,

    /// Compare variable names and search-path entries case-insensitively (Windows)
    pub case_insensitive: bool,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            enabled: crate::defaults::bool_true(),
            markers: crate::defaults::markers(),
            path_separator: crate::defaults::path_separator(),
            case_insensitive: crate::defaults::case_insensitive(),
        }
    }
}

impl SanitizerConfig {
    /// A configuration that passes every variable through unchanged.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}
