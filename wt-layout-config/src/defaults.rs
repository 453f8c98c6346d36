//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes and by
//! the `Default` impls, so a missing key and a missing document agree.

use crate::sanitizer::{RestoreRule, VirtualEnvMarkers};

// ── Host ───────────────────────────────────────────────────────────────────

pub fn executable() -> String {
    "wt".to_string()
}

/// `-w 0` targets the most recently used window instead of opening a new one.
pub fn window_target() -> Option<String> {
    Some("0".to_string())
}

pub fn size_precision() -> u32 {
    4
}

// ── Sanitizer ──────────────────────────────────────────────────────────────

pub fn bool_true() -> bool {
    true
}

pub fn path_separator() -> char {
    if cfg!(windows) { ';' } else { ':' }
}

pub fn case_insensitive() -> bool {
    cfg!(windows)
}

pub fn search_path_var() -> String {
    "PATH".to_string()
}

pub fn executable_dirs() -> Vec<String> {
    vec!["Scripts".to_string(), "bin".to_string()]
}

/// Marker set matching the `activate`/`deactivate` scripts shipped with
/// Python's `venv` and `virtualenv`.
pub fn python_venv_markers() -> VirtualEnvMarkers {
    VirtualEnvMarkers {
        root_var: "VIRTUAL_ENV".to_string(),
        search_path_var: search_path_var(),
        executable_dirs: executable_dirs(),
        clear_vars: vec!["VIRTUAL_ENV_PROMPT".to_string()],
        restore: vec![
            RestoreRule::new("_OLD_VIRTUAL_PATH", "PATH"),
            RestoreRule::new("_OLD_VIRTUAL_PROMPT", "PROMPT"),
            RestoreRule::new("_OLD_VIRTUAL_PYTHONHOME", "PYTHONHOME"),
        ],
    }
}

pub fn markers() -> Vec<VirtualEnvMarkers> {
    vec![python_venv_markers()]
}
