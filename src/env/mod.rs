//! Environment handling for spawned panes.
//!
//! - [`sanitize`] neutralizes an active virtual environment
//! - [`expand`] resolves `$VAR`-style references against a pane's environment
//!
//! Environments are ordered maps so that every merge and every rendering of
//! them is deterministic.

pub mod expand;
pub mod sanitize;

pub use expand::{expand_home, expand_variables};
pub use sanitize::Sanitizer;

use std::collections::BTreeMap;

/// Variable name → value.
pub type Environment = BTreeMap<String, String>;

/// Snapshot of the current process environment.
///
/// Entries whose name or value is not valid UTF-8 cannot be represented in
/// an argument plan and are skipped.
pub fn capture_process_environment() -> Environment {
    let mut env = Environment::new();
    for (key, value) in std::env::vars_os() {
        match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => {
                env.insert(key, value);
            }
            (Ok(key), Err(_)) => {
                log::warn!("Skipping environment variable {key}: value is not valid UTF-8");
            }
            (Err(key), _) => {
                log::warn!("Skipping environment variable {key:?}: name is not valid UTF-8");
            }
        }
    }
    env
}

/// Layer `overlay` on top of `base`; keys in `overlay` win.
pub fn overlay(base: &Environment, overlay: &BTreeMap<String, String>) -> Environment {
    if overlay.is_empty() {
        return base.clone();
    }
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
