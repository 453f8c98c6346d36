//! Shared integration test helpers for wt-layout.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{tree_from_yaml, env_of};
//! ```
//!
//! The `#![allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use wt_layout::{ArgumentPlan, Environment, LayoutConfig, LayoutTree, compile};

/// Parse a layout tree written as YAML.
pub fn tree_from_yaml(yaml: &str) -> LayoutTree {
    serde_yaml_ng::from_str(yaml).expect("test layout should be valid YAML")
}

/// Build an environment from literal pairs.
pub fn env_of(pairs: &[(&str, &str)]) -> Environment {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Compile a YAML layout with the default configuration and an empty
/// process environment.
pub fn compile_yaml(yaml: &str) -> ArgumentPlan {
    compile_yaml_with(yaml, &Environment::new(), &LayoutConfig::default())
}

pub fn compile_yaml_with(yaml: &str, env: &Environment, config: &LayoutConfig) -> ArgumentPlan {
    compile(&tree_from_yaml(yaml), env, config).expect("test layout should compile")
}

/// A configuration whose sanitizer uses POSIX path rules regardless of the
/// platform the tests run on.
pub fn posix_config() -> LayoutConfig {
    let mut config = LayoutConfig::default();
    config.sanitizer.path_separator = ':';
    config.sanitizer.case_insensitive = false;
    config
}
