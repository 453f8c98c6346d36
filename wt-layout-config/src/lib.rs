//! Configuration system for the wt-layout compiler.
//!
//! This crate provides the configuration types, default values and
//! validation for the layout compiler. It includes:
//!
//! - Host settings (executable, window target, size precision, launch mode)
//! - Virtual-environment marker sets used by the environment sanitizer
//! - Compiler options (variable expansion, strict command handling)
//!
//! Loading reads from an in-memory string; locating and reading files is
//! left to the embedding application.

pub mod compile;
pub mod config;
pub mod defaults;
pub mod error;
pub mod host;
pub mod sanitizer;

pub use compile::CompileOptions;
pub use config::LayoutConfig;
pub use error::ConfigError;
pub use host::{HostConfig, LaunchMode};
pub use sanitizer::{RestoreRule, SanitizerConfig, VirtualEnvMarkers};
