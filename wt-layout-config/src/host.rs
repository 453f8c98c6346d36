//! Terminal host invocation settings.

use serde::{Deserialize, Serialize};

/// How the launcher turns an argument plan into host processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LaunchMode {
    /// Compound when every pane shares one environment, per-action otherwise
    #[default]
    Auto,
    /// A single host invocation carrying every tab and split
    Compound,
    /// One host invocation per action, each with its own environment
    PerAction,
}

/// Settings describing the external terminal host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Program name or path of the host (`wt` by default)
    pub executable: String,

    /// Window the actions apply to, rendered as `-w <target>`
    pub window_target: Option<String>,

    /// Number of decimal places used for split sizes
    pub size_precision: u32,

    pub launch_mode: LaunchMode,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            executable: crate::defaults::executable(),
            window_target: crate::defaults::window_target(),
            size_precision: crate::defaults::size_precision(),
            launch_mode: LaunchMode::default(),
        }
    }
}

impl HostConfig {
    /// Smallest and largest accepted `size_precision`.
    pub const PRECISION_RANGE: std::ops::RangeInclusive<u32> = 1..=8;

    /// Leading host arguments that select the window, e.g. `["-w", "0"]`.
    pub fn window_args(&self) -> Vec<String> {
        match &self.window_target {
            Some(target) => vec!["-w".to_string(), target.clone()],
            None => Vec::new(),
        }
    }

    /// Window target for invocations that must address an existing window.
    pub fn window_target_or_current(&self) -> &str {
        self.window_target.as_deref().unwrap_or("0")
    }
}
