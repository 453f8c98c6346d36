// Library exports for layout compilation and host launching
//
// Pipeline: a `LayoutTree` is validated into a typed `Layout`, the process
// environment is sanitized, and the compiler turns both into an
// `ArgumentPlan` that a `HostLauncher` hands to the terminal host.
//
// Everything up to the launcher is pure: it reads only its arguments and
// never touches files, the process environment or the clock.

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod compiler;
pub mod env;
pub mod error;
pub mod launcher;
pub mod layout;
pub mod plan;

pub use compiler::{compile, compile_layout};
pub use env::{Environment, Sanitizer};
pub use error::{LaunchError, LayoutError, StructuralKind};
pub use launcher::{HostLauncher, LaunchReport, ProcessLauncher};
pub use layout::{CommandLine, LayoutNode, LayoutTree, NodeKind, NodePath, SplitDirection};
pub use plan::{Action, ArgumentPlan, FocusDirection, PaneDirectives, TabGroup};
pub use wt_layout_config::{
    CompileOptions, ConfigError, HostConfig, LaunchMode, LayoutConfig, SanitizerConfig,
};

use anyhow::Context;

/// Compile `tree` against the current process environment and launch it.
pub fn launch(tree: &LayoutTree, config: &LayoutConfig) -> anyhow::Result<LaunchReport> {
    let process_env = env::capture_process_environment();
    let plan = compile(tree, &process_env, config).context("Failed to compile layout")?;
    ProcessLauncher::new(config.host.clone())
        .launch(&plan)
        .with_context(|| format!("Failed to launch '{}'", config.host.executable))
}
