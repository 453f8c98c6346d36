//! Options that change how a layout tree is compiled.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Expand `$VAR`, `${VAR}`, `%VAR%` and a leading `~` against each
    /// pane's merged environment
    pub expand_variables: bool,

    /// Reject commands on non-leaf nodes instead of ignoring them
    pub reject_inert_commands: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            expand_variables: crate::defaults::bool_true(),
            reject_inert_commands: false,
        }
    }
}
