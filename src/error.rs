//! Typed error types for wt-layout.
//!
//! Compilation either yields a complete argument plan or one of these
//! errors; a partial plan is never returned.

use crate::layout::NodePath;
use std::process::ExitStatus;
use thiserror::Error;

/// The shape violation found while validating a layout tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructuralKind {
    /// The forest contains no tab at all.
    #[error("layout contains no tabs")]
    NoTabs,

    /// A pane appears at the top level where only tabs are allowed.
    #[error("top-level node is a pane; only tabs may be roots")]
    RootNotTab,

    /// A tab appears below another node.
    #[error("tabs may only appear at the top level")]
    NestedTab,

    /// A tab without any pane below it.
    #[error("tab contains no panes")]
    EmptyTab,

    /// A node has several children but no orientation to split them along.
    #[error("node has {children} children but no split orientation")]
    ChildrenWithoutSplit {
        /// Number of children found.
        children: usize,
    },

    /// An explicit size outside `0 < size <= 1`.
    #[error("size {size} is outside the range (0, 1]")]
    InvalidSize {
        /// The rejected value.
        size: f64,
    },

    /// A command line that could not be split into words.
    #[error("command {line:?} could not be parsed: {reason}")]
    InvalidCommand {
        /// The command line as written.
        line: String,
        /// Why splitting failed.
        reason: String,
    },

    /// A tab color that is not `#rrggbb`.
    #[error("tab color {color:?} is not of the form #rrggbb")]
    InvalidTabColor {
        /// The rejected value.
        color: String,
    },

    /// More than one pane in a tab, or more than one tab, asks for focus.
    #[error("focus is already requested by {previous}")]
    DuplicateFocus {
        /// Path of the node that asked first.
        previous: NodePath,
    },

    /// A command on a node that never becomes a pane (strict mode only).
    #[error("commands are only allowed on leaf panes")]
    InertCommand,
}

/// Errors raised while turning a layout tree into an argument plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The tree violates a structural invariant.
    #[error("invalid layout at {path}: {kind}")]
    Structural {
        /// Path of the offending node.
        path: NodePath,
        /// What is wrong with it.
        kind: StructuralKind,
    },

    /// Explicit sibling sizes add up to more than the whole parent.
    #[error("sizes of the children of {path} add up to {total}, which exceeds 1")]
    SizeOverflow {
        /// Path of the parent whose children overflow.
        path: NodePath,
        /// Sum of the explicit sizes.
        total: f64,
    },

    /// Reserved for inconsistencies the sanitizer cannot resolve. The current
    /// sanitizer treats every ambiguity as pass-through and never raises it.
    #[error("environment error: {0}")]
    Environment(String),
}

impl LayoutError {
    pub(crate) fn structural(path: &NodePath, kind: StructuralKind) -> Self {
        LayoutError::Structural {
            path: path.clone(),
            kind,
        }
    }

    /// `true` for shape and size-policy violations alike.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            LayoutError::Structural { .. } | LayoutError::SizeOverflow { .. }
        )
    }

    /// Path of the node the error refers to, when there is one.
    pub fn path(&self) -> Option<&NodePath> {
        match self {
            LayoutError::Structural { path, .. } | LayoutError::SizeOverflow { path, .. } => {
                Some(path)
            }
            LayoutError::Environment(_) => None,
        }
    }
}

/// Errors raised while handing an argument plan to the terminal host.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The plan has no tabs, so there is nothing to launch.
    #[error("argument plan is empty")]
    EmptyPlan,

    /// The host process could not be started.
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        /// Program that was being started.
        program: String,
        /// Underlying I/O error, unchanged.
        #[source]
        source: std::io::Error,
    },

    /// The host process ran but reported failure.
    #[error("'{program}' exited with {status}")]
    HostFailed {
        /// Program that failed.
        program: String,
        /// Exit status it reported.
        status: ExitStatus,
    },
}
