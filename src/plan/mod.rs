//! Argument plan: the compiler's output.
//!
//! A plan is an ordered list of tab groups, each an ordered list of host
//! actions. Pane-creating actions carry the full environment their pane
//! should start with, so the launcher can decide how to honor differing
//! environments within one layout.

mod render;

pub use render::escape_token;

use crate::env::Environment;
use crate::layout::Orientation;
use serde::Serialize;

/// Direction for moving the host's focus between neighbouring panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusDirection {
    Up,
    Down,
    Left,
    Right,
}

impl Orientation {
    /// Focus move from a newly created sibling back to the one before it.
    pub fn backward(self) -> FocusDirection {
        match self {
            Orientation::Horizontal => FocusDirection::Up,
            Orientation::Vertical => FocusDirection::Left,
        }
    }

    /// Focus move from a sibling to the one created after it.
    pub fn forward(self) -> FocusDirection {
        match self {
            Orientation::Horizontal => FocusDirection::Down,
            Orientation::Vertical => FocusDirection::Right,
        }
    }
}

/// Per-pane directives attached to the action that creates the pane.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PaneDirectives {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_color: Option<String>,
    /// Program and arguments; `None` runs the host's default shell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    /// Sanitized base environment with every enclosing overlay applied
    pub environment: Environment,
}

/// One host action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Open a tab; its first pane gets `pane`
    NewTab { pane: PaneDirectives },

    /// Split the focused pane; the new pane gets `pane` and the focus
    SplitPane {
        orientation: Orientation,
        /// Share of the parent group taken by the new child
        size: f64,
        /// Fraction of the focused pane handed to the new pane, as rendered
        host_size: f64,
        pane: PaneDirectives,
    },

    MoveFocus { direction: FocusDirection },

    /// Focus the `index`-th pane of the current tab (creation order)
    FocusPane { index: usize },

    /// Select the tab before the focused one
    PreviousTab,
}

impl Action {
    /// Directives of the pane this action creates, if it creates one.
    pub fn pane(&self) -> Option<&PaneDirectives> {
        match self {
            Action::NewTab { pane } | Action::SplitPane { pane, .. } => Some(pane),
            Action::MoveFocus { .. } | Action::FocusPane { .. } | Action::PreviousTab => None,
        }
    }
}

/// Actions that build one tab, in host order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TabGroup {
    pub actions: Vec<Action>,
}

/// Complete output of one compilation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentPlan {
    /// Host program
    pub executable: String,
    /// Window selection arguments placed before the first action
    pub window_args: Vec<String>,
    pub tabs: Vec<TabGroup>,
    /// Layout tab to select after every tab exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_tab: Option<usize>,
}

impl ArgumentPlan {
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Every action in host order, including the final tab selection.
    ///
    /// The target window may already hold tabs of its own, so absolute tab
    /// indices are meaningless. The last tab created has the focus; the
    /// focused layout tab is reached by stepping back from it.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .tabs
            .iter()
            .flat_map(|tab| tab.actions.iter().cloned())
            .collect();
        if let Some(index) = self.focus_tab {
            let steps = self.tabs.len().saturating_sub(index + 1);
            actions.extend(std::iter::repeat_n(Action::PreviousTab, steps));
        }
        actions
    }

    /// Directives of every pane, in creation order.
    pub fn panes(&self) -> impl Iterator<Item = &PaneDirectives> {
        self.tabs
            .iter()
            .flat_map(|tab| tab.actions.iter())
            .filter_map(Action::pane)
    }

    /// `true` when every pane starts with the same environment.
    pub fn has_uniform_environment(&self) -> bool {
        let mut panes = self.panes();
        match panes.next() {
            Some(first) => panes.all(|p| p.environment == first.environment),
            None => true,
        }
    }

    /// The plan as JSON, for inspection and dry runs.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
