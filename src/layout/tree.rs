//! Validated layout tree.
//!
//! Produced only by [`LayoutTree::validate`](super::LayoutTree::validate).
//! Tabs exist only at the top, leaf panes carry no orientation, and split
//! panes always have an orientation and at least one child.

use super::NodePath;
use serde::Serialize;
use std::collections::BTreeMap;

/// Orientation of a split pane's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    /// Children are stacked top to bottom
    Horizontal,
    /// Children are placed left to right
    Vertical,
}

/// A validated forest of tabs, in creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub tabs: Vec<Tab>,
    /// Index of the tab to select once every tab exists
    pub focused_tab: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub path: NodePath,
    pub title: Option<String>,
    pub tab_color: Option<String>,
    /// Default for leaves below without a directory of their own
    pub working_directory: Option<String>,
    pub environment: BTreeMap<String, String>,
    pub root: PaneTree,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaneTree {
    Leaf(LeafPane),
    Split(SplitPane),
}

/// A pane that becomes one host pane.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafPane {
    pub path: NodePath,
    pub size: Option<f64>,
    /// Non-empty argv, when present
    pub command: Option<Vec<String>>,
    pub working_directory: Option<String>,
    pub title: Option<String>,
    pub profile: Option<String>,
    pub tab_color: Option<String>,
    pub focus: bool,
    pub environment: BTreeMap<String, String>,
}

/// A pane divided into children along one orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPane {
    pub path: NodePath,
    pub orientation: Orientation,
    pub size: Option<f64>,
    pub working_directory: Option<String>,
    pub environment: BTreeMap<String, String>,
    pub children: Vec<PaneTree>,
}

impl PaneTree {
    /// Explicit share of the parent, if one was given.
    pub fn size(&self) -> Option<f64> {
        match self {
            PaneTree::Leaf(leaf) => leaf.size,
            PaneTree::Split(split) => split.size,
        }
    }

    pub fn path(&self) -> &NodePath {
        match self {
            PaneTree::Leaf(leaf) => &leaf.path,
            PaneTree::Split(split) => &split.path,
        }
    }

    /// Number of host panes this subtree turns into.
    pub fn leaf_count(&self) -> usize {
        match self {
            PaneTree::Leaf(_) => 1,
            PaneTree::Split(split) => split.children.iter().map(PaneTree::leaf_count).sum(),
        }
    }

    /// All leaves in left-to-right, top-to-bottom order.
    pub fn leaves(&self) -> Vec<&LeafPane> {
        match self {
            PaneTree::Leaf(leaf) => vec![leaf],
            PaneTree::Split(split) => split.children.iter().flat_map(PaneTree::leaves).collect(),
        }
    }
}

impl Layout {
    /// Total number of host panes across every tab.
    pub fn pane_count(&self) -> usize {
        self.tabs.iter().map(|t| t.root.leaf_count()).sum()
    }
}
