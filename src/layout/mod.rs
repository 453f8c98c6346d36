//! Layout tree: the declarative description handed over by a loader.
//!
//! [`LayoutTree`] and [`LayoutNode`] mirror the loosely-typed input as
//! parsed (every node may claim any combination of fields). Validation
//! turns them into the typed [`Layout`] in [`tree`], where invalid shapes
//! cannot be represented, and the compiler only ever walks that.

pub mod path;
pub mod tree;
mod validate;

pub use path::{NodePath, PathSegment};
pub use tree::{Layout, LeafPane, Orientation, PaneTree, SplitPane, Tab};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Whether a node is a top-level tab or a pane inside one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Tab,
    Pane,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Tab => write!(f, "tab"),
            NodeKind::Pane => write!(f, "pane"),
        }
    }
}

/// Orientation a node's children are laid out along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    /// Children are stacked top to bottom
    Horizontal,
    /// Children are placed left to right
    Vertical,
    /// Leaf pane
    #[default]
    None,
}

impl SplitDirection {
    pub fn orientation(self) -> Option<Orientation> {
        match self {
            SplitDirection::Horizontal => Some(Orientation::Horizontal),
            SplitDirection::Vertical => Some(Orientation::Vertical),
            SplitDirection::None => None,
        }
    }
}

/// A command as written in the input: an argv list, or one line that is
/// split into words with POSIX shell rules during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandLine {
    Argv(Vec<String>),
    Line(String),
}

impl From<Vec<String>> for CommandLine {
    fn from(argv: Vec<String>) -> Self {
        CommandLine::Argv(argv)
    }
}

impl From<&[&str]> for CommandLine {
    fn from(argv: &[&str]) -> Self {
        CommandLine::Argv(argv.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&str> for CommandLine {
    fn from(line: &str) -> Self {
        CommandLine::Line(line.to_string())
    }
}

/// A node in the layout forest as produced by a loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayoutNode>,

    #[serde(default)]
    pub split: SplitDirection,

    /// Share of the parent's space (0 < size <= 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,

    /// Program and arguments; absent means the host's default shell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<CommandLine>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Host profile to open the pane with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Tab color as `#rrggbb`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_color: Option<String>,

    /// Focus this pane (or select this tab) once the layout is built
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub focus: bool,

    /// Variables layered over the inherited environment; inner nodes win
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
}

impl LayoutNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            split: SplitDirection::None,
            size: None,
            command: None,
            working_directory: None,
            title: None,
            profile: None,
            tab_color: None,
            focus: false,
            environment: BTreeMap::new(),
        }
    }

    /// A tab holding the given panes.
    pub fn tab(children: Vec<LayoutNode>) -> Self {
        Self {
            children,
            ..Self::new(NodeKind::Tab)
        }
    }

    /// A leaf pane running the host's default shell.
    pub fn pane() -> Self {
        Self::new(NodeKind::Pane)
    }

    /// A pane split along `split` into `children`.
    pub fn split(split: SplitDirection, children: Vec<LayoutNode>) -> Self {
        Self {
            split,
            children,
            ..Self::new(NodeKind::Pane)
        }
    }

    pub fn with_split(mut self, split: SplitDirection) -> Self {
        self.split = split;
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_command(mut self, command: impl Into<CommandLine>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_working_directory(mut self, dir: &str) -> Self {
        self.working_directory = Some(dir.to_string());
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_profile(mut self, profile: &str) -> Self {
        self.profile = Some(profile.to_string());
        self
    }

    pub fn with_tab_color(mut self, color: &str) -> Self {
        self.tab_color = Some(color.to_string());
        self
    }

    pub fn with_focus(mut self) -> Self {
        self.focus = true;
        self
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.environment.insert(key.to_string(), value.to_string());
        self
    }
}

/// The whole input: a forest whose roots must all be tabs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutTree {
    pub tabs: Vec<LayoutNode>,
}

impl LayoutTree {
    pub fn new(tabs: Vec<LayoutNode>) -> Self {
        Self { tabs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_deserializes_from_yaml() {
        let yaml = r#"
- kind: tab
  title: dev
  children:
    - kind: pane
      split: vertical
      children:
        - kind: pane
          command: [echo, a]
        - kind: pane
          command: "echo 'b c'"
          size: 0.3
          environment:
            A: "1"
"#;
        let tree: LayoutTree = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(tree.tabs.len(), 1);
        let tab = &tree.tabs[0];
        assert_eq!(tab.kind, NodeKind::Tab);
        assert_eq!(tab.title.as_deref(), Some("dev"));

        let split = &tab.children[0];
        assert_eq!(split.split, SplitDirection::Vertical);
        assert_eq!(
            split.children[0].command,
            Some(CommandLine::Argv(vec!["echo".into(), "a".into()]))
        );
        assert_eq!(
            split.children[1].command,
            Some(CommandLine::Line("echo 'b c'".into()))
        );
        assert_eq!(split.children[1].size, Some(0.3));
        assert_eq!(split.children[1].environment["A"], "1");
    }

    #[test]
    fn test_split_defaults_to_none() {
        let node: LayoutNode = serde_yaml_ng::from_str("kind: pane").unwrap();
        assert_eq!(node.split, SplitDirection::None);
        assert!(node.children.is_empty());
        assert!(!node.focus);
        assert_eq!(node, LayoutNode::pane());
    }

    #[test]
    fn test_builders_match_fields() {
        let node = LayoutNode::pane()
            .with_size(0.5)
            .with_command(["htop"].as_slice())
            .with_title("top")
            .with_env("TERM", "xterm");
        assert_eq!(node.size, Some(0.5));
        assert_eq!(node.command, Some(CommandLine::Argv(vec!["htop".into()])));
        assert_eq!(node.title.as_deref(), Some("top"));
        assert_eq!(node.environment["TERM"], "xterm");
    }
}
