//! Addresses of nodes inside a layout forest, used in diagnostics.

use super::NodeKind;
use serde::Serialize;
use std::fmt;

/// One step from a parent to a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathSegment {
    pub kind: NodeKind,
    /// Position among the parent's children (or among the roots)
    pub index: usize,
}

/// Path from the forest root to a node, rendered as `tab[0].pane[1].pane[0]`.
///
/// The empty path stands for the forest itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodePath(Vec<PathSegment>);

impl NodePath {
    /// Path of the forest itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the `index`-th child of this node.
    pub fn child(&self, kind: NodeKind, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment { kind, index });
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}[{}]", segment.kind, segment.index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_display() {
        assert_eq!(NodePath::root().to_string(), "<root>");
        assert!(NodePath::root().is_root());
    }

    #[test]
    fn test_nested_display() {
        let path = NodePath::root()
            .child(NodeKind::Tab, 0)
            .child(NodeKind::Pane, 1)
            .child(NodeKind::Pane, 0);
        assert_eq!(path.to_string(), "tab[0].pane[1].pane[0]");
        assert_eq!(path.segments().len(), 3);
    }

    #[test]
    fn test_child_does_not_mutate_parent() {
        let tab = NodePath::root().child(NodeKind::Tab, 2);
        let _pane = tab.child(NodeKind::Pane, 0);
        assert_eq!(tab.to_string(), "tab[2]");
    }
}
