//! Structural validation: [`LayoutTree`] → [`Layout`].
//!
//! Every invariant is checked before the compiler sees the tree, so a
//! compilation either sees a well-formed [`Layout`] or nothing at all.

use super::tree::{Layout, LeafPane, PaneTree, SplitPane, Tab};
use super::{CommandLine, LayoutNode, LayoutTree, NodeKind, NodePath, SplitDirection};
use crate::compiler::sizing::SIZE_TOLERANCE;
use crate::error::{LayoutError, StructuralKind};
use wt_layout_config::CompileOptions;

impl LayoutTree {
    /// Check every structural invariant and build the typed tree.
    pub fn validate(&self, options: &CompileOptions) -> Result<Layout, LayoutError> {
        let root = NodePath::root();
        if self.tabs.is_empty() {
            return Err(LayoutError::structural(&root, StructuralKind::NoTabs));
        }

        let mut tabs = Vec::with_capacity(self.tabs.len());
        let mut focused: Option<(usize, NodePath)> = None;

        for (index, node) in self.tabs.iter().enumerate() {
            let path = root.child(node.kind, index);
            if node.kind != NodeKind::Tab {
                return Err(LayoutError::structural(&path, StructuralKind::RootNotTab));
            }
            if node.focus {
                if let Some((_, previous)) = &focused {
                    return Err(LayoutError::structural(
                        &path,
                        StructuralKind::DuplicateFocus {
                            previous: previous.clone(),
                        },
                    ));
                }
                focused = Some((index, path.clone()));
            }
            tabs.push(validate_tab(node, path, options)?);
        }

        Ok(Layout {
            tabs,
            focused_tab: focused.map(|(index, _)| index),
        })
    }
}

fn validate_tab(
    node: &LayoutNode,
    path: NodePath,
    options: &CompileOptions,
) -> Result<Tab, LayoutError> {
    if node.children.is_empty() {
        return Err(LayoutError::structural(&path, StructuralKind::EmptyTab));
    }
    check_tab_color(node.tab_color.as_deref(), &path)?;
    if node.command.is_some() {
        inert_command(&path, options)?;
    }
    if node.profile.is_some() {
        log::debug!("Ignoring profile on {path}: profiles apply to leaf panes only");
    }

    let mut focus = None;
    let root = if node.children.len() == 1 {
        let child = &node.children[0];
        validate_pane(child, path.child(child.kind, 0), options, &mut focus)?
    } else {
        let orientation = node.split.orientation().ok_or_else(|| {
            LayoutError::structural(
                &path,
                StructuralKind::ChildrenWithoutSplit {
                    children: node.children.len(),
                },
            )
        })?;
        let children = validate_children(node, &path, options, &mut focus)?;
        PaneTree::Split(SplitPane {
            path: path.clone(),
            orientation,
            size: None,
            working_directory: None,
            environment: Default::default(),
            children,
        })
    };

    Ok(Tab {
        path,
        title: node.title.clone(),
        tab_color: node.tab_color.clone(),
        working_directory: node.working_directory.clone(),
        environment: node.environment.clone(),
        root,
    })
}

fn validate_pane(
    node: &LayoutNode,
    path: NodePath,
    options: &CompileOptions,
    focus: &mut Option<NodePath>,
) -> Result<PaneTree, LayoutError> {
    if node.kind == NodeKind::Tab {
        return Err(LayoutError::structural(&path, StructuralKind::NestedTab));
    }
    if let Some(size) = node.size {
        check_size(size, &path)?;
    }

    if node.children.is_empty() {
        if node.split != SplitDirection::None {
            log::debug!(
                "Pane {path} has a split orientation but no children; treating it as a leaf"
            );
        }
        check_tab_color(node.tab_color.as_deref(), &path)?;
        if node.focus {
            if let Some(previous) = focus {
                return Err(LayoutError::structural(
                    &path,
                    StructuralKind::DuplicateFocus {
                        previous: previous.clone(),
                    },
                ));
            }
            *focus = Some(path.clone());
        }
        let command = parse_command(node.command.as_ref(), &path)?;
        return Ok(PaneTree::Leaf(LeafPane {
            path,
            size: node.size,
            command,
            working_directory: node.working_directory.clone(),
            title: node.title.clone(),
            profile: node.profile.clone(),
            tab_color: node.tab_color.clone(),
            focus: node.focus,
            environment: node.environment.clone(),
        }));
    }

    let orientation = node.split.orientation().ok_or_else(|| {
        LayoutError::structural(
            &path,
            StructuralKind::ChildrenWithoutSplit {
                children: node.children.len(),
            },
        )
    })?;
    if node.command.is_some() {
        inert_command(&path, options)?;
    }
    if node.title.is_some() || node.profile.is_some() || node.tab_color.is_some() || node.focus {
        log::debug!("Ignoring pane-only attributes on split pane {path}");
    }

    let children = validate_children(node, &path, options, focus)?;
    Ok(PaneTree::Split(SplitPane {
        path,
        orientation,
        size: node.size,
        working_directory: node.working_directory.clone(),
        environment: node.environment.clone(),
        children,
    }))
}

fn validate_children(
    node: &LayoutNode,
    path: &NodePath,
    options: &CompileOptions,
    focus: &mut Option<NodePath>,
) -> Result<Vec<PaneTree>, LayoutError> {
    let children = node
        .children
        .iter()
        .enumerate()
        .map(|(i, child)| validate_pane(child, path.child(child.kind, i), options, focus))
        .collect::<Result<Vec<_>, _>>()?;

    let total: f64 = children.iter().filter_map(PaneTree::size).sum();
    if total > 1.0 + SIZE_TOLERANCE {
        return Err(LayoutError::SizeOverflow {
            path: path.clone(),
            total,
        });
    }
    Ok(children)
}

fn check_size(size: f64, path: &NodePath) -> Result<(), LayoutError> {
    if size.is_finite() && size > 0.0 && size <= 1.0 {
        Ok(())
    } else {
        Err(LayoutError::structural(
            path,
            StructuralKind::InvalidSize { size },
        ))
    }
}

fn check_tab_color(color: Option<&str>, path: &NodePath) -> Result<(), LayoutError> {
    let Some(color) = color else {
        return Ok(());
    };
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(LayoutError::structural(
            path,
            StructuralKind::InvalidTabColor {
                color: color.to_string(),
            },
        ))
    }
}

fn inert_command(path: &NodePath, options: &CompileOptions) -> Result<(), LayoutError> {
    if options.reject_inert_commands {
        return Err(LayoutError::structural(path, StructuralKind::InertCommand));
    }
    log::warn!("Ignoring command on {path}: only leaf panes run commands");
    Ok(())
}

/// Empty commands count as absent so the host's default shell is used.
fn parse_command(
    command: Option<&CommandLine>,
    path: &NodePath,
) -> Result<Option<Vec<String>>, LayoutError> {
    let argv = match command {
        None => return Ok(None),
        Some(CommandLine::Argv(argv)) => argv.clone(),
        Some(CommandLine::Line(line)) => shell_words::split(line).map_err(|e| {
            LayoutError::structural(
                path,
                StructuralKind::InvalidCommand {
                    line: line.clone(),
                    reason: e.to_string(),
                },
            )
        })?,
    };
    Ok(if argv.is_empty() { None } else { Some(argv) })
}
