//! Layout compiler: validated tree → argument plan.
//!
//! The host only ever splits the focused pane, and a split moves the focus
//! to the new pane. Each split group is therefore compiled as:
//!
//! 1. the first child already exists (it is the pane being split);
//! 2. every later sibling is created by splitting the one before it, which
//!    leaves the focus on the newest pane;
//! 3. a sibling that is itself split is compiled right after its next
//!    sibling exists: focus moves back to it, its own group is compiled,
//!    and focus moves forward again. The last sibling needs neither move.
//!
//! Flat groups thus never emit focus moves. Compilation reads nothing but
//! its arguments, so identical inputs give identical plans.

pub mod sizing;

use crate::env::{self, Environment, Sanitizer};
use crate::error::LayoutError;
use crate::layout::{Layout, LayoutTree, LeafPane, PaneTree, SplitPane, Tab};
use crate::plan::{Action, ArgumentPlan, PaneDirectives, TabGroup};
use std::collections::BTreeMap;
use wt_layout_config::{CompileOptions, LayoutConfig};

/// Validate `tree`, sanitize `process_env`, and compile.
///
/// Nothing is emitted unless the whole tree is valid.
pub fn compile(
    tree: &LayoutTree,
    process_env: &Environment,
    config: &LayoutConfig,
) -> Result<ArgumentPlan, LayoutError> {
    let layout = tree.validate(&config.compile)?;
    let base = Sanitizer::new(&config.sanitizer).sanitize(process_env);
    Ok(compile_layout(&layout, &base, config))
}

/// Compile an already validated layout against a sanitized base environment.
pub fn compile_layout(layout: &Layout, base: &Environment, config: &LayoutConfig) -> ArgumentPlan {
    let tabs: Vec<TabGroup> = layout
        .tabs
        .iter()
        .map(|tab| TabCompiler::new(config).compile(tab, base))
        .collect();

    log::debug!(
        "Compiled {} tab(s) with {} pane(s) into {} action(s)",
        tabs.len(),
        layout.pane_count(),
        tabs.iter().map(|t| t.actions.len()).sum::<usize>()
    );

    ArgumentPlan {
        executable: config.host.executable.clone(),
        window_args: config.host.window_args(),
        tabs,
        focus_tab: layout.focused_tab,
    }
}

/// Inherited state while descending: merged environment and the closest
/// enclosing working directory.
#[derive(Debug, Clone)]
struct Scope<'a> {
    environment: Environment,
    working_directory: Option<&'a str>,
}

impl<'a> Scope<'a> {
    fn enter(
        &self,
        overlay: &BTreeMap<String, String>,
        working_directory: Option<&'a str>,
    ) -> Self {
        Self {
            environment: env::overlay(&self.environment, overlay),
            working_directory: working_directory.or(self.working_directory),
        }
    }
}

/// Accumulates the actions of one tab.
struct TabCompiler<'c> {
    options: &'c CompileOptions,
    precision: u32,
    actions: Vec<Action>,
    /// Panes created so far in this tab
    created: usize,
    focused_pane: Option<usize>,
}

impl<'c> TabCompiler<'c> {
    fn new(config: &'c LayoutConfig) -> Self {
        Self {
            options: &config.compile,
            precision: config.host.size_precision,
            actions: Vec::new(),
            created: 0,
            focused_pane: None,
        }
    }

    fn compile(mut self, tab: &Tab, base: &Environment) -> TabGroup {
        let scope = Scope {
            environment: base.clone(),
            working_directory: None,
        }
        .enter(&tab.environment, tab.working_directory.as_deref());

        let (leaf, leaf_scope) = first_leaf(&tab.root, &scope);
        let mut pane = self.directives(leaf, &leaf_scope);
        if let Some(title) = &tab.title {
            pane.title = Some(self.expand(title, &pane.environment));
        }
        if tab.tab_color.is_some() {
            pane.tab_color = tab.tab_color.clone();
        }
        self.created(leaf);
        self.actions.push(Action::NewTab { pane });

        if let PaneTree::Split(split) = &tab.root {
            self.compile_group(split, &scope);
        }
        if let Some(index) = self.focused_pane {
            self.actions.push(Action::FocusPane { index });
        }

        TabGroup {
            actions: self.actions,
        }
    }

    fn compile_group(&mut self, split: &SplitPane, outer: &Scope<'_>) {
        let scope = outer.enter(&split.environment, split.working_directory.as_deref());
        let sizes: Vec<Option<f64>> = split.children.iter().map(PaneTree::size).collect();
        let shares = sizing::distribute(&sizes);
        let count = split.children.len();

        for (i, child) in split.children.iter().enumerate() {
            let has_next = i + 1 < count;

            if has_next {
                let next = &split.children[i + 1];
                let (leaf, leaf_scope) = first_leaf(next, &scope);
                let host_size =
                    sizing::round_fraction(sizing::host_fraction(&shares, i + 1), self.precision);
                let pane = self.directives(leaf, &leaf_scope);
                self.created(leaf);
                self.actions.push(Action::SplitPane {
                    orientation: split.orientation,
                    size: shares[i + 1],
                    host_size,
                    pane,
                });
            }

            if let PaneTree::Split(nested) = child {
                if has_next {
                    self.actions.push(Action::MoveFocus {
                        direction: split.orientation.backward(),
                    });
                }
                self.compile_group(nested, &scope);
                if has_next {
                    self.actions.push(Action::MoveFocus {
                        direction: split.orientation.forward(),
                    });
                }
            }
        }
    }

    /// Record that `leaf` became the next host pane.
    fn created(&mut self, leaf: &LeafPane) {
        if leaf.focus {
            self.focused_pane = Some(self.created);
        }
        self.created += 1;
    }

    fn directives(&self, leaf: &LeafPane, scope: &Scope<'_>) -> PaneDirectives {
        let environment = env::overlay(&scope.environment, &leaf.environment);
        let working_directory = leaf
            .working_directory
            .as_deref()
            .or(scope.working_directory)
            .map(|dir| {
                if self.options.expand_variables {
                    env::expand_home(&env::expand_variables(dir, &environment), &environment)
                } else {
                    dir.to_string()
                }
            });
        let title = leaf
            .title
            .as_deref()
            .map(|title| self.expand(title, &environment));
        let command = leaf.command.as_ref().map(|argv| {
            argv.iter()
                .map(|token| self.expand(token, &environment))
                .collect()
        });

        PaneDirectives {
            working_directory,
            title,
            profile: leaf.profile.clone(),
            tab_color: leaf.tab_color.clone(),
            command,
            environment,
        }
    }

    fn expand(&self, value: &str, environment: &Environment) -> String {
        if self.options.expand_variables {
            env::expand_variables(value, environment)
        } else {
            value.to_string()
        }
    }
}

/// The leaf that becomes the pane of `tree` when `tree` is first created,
/// and the scope in effect at it.
fn first_leaf<'t>(tree: &'t PaneTree, scope: &Scope<'t>) -> (&'t LeafPane, Scope<'t>) {
    match tree {
        PaneTree::Leaf(leaf) => (leaf, scope.clone()),
        PaneTree::Split(split) => {
            let inner = scope.enter(&split.environment, split.working_directory.as_deref());
            first_leaf(&split.children[0], &inner)
        }
    }
}
