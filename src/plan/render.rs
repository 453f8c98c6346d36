//! Token rendering in the host's compound command-line syntax.
//!
//! ```text
//! wt -w 0 nt -d C:\src --title build cargo watch ; sp -V -s 0.3 --title logs tail -f log.txt
//! ```

use super::{Action, ArgumentPlan, FocusDirection, PaneDirectives, TabGroup};
use crate::layout::Orientation;
use std::borrow::Cow;

/// Token the host splits subcommands on.
const DELIMITER: &str = ";";

/// Escape semicolons so the host does not treat them as subcommand breaks.
pub fn escape_token(token: &str) -> Cow<'_, str> {
    if token.contains(';') {
        Cow::Owned(token.replace(';', "\\;"))
    } else {
        Cow::Borrowed(token)
    }
}

fn push_option(tokens: &mut Vec<String>, flag: &str, value: Option<&str>) {
    if let Some(value) = value {
        tokens.push(flag.to_string());
        tokens.push(escape_token(value).into_owned());
    }
}

impl PaneDirectives {
    /// Options for the pane-creating subcommand; the command goes last
    /// since the host reads everything after it as the command line.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        push_option(&mut tokens, "-d", self.working_directory.as_deref());
        push_option(&mut tokens, "--title", self.title.as_deref());
        push_option(&mut tokens, "-p", self.profile.as_deref());
        push_option(&mut tokens, "--tabColor", self.tab_color.as_deref());
        if let Some(command) = &self.command {
            tokens.extend(command.iter().map(|t| escape_token(t).into_owned()));
        }
        tokens
    }
}

impl Orientation {
    fn flag(self) -> &'static str {
        match self {
            Orientation::Horizontal => "-H",
            Orientation::Vertical => "-V",
        }
    }
}

impl FocusDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            FocusDirection::Up => "up",
            FocusDirection::Down => "down",
            FocusDirection::Left => "left",
            FocusDirection::Right => "right",
        }
    }
}

impl Action {
    /// Subcommand and arguments for this action alone.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Action::NewTab { pane } => {
                let mut tokens = vec!["nt".to_string()];
                tokens.extend(pane.tokens());
                tokens
            }
            Action::SplitPane {
                orientation,
                host_size,
                pane,
                ..
            } => {
                let mut tokens = vec![
                    "sp".to_string(),
                    orientation.flag().to_string(),
                    "-s".to_string(),
                    host_size.to_string(),
                ];
                tokens.extend(pane.tokens());
                tokens
            }
            Action::MoveFocus { direction } => {
                vec!["mf".to_string(), direction.as_str().to_string()]
            }
            Action::FocusPane { index } => {
                vec!["fp".to_string(), "-t".to_string(), index.to_string()]
            }
            Action::PreviousTab => vec!["ft".to_string(), "-p".to_string()],
        }
    }
}

fn join_subcommands(subcommands: impl IntoIterator<Item = Vec<String>>) -> Vec<String> {
    let mut joined = Vec::new();
    for (i, tokens) in subcommands.into_iter().enumerate() {
        if i > 0 {
            joined.push(DELIMITER.to_string());
        }
        joined.extend(tokens);
    }
    joined
}

impl TabGroup {
    pub fn tokens(&self) -> Vec<String> {
        join_subcommands(self.actions.iter().map(Action::tokens))
    }
}

impl ArgumentPlan {
    /// Full argument vector for a single compound host invocation,
    /// program name first.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = vec![self.executable.clone()];
        argv.extend(self.window_args.iter().cloned());
        argv.extend(join_subcommands(
            self.actions().iter().map(Action::tokens),
        ));
        argv
    }

    /// Argument vector running `action` alone against `window_target`.
    pub fn single_action_argv(&self, window_target: &str, action: &Action) -> Vec<String> {
        let mut argv = vec![
            self.executable.clone(),
            "-w".to_string(),
            window_target.to_string(),
        ];
        argv.extend(action.tokens());
        argv
    }
}
