//! Hands an [`ArgumentPlan`] to the terminal host.
//!
//! Each host process starts with exactly the environment compiled for its
//! panes; nothing from the launching process leaks in. A single compound
//! invocation can only carry one environment, so plans whose panes differ
//! are run one action per invocation (see [`LaunchMode`]).

use crate::env::Environment;
use crate::error::LaunchError;
use crate::plan::ArgumentPlan;
use std::process::Command;
use wt_layout_config::{HostConfig, LaunchMode};

/// One host process to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub environment: Environment,
}

impl Invocation {
    fn from_argv(mut argv: Vec<String>, environment: Environment) -> Self {
        let program = argv.remove(0);
        Self {
            program,
            args: argv,
            environment,
        }
    }
}

/// What a launch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchReport {
    /// Mode actually used (never [`LaunchMode::Auto`])
    pub mode: LaunchMode,
    /// Host processes started successfully
    pub invocations: usize,
}

/// Something that can run an argument plan.
pub trait HostLauncher {
    fn launch(&self, plan: &ArgumentPlan) -> Result<LaunchReport, LaunchError>;
}

/// Settle [`LaunchMode::Auto`] for `plan`.
pub fn resolve_mode(plan: &ArgumentPlan, mode: LaunchMode) -> LaunchMode {
    match mode {
        LaunchMode::Auto if plan.has_uniform_environment() => LaunchMode::Compound,
        LaunchMode::Auto => LaunchMode::PerAction,
        explicit => explicit,
    }
}

/// Host processes needed to run `plan` in `mode`, in order.
pub fn invocations(
    plan: &ArgumentPlan,
    host: &HostConfig,
    mode: LaunchMode,
) -> Result<Vec<Invocation>, LaunchError> {
    if plan.is_empty() {
        return Err(LaunchError::EmptyPlan);
    }

    match resolve_mode(plan, mode) {
        LaunchMode::PerAction => Ok(per_action(plan, host)),
        _ => {
            if !plan.has_uniform_environment() {
                log::warn!(
                    "Compound launch with differing pane environments; using the first pane's"
                );
            }
            let environment = plan
                .panes()
                .next()
                .map(|pane| pane.environment.clone())
                .unwrap_or_default();
            Ok(vec![Invocation::from_argv(plan.argv(), environment)])
        }
    }
}

fn per_action(plan: &ArgumentPlan, host: &HostConfig) -> Vec<Invocation> {
    let target = host.window_target_or_current();
    let mut environment = Environment::new();
    let mut result = Vec::new();

    for action in plan.actions() {
        // Focus actions create nothing; the previous environment will do.
        if let Some(pane) = action.pane() {
            environment = pane.environment.clone();
        }
        let argv = plan.single_action_argv(target, &action);
        result.push(Invocation::from_argv(argv, environment.clone()));
    }
    result
}

/// Runs the host as child processes and waits for each to exit.
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher {
    host: HostConfig,
}

impl ProcessLauncher {
    pub fn new(host: HostConfig) -> Self {
        Self { host }
    }

    fn run(&self, invocation: &Invocation) -> Result<(), LaunchError> {
        log::debug!(
            "Running {} {:?} with {} environment variable(s)",
            invocation.program,
            invocation.args,
            invocation.environment.len()
        );

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .env_clear()
            .envs(&invocation.environment)
            .status()
            .map_err(|source| LaunchError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::HostFailed {
                program: invocation.program.clone(),
                status,
            })
        }
    }
}

impl HostLauncher for ProcessLauncher {
    fn launch(&self, plan: &ArgumentPlan) -> Result<LaunchReport, LaunchError> {
        let mode = resolve_mode(plan, self.host.launch_mode);
        let invocations = invocations(plan, &self.host, mode)?;
        log::info!(
            "Launching {} with {} tab(s) in {} invocation(s)",
            self.host.executable,
            plan.tabs.len(),
            invocations.len()
        );

        for (done, invocation) in invocations.iter().enumerate() {
            if let Err(e) = self.run(invocation) {
                log::error!("Host invocation {} of {} failed: {e}", done + 1, invocations.len());
                return Err(e);
            }
        }

        Ok(LaunchReport {
            mode,
            invocations: invocations.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Action, PaneDirectives, TabGroup};

    fn pane(command: &str, env: &[(&str, &str)]) -> PaneDirectives {
        PaneDirectives {
            command: Some(vec![command.to_string()]),
            environment: env
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..PaneDirectives::default()
        }
    }

    fn plan(tabs: Vec<Vec<Action>>) -> ArgumentPlan {
        ArgumentPlan {
            executable: "wt".to_string(),
            window_args: vec!["-w".to_string(), "0".to_string()],
            tabs: tabs
                .into_iter()
                .map(|actions| TabGroup { actions })
                .collect(),
            focus_tab: None,
        }
    }

    #[test]
    fn test_empty_plan_is_rejected() {
        let err = invocations(&plan(vec![]), &HostConfig::default(), LaunchMode::Auto).unwrap_err();
        assert!(matches!(err, LaunchError::EmptyPlan));
    }

    #[test]
    fn test_auto_uses_compound_for_uniform_environment() {
        let plan = plan(vec![
            vec![Action::NewTab { pane: pane("a", &[("X", "1")]) }],
            vec![Action::NewTab { pane: pane("b", &[("X", "1")]) }],
        ]);
        assert_eq!(resolve_mode(&plan, LaunchMode::Auto), LaunchMode::Compound);

        let invocations = invocations(&plan, &HostConfig::default(), LaunchMode::Auto).unwrap();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].program, "wt");
        assert_eq!(invocations[0].args, vec!["-w", "0", "nt", "a", ";", "nt", "b"]);
        assert_eq!(invocations[0].environment.get("X").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_auto_splits_differing_environments() {
        let plan = plan(vec![vec![
            Action::NewTab { pane: pane("a", &[("X", "1")]) },
            Action::MoveFocus {
                direction: crate::plan::FocusDirection::Left,
            },
            Action::NewTab { pane: pane("b", &[("X", "2")]) },
        ]]);
        assert_eq!(resolve_mode(&plan, LaunchMode::Auto), LaunchMode::PerAction);

        let invocations = invocations(&plan, &HostConfig::default(), LaunchMode::Auto).unwrap();
        let envs: Vec<_> = invocations
            .iter()
            .map(|i| i.environment.get("X").cloned())
            .collect();
        assert_eq!(
            envs,
            vec![Some("1".to_string()), Some("1".to_string()), Some("2".to_string())]
        );
        assert_eq!(invocations[1].args, vec!["-w", "0", "mf", "left"]);
    }

    #[test]
    fn test_per_action_addresses_configured_window() {
        let host = HostConfig {
            window_target: Some("dev".to_string()),
            ..HostConfig::default()
        };
        let mut plan = plan(vec![
            vec![Action::NewTab { pane: pane("a", &[]) }],
            vec![Action::NewTab { pane: pane("b", &[]) }],
        ]);
        plan.focus_tab = Some(0);

        let invocations = invocations(&plan, &host, LaunchMode::PerAction).unwrap();
        assert_eq!(invocations.len(), 3);
        assert_eq!(invocations[0].args, vec!["-w", "dev", "nt", "a"]);
        assert_eq!(invocations[1].args, vec!["-w", "dev", "nt", "b"]);
        assert_eq!(invocations[2].args, vec!["-w", "dev", "ft", "-p"]);
    }

    #[test]
    fn test_explicit_mode_is_kept() {
        let plan = plan(vec![vec![Action::NewTab { pane: pane("a", &[]) }]]);
        assert_eq!(resolve_mode(&plan, LaunchMode::PerAction), LaunchMode::PerAction);
        assert_eq!(resolve_mode(&plan, LaunchMode::Compound), LaunchMode::Compound);
    }
}
