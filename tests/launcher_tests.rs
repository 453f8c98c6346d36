//! Launcher tests.
//!
//! The process tests run a shell script standing in for the terminal host.
//! It appends its arguments and the variables it was started with to the
//! file named by `WT_LOG`, which the layout itself supplies.

mod common;

use common::{compile_yaml_with, env_of, tree_from_yaml};
use std::cell::RefCell;
use wt_layout::{
    ArgumentPlan, Environment, HostConfig, HostLauncher, LaunchError, LaunchMode, LaunchReport,
    LayoutConfig, ProcessLauncher, compile,
};

/// Records plans instead of starting anything.
#[derive(Default)]
struct RecordingLauncher {
    argvs: RefCell<Vec<Vec<String>>>,
}

impl HostLauncher for RecordingLauncher {
    fn launch(&self, plan: &ArgumentPlan) -> Result<LaunchReport, LaunchError> {
        if plan.is_empty() {
            return Err(LaunchError::EmptyPlan);
        }
        self.argvs.borrow_mut().push(plan.argv());
        Ok(LaunchReport {
            mode: LaunchMode::Compound,
            invocations: 1,
        })
    }
}

#[test]
fn test_launcher_is_usable_as_trait_object() {
    let yaml = r#"
- kind: tab
  children:
    - {kind: pane, command: [htop]}
"#;
    let plan = compile_yaml_with(yaml, &Environment::new(), &LayoutConfig::default());
    let recorder = RecordingLauncher::default();
    let launcher: &dyn HostLauncher = &recorder;

    let report = launcher.launch(&plan).unwrap();
    assert_eq!(report.invocations, 1);
    assert_eq!(
        recorder.argvs.borrow().as_slice(),
        &[vec!["wt", "-w", "0", "nt", "htop"]]
    );
}

#[test]
fn test_missing_host_reports_spawn_error() {
    let host = HostConfig {
        executable: "/nonexistent/wt-layout-test-host".to_string(),
        ..HostConfig::default()
    };
    let mut config = LayoutConfig::default();
    config.host = host.clone();

    let tree = tree_from_yaml("- {kind: tab, children: [{kind: pane}]}");
    let plan = compile(&tree, &Environment::new(), &config).unwrap();

    let err = ProcessLauncher::new(host).launch(&plan).unwrap_err();
    match err {
        LaunchError::Spawn { program, source } => {
            assert_eq!(program, "/nonexistent/wt-layout-test-host");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected a spawn error, got {other:?}"),
    }
}

#[test]
fn test_top_level_launch_adds_context() {
    let mut config = LayoutConfig::default();
    config.host.executable = "/nonexistent/wt-layout-test-host".to_string();
    let tree = tree_from_yaml("- {kind: tab, children: [{kind: pane}]}");

    let err = wt_layout::launch(&tree, &config).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Failed to launch"), "{message}");
    assert!(err.downcast_ref::<LaunchError>().is_some());
}

#[test]
fn test_top_level_launch_rejects_invalid_layout() {
    let tree = tree_from_yaml("[]");
    let err = wt_layout::launch(&tree, &LayoutConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to compile layout"));
}

#[cfg(unix)]
mod process {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const FAKE_HOST: &str = r#"#!/bin/sh
{
  for arg in "$@"; do echo "arg=$arg"; done
  echo "GREETING=$GREETING"
  echo "VIRTUAL_ENV=$VIRTUAL_ENV"
  echo "---"
} >> "$WT_LOG"
exit "${WT_EXIT:-0}"
"#;

    struct FakeHost {
        // Held so the directory outlives the test
        _dir: TempDir,
        script: PathBuf,
        log: PathBuf,
    }

    impl FakeHost {
        fn new() -> Self {
            let dir = TempDir::new().expect("Failed to create temp dir");
            let script = dir.path().join("fake-wt");
            fs::write(&script, FAKE_HOST).unwrap();
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
            let log = dir.path().join("host.log");
            Self {
                _dir: dir,
                script,
                log,
            }
        }

        fn config(&self, mode: LaunchMode) -> LayoutConfig {
            let mut config = LayoutConfig::default();
            config.host.executable = self.script.to_string_lossy().into_owned();
            config.host.launch_mode = mode;
            config.sanitizer.path_separator = ':';
            config.sanitizer.case_insensitive = false;
            config
        }

        /// One entry per host invocation, each a list of `key=value` lines.
        fn invocations(&self) -> Vec<Vec<String>> {
            read_log(&self.log)
        }
    }

    fn read_log(path: &Path) -> Vec<Vec<String>> {
        let text = fs::read_to_string(path).unwrap_or_default();
        text.split("---\n")
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| chunk.lines().map(str::to_string).collect())
            .collect()
    }

    fn layout(log: &Path, left: &str, right: &str) -> String {
        format!(
            r#"
- kind: tab
  environment: {{WT_LOG: "{}"}}
  children:
    - kind: pane
      split: vertical
      children:
        - {{kind: pane, command: [left], environment: {{GREETING: "{left}"}}}}
        - {{kind: pane, command: [right], environment: {{GREETING: "{right}"}}}}
"#,
            log.display()
        )
    }

    #[test]
    fn test_compound_launch_runs_host_once() {
        let host = FakeHost::new();
        let config = host.config(LaunchMode::Auto);
        let tree = tree_from_yaml(&layout(&host.log, "hi", "hi"));
        let process_env =
            env_of(&[("VIRTUAL_ENV", "/opt/venv"), ("PATH", "/opt/venv/bin:/usr/bin")]);
        let plan = compile(&tree, &process_env, &config).unwrap();

        let report = ProcessLauncher::new(config.host.clone()).launch(&plan).unwrap();
        assert_eq!(report.mode, LaunchMode::Compound);
        assert_eq!(report.invocations, 1);

        let invocations = host.invocations();
        assert_eq!(invocations.len(), 1);
        let args: Vec<&str> = invocations[0]
            .iter()
            .filter_map(|line| line.strip_prefix("arg="))
            .collect();
        assert_eq!(
            args,
            vec!["-w", "0", "nt", "left", ";", "sp", "-V", "-s", "0.5", "right"]
        );
        assert!(invocations[0].contains(&"GREETING=hi".to_string()));
        assert!(invocations[0].contains(&"VIRTUAL_ENV=".to_string()));
    }

    #[test]
    fn test_differing_environments_launch_per_action() {
        let host = FakeHost::new();
        let config = host.config(LaunchMode::Auto);
        let tree = tree_from_yaml(&layout(&host.log, "one", "two"));
        let plan = compile(&tree, &Environment::new(), &config).unwrap();

        let report = ProcessLauncher::new(config.host.clone()).launch(&plan).unwrap();
        assert_eq!(report.mode, LaunchMode::PerAction);
        assert_eq!(report.invocations, 2);

        let invocations = host.invocations();
        assert_eq!(invocations.len(), 2);
        assert!(invocations[0].contains(&"arg=nt".to_string()));
        assert!(invocations[0].contains(&"GREETING=one".to_string()));
        assert!(invocations[1].contains(&"arg=sp".to_string()));
        assert!(invocations[1].contains(&"GREETING=two".to_string()));
    }

    #[test]
    fn test_host_failure_stops_launch() {
        let host = FakeHost::new();
        let config = host.config(LaunchMode::PerAction);
        let yaml = format!(
            r#"
- kind: tab
  environment: {{WT_LOG: "{}", WT_EXIT: "3"}}
  children:
    - {{kind: pane, command: [a]}}
- kind: tab
  environment: {{WT_LOG: "{}"}}
  children:
    - {{kind: pane, command: [b]}}
"#,
            host.log.display(),
            host.log.display()
        );
        let plan = compile(&tree_from_yaml(&yaml), &Environment::new(), &config).unwrap();

        let err = ProcessLauncher::new(config.host.clone())
            .launch(&plan)
            .unwrap_err();
        match err {
            LaunchError::HostFailed { status, .. } => assert_eq!(status.code(), Some(3)),
            other => panic!("expected a host failure, got {other:?}"),
        }
        assert_eq!(host.invocations().len(), 1);
    }
}
