//! Virtual-environment deactivation for spawned panes.
//!
//! The terminal host starts every pane with the environment of the process
//! that launched it. When that process runs inside an activated virtual
//! environment, every pane would silently inherit the activation. The
//! sanitizer strips it from a copy of the environment.
//!
//! This mirrors what the `deactivate` scripts do to variables only. Shell
//! level side effects of activation (redefined functions, aliases, prompt
//! hooks) are invisible from here and are left alone.

use super::Environment;
use wt_layout_config::{SanitizerConfig, VirtualEnvMarkers};

/// Pure transform from a process environment to a deactivated copy.
#[derive(Debug, Clone, Copy)]
pub struct Sanitizer<'a> {
    config: &'a SanitizerConfig,
}

impl<'a> Sanitizer<'a> {
    pub fn new(config: &'a SanitizerConfig) -> Self {
        Self { config }
    }

    /// Return `env` with every configured activation removed.
    ///
    /// Applying this to its own output changes nothing.
    pub fn sanitize(&self, env: &Environment) -> Environment {
        let mut out = env.clone();
        if !self.config.enabled {
            return out;
        }
        for markers in &self.config.markers {
            self.deactivate(&mut out, markers);
        }
        out
    }

    fn deactivate(&self, env: &mut Environment, markers: &VirtualEnvMarkers) {
        let root = self.remove(env, &markers.root_var);

        for rule in &markers.restore {
            if let Some(saved) = self.remove(env, &rule.saved) {
                log::debug!("Restoring {} from {}", rule.target, rule.saved);
                let target = self.key_for(env, &rule.target);
                env.insert(target, saved);
            }
        }
        for name in &markers.clear_vars {
            self.remove(env, name);
        }

        let Some(root) = root.filter(|r| !r.trim().is_empty()) else {
            return;
        };
        let path_key = self.key_for(env, &markers.search_path_var);
        if let Some(path) = env.get(&path_key) {
            let stripped = self.strip_search_path(path, &root, &markers.executable_dirs);
            if stripped != *path {
                log::debug!(
                    "Removed entries below {root} from {}",
                    markers.search_path_var
                );
                env.insert(path_key, stripped);
            }
        }
    }

    /// Drop every search-path entry at or below `root/<dir>` for each
    /// executable directory, keeping all other entries in order.
    ///
    /// Matching entries are removed wherever they appear, not only at the
    /// front: activating twice or nesting shells can leave several copies.
    pub fn strip_search_path(
        &self,
        search_path: &str,
        root: &str,
        executable_dirs: &[String],
    ) -> String {
        let separator = self.config.path_separator;
        let root = self.normalize(root);
        let root = root.strip_suffix('/').unwrap_or(&root);
        let activated: Vec<String> = executable_dirs
            .iter()
            .map(|dir| self.normalize(&format!("{root}/{dir}")))
            .collect();

        search_path
            .split(separator)
            .filter(|entry| {
                let entry = self.normalize(entry);
                !activated
                    .iter()
                    .any(|dir| entry == *dir || entry.starts_with(&format!("{dir}/")))
            })
            .collect::<Vec<_>>()
            .join(&separator.to_string())
    }

    fn normalize(&self, path: &str) -> String {
        let mut normalized = path.trim().replace('\\', "/");
        while normalized.len() > 1 && normalized.ends_with('/') {
            normalized.pop();
        }
        if self.config.case_insensitive {
            normalized.to_lowercase()
        } else {
            normalized
        }
    }

    /// The key `name` is stored under, honoring case-insensitive names
    /// (`Path` vs `PATH` on Windows).
    fn key_for(&self, env: &Environment, name: &str) -> String {
        if self.config.case_insensitive
            && let Some(existing) = env.keys().find(|k| k.eq_ignore_ascii_case(name))
        {
            return existing.clone();
        }
        name.to_string()
    }

    fn remove(&self, env: &mut Environment, name: &str) -> Option<String> {
        let key = self.key_for(env, name);
        env.remove(&key)
    }
}
