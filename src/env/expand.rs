//! Variable references in pane directives.
//!
//! Supported forms, resolved against the pane's own merged environment:
//! - `${VAR}` and `$VAR` (POSIX style)
//! - `%VAR%` (cmd style)
//!
//! Unknown names are left exactly as written.

use super::Environment;
use regex::Regex;
use std::sync::LazyLock;

/// Compiled once; matches `${NAME}`, `$NAME` and `%NAME%`.
static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)|%([A-Za-z_][A-Za-z0-9_()]*)%",
    )
    .expect("variable reference regex is a compile-time constant and must be valid")
});

/// Look `name` up, falling back to a case-insensitive match since Windows
/// variable names are not case-sensitive.
fn lookup<'e>(env: &'e Environment, name: &str) -> Option<&'e String> {
    env.get(name).or_else(|| {
        env.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    })
}

/// Replace every variable reference in `input` with its value from `env`.
pub fn expand_variables(input: &str, env: &Environment) -> String {
    if !input.contains('$') && !input.contains('%') {
        return input.to_string();
    }
    VAR_PATTERN
        .replace_all(input, |caps: &regex::Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match lookup(env, name) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Expand a leading `~` to `HOME` (or `USERPROFILE`) from `env`.
pub fn expand_home(dir: &str, env: &Environment) -> String {
    let rest = match dir.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return dir.to_string(),
    };
    match lookup(env, "HOME").or_else(|| lookup(env, "USERPROFILE")) {
        Some(home) => format!("{home}{rest}"),
        None => {
            log::debug!(
                "Cannot expand '~' in {dir:?}: no HOME or USERPROFILE in the pane environment"
            );
            dir.to_string()
        }
    }
}
