//! Layered application settings.
//!
//! Settings are assembled from four ranked sources, highest priority first:
//! process environment variables, the `.env` file, the environment-specific
//! `settings.<environment>.yaml`, and the base `settings.yaml`. Lower-ranked
//! sources only fill keys every higher-ranked source left unset, leaf by
//! leaf. Flat environment keys nest on the `__` delimiter, so
//! `ROLLBAR__ACCESS_TOKEN` addresses `rollbar.access_token`.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::Deserialize;

use crate::errors;
use crate::Error;

/// The version reported when no source supplies one and git cannot either.
pub const UNKNOWN_VERSION: &str = "unknown";

const NESTING_DELIMITER: &str = "__";
const GIT_TIMEOUT: Duration = Duration::from_secs(5);

/// The environment the application is running in, and the root directory
/// configuration files are resolved against.
#[derive(Debug, Clone)]
pub struct AppEnvironment {
    pub name: String,
    root: PathBuf,
}

impl AppEnvironment {
    /// Detects the active environment from the `ENVIRONMENT` variable,
    /// checking the process environment first and the `.env` file second,
    /// defaulting to `local`. The working directory becomes the project
    /// root.
    pub fn detect() -> Self {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::in_root(root)
    }

    /// Like [`AppEnvironment::detect`], anchored at an explicit root.
    pub fn in_root(root: PathBuf) -> Self {
        let name = std::env::var("ENVIRONMENT")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| {
                let mut vars = dotenv_values(&root.join(".env"));
                vars.remove("ENVIRONMENT")
            })
            .unwrap_or_else(|| "local".to_string());

        AppEnvironment { name, root }
    }

    pub fn from_root<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.root.join(relative)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rollbar: RollbarSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RollbarSettings {
    pub access_token: String,
    pub code_version: String,
    pub errors_only: bool,
}

impl Settings {
    /// Resolves the application settings from the ranked sources described
    /// in the module docs.
    ///
    /// Missing files are not errors; malformed files and a missing
    /// `rollbar.access_token` are. `rollbar.code_version` is used verbatim
    /// when any source supplies it, otherwise it is derived from git once
    /// per resolution, degrading silently to [`UNKNOWN_VERSION`].
    pub fn resolve(environment: &AppEnvironment) -> Result<Self, Error> {
        let dotenv = dotenv_values(&environment.from_root(".env"));

        // figment gives later merges precedence, so the providers stack
        // from the lowest-priority source upwards.
        let figment = Figment::new()
            .merge(Yaml::file(environment.from_root("settings.yaml")))
            .merge(Yaml::file(
                environment.from_root(format!("settings.{}.yaml", environment.name)),
            ))
            .merge(Serialized::defaults(nest(&dotenv)))
            .merge(Env::raw().split(NESTING_DELIMITER));

        let mut settings: Settings = figment.extract().map_err(|e| {
            errors::user_with_internal(
                "Your configuration files could not be loaded.",
                "Check settings.yaml and any environment-specific overrides for syntax errors and try again.",
                e,
            )
        })?;

        if settings.rollbar.access_token.trim().is_empty() {
            return Err(errors::user(
                "The required setting 'rollbar.access_token' is missing from your configuration.",
                "Set the ROLLBAR__ACCESS_TOKEN environment variable, or add rollbar.access_token to settings.yaml.",
            ));
        }

        if settings.rollbar.code_version.trim().is_empty() {
            settings.rollbar.code_version =
                git_revision(environment.root()).unwrap_or_else(|| UNKNOWN_VERSION.to_string());
        }

        Ok(settings)
    }
}

/// Reads `KEY=value` pairs from a dotenv file without touching the process
/// environment. A missing or unreadable file yields an empty mapping.
fn dotenv_values(path: &Path) -> HashMap<String, String> {
    match dotenvy::from_path_iter(path) {
        Ok(entries) => entries.filter_map(|entry| entry.ok()).collect(),
        Err(_) => HashMap::new(),
    }
}

/// Expands flat `KEY__NESTED=value` pairs into the nested mapping the YAML
/// sources produce natively. Keys are lowercased so matching stays
/// case-insensitive.
fn nest(flat: &HashMap<String, String>) -> serde_json::Value {
    let mut root = serde_json::Map::new();

    for (key, value) in flat {
        let mut node = &mut root;
        let mut parts = key.split(NESTING_DELIMITER).peekable();

        while let Some(part) = parts.next() {
            let part = part.to_lowercase();
            if parts.peek().is_none() {
                node.insert(part, coerce(value));
            } else {
                let child = node
                    .entry(part)
                    .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
                node = match child.as_object_mut() {
                    Some(object) => object,
                    // A scalar already claimed this segment; first writer wins.
                    None => break,
                };
            }
        }
    }

    serde_json::Value::Object(root)
}

/// Dotenv values are untyped strings; booleans are the one scalar the
/// settings schema needs recognised.
fn coerce(value: &str) -> serde_json::Value {
    match value.parse::<bool>() {
        Ok(flag) => serde_json::Value::Bool(flag),
        Err(_) => serde_json::Value::String(value.to_string()),
    }
}

/// Asks git for the current revision, bounded so a misbehaving git cannot
/// hang startup. Any failure yields `None`.
fn git_revision(root: &Path) -> Option<String> {
    let mut child = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(root)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;

    let deadline = Instant::now() + GIT_TIMEOUT;
    loop {
        match child.try_wait() {
            Ok(Some(status)) if status.success() => break,
            Ok(Some(_)) => return None,
            Ok(None) if Instant::now() >= deadline => {
                debug!(
                    "git rev-parse did not finish within {}s, giving up on version detection.",
                    GIT_TIMEOUT.as_secs()
                );
                child.kill().ok();
                child.wait().ok();
                return None;
            }
            Ok(None) => std::thread::sleep(Duration::from_millis(25)),
            Err(_) => {
                child.kill().ok();
                return None;
            }
        }
    }

    let mut output = String::new();
    child.stdout.take()?.read_to_string(&mut output).ok()?;

    let revision = output.trim();
    if revision.is_empty() {
        None
    } else {
        Some(revision.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(jail: &figment::Jail, name: &str) -> AppEnvironment {
        AppEnvironment {
            name: name.to_string(),
            root: jail.directory().to_path_buf(),
        }
    }

    #[test]
    fn env_vars_win_over_every_file_source() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("settings.yaml", "rollbar:\n  access_token: base_token\n")?;
            jail.create_file(
                "settings.local.yaml",
                "rollbar:\n  access_token: local_token\n",
            )?;
            jail.create_file(".env", "ROLLBAR__ACCESS_TOKEN=dotenv_token")?;
            jail.set_env("ROLLBAR__ACCESS_TOKEN", "abc123");

            let settings = Settings::resolve(&environment(jail, "local"))
                .expect("settings should resolve");
            assert_eq!(settings.rollbar.access_token, "abc123");
            Ok(())
        });
    }

    #[test]
    fn dotenv_wins_over_yaml_sources() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("settings.yaml", "rollbar:\n  access_token: base_token\n")?;
            jail.create_file(
                "settings.local.yaml",
                "rollbar:\n  access_token: local_token\n",
            )?;
            jail.create_file(".env", "ROLLBAR__ACCESS_TOKEN=dotenv_token")?;

            let settings = Settings::resolve(&environment(jail, "local"))
                .expect("settings should resolve");
            assert_eq!(settings.rollbar.access_token, "dotenv_token");
            Ok(())
        });
    }

    #[test]
    fn environment_yaml_wins_over_base_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("settings.yaml", "rollbar:\n  access_token: base_token\n")?;
            jail.create_file(
                "settings.local.yaml",
                "rollbar:\n  access_token: local_token\n",
            )?;

            let settings = Settings::resolve(&environment(jail, "local"))
                .expect("settings should resolve");
            assert_eq!(settings.rollbar.access_token, "local_token");
            Ok(())
        });
    }

    #[test]
    fn base_yaml_is_used_when_nothing_overrides_it() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("settings.yaml", "rollbar:\n  access_token: base_token\n")?;

            let settings = Settings::resolve(&environment(jail, "local"))
                .expect("settings should resolve");
            assert_eq!(settings.rollbar.access_token, "base_token");
            Ok(())
        });
    }

    #[test]
    fn lower_sources_fill_leaves_the_higher_ones_left_unset() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "settings.yaml",
                "rollbar:\n  access_token: base_token\n  code_version: base_version\n",
            )?;
            jail.set_env("ROLLBAR__CODE_VERSION", "env_version");

            let settings = Settings::resolve(&environment(jail, "local"))
                .expect("settings should resolve");
            assert_eq!(settings.rollbar.access_token, "base_token");
            assert_eq!(settings.rollbar.code_version, "env_version");
            Ok(())
        });
    }

    #[test]
    fn a_missing_access_token_is_a_configuration_error() {
        figment::Jail::expect_with(|jail| {
            let err = Settings::resolve(&environment(jail, "local"))
                .expect_err("resolution should fail without a token");
            assert!(err.to_string().contains("rollbar.access_token"));
            Ok(())
        });
    }

    #[test]
    fn env_only_resolution_uses_defaults_for_the_rest() {
        figment::Jail::expect_with(|jail| {
            std::env::remove_var("ENVIRONMENT");
            jail.set_env("ROLLBAR__ACCESS_TOKEN", "abc123");

            let environment = AppEnvironment::in_root(jail.directory().to_path_buf());
            assert_eq!(environment.name, "local");

            let settings = Settings::resolve(&environment).expect("settings should resolve");
            assert_eq!(settings.rollbar.access_token, "abc123");
            assert!(!settings.rollbar.errors_only);
            assert!(!settings.rollbar.code_version.is_empty());
            Ok(())
        });
    }

    #[test]
    fn an_explicit_code_version_is_used_verbatim() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "settings.yaml",
                "rollbar:\n  access_token: base_token\n  code_version: v1.2.3\n",
            )?;

            let settings = Settings::resolve(&environment(jail, "local"))
                .expect("settings should resolve");
            assert_eq!(settings.rollbar.code_version, "v1.2.3");
            Ok(())
        });
    }

    #[test]
    fn code_version_degrades_to_unknown_outside_a_repository() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ROLLBAR__ACCESS_TOKEN", "abc123");

            // The jail directory is a bare temp dir, so git has nothing to
            // report and resolution falls back to the sentinel.
            let settings = Settings::resolve(&environment(jail, "local"))
                .expect("settings should resolve");
            assert_eq!(settings.rollbar.code_version, UNKNOWN_VERSION);
            Ok(())
        });
    }

    #[test]
    fn errors_only_flag_parses_from_the_environment() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ROLLBAR__ACCESS_TOKEN", "abc123");
            jail.set_env("ROLLBAR__ERRORS_ONLY", "true");

            let settings = Settings::resolve(&environment(jail, "local"))
                .expect("settings should resolve");
            assert!(settings.rollbar.errors_only);
            Ok(())
        });
    }

    #[test]
    fn errors_only_flag_parses_from_dotenv() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                ".env",
                "ROLLBAR__ACCESS_TOKEN=dotenv_token\nROLLBAR__ERRORS_ONLY=true\n",
            )?;

            let settings = Settings::resolve(&environment(jail, "local"))
                .expect("settings should resolve");
            assert!(settings.rollbar.errors_only);
            Ok(())
        });
    }

    #[test]
    fn environment_name_comes_from_the_process_environment_first() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(".env", "ENVIRONMENT=staging\n")?;
            jail.set_env("ENVIRONMENT", "production");

            let environment = AppEnvironment::in_root(jail.directory().to_path_buf());
            assert_eq!(environment.name, "production");
            Ok(())
        });
    }

    #[test]
    fn environment_name_falls_back_to_dotenv_then_local() {
        figment::Jail::expect_with(|jail| {
            std::env::remove_var("ENVIRONMENT");
            jail.create_file(".env", "ENVIRONMENT=staging\n")?;

            let environment = AppEnvironment::in_root(jail.directory().to_path_buf());
            assert_eq!(environment.name, "staging");
            Ok(())
        });
    }

    #[test]
    fn nesting_splits_on_the_delimiter_and_lowercases() {
        let mut flat = HashMap::new();
        flat.insert("ROLLBAR__ACCESS_TOKEN".to_string(), "abc".to_string());
        flat.insert("ROLLBAR__ERRORS_ONLY".to_string(), "true".to_string());

        let nested = nest(&flat);
        assert_eq!(nested["rollbar"]["access_token"], "abc");
        assert_eq!(nested["rollbar"]["errors_only"], true);
    }

    #[test]
    fn keys_without_the_delimiter_stay_flat() {
        let mut flat = HashMap::new();
        flat.insert("ROLLBAR".to_string(), "scalar".to_string());

        let nested = nest(&flat);
        assert_eq!(nested["rollbar"], "scalar");
    }
}
