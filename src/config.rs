//! `Settings`: the CLI's resolved configuration. Layered defaults → TOML
//! file → `DUALSYNC_*` environment, the same `config`-crate layering the
//! teacher used for its own config file, adapted to this crate's actual
//! `dirs` dependency rather than the unused `directories` crate.
//!
//! Config file location:
//! - Linux: `~/.config/dualsync/config.toml`
//! - macOS: `~/Library/Application Support/dualsync/config.toml`
//! - Windows: `%APPDATA%\dualsync\config.toml`

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(rename = "core-remote")]
    pub core_remote: String,
    #[serde(rename = "github-remote")]
    pub github_remote: String,
    #[serde(rename = "binary-size-threshold-mb")]
    pub binary_size_threshold_mb: u64,
    #[serde(rename = "max-branches")]
    pub max_branches: usize,
    #[serde(rename = "skip-fetch")]
    pub skip_fetch: bool,
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,
    #[serde(rename = "remote-check-timeout-secs")]
    pub remote_check_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            core_remote: "origin".to_string(),
            github_remote: "github".to_string(),
            binary_size_threshold_mb: 50,
            max_branches: 100,
            skip_fetch: false,
            fetch_timeout_secs: 30,
            remote_check_timeout_secs: 2,
        }
    }
}

fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dualsync").join("config.toml"))
}

pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(None)
}

/// `override_path` is `--config`: when given, it replaces the discovered
/// per-user config file rather than layering alongside it.
pub fn load_settings_from(override_path: Option<&std::path::Path>) -> Result<Settings, ConfigError> {
    let defaults = Settings::default();

    let mut builder = Config::builder()
        .set_default("core-remote", defaults.core_remote)?
        .set_default("github-remote", defaults.github_remote)?
        .set_default("binary-size-threshold-mb", defaults.binary_size_threshold_mb)?
        .set_default("max-branches", defaults.max_branches as i64)?
        .set_default("skip-fetch", defaults.skip_fetch)?
        .set_default("fetch-timeout-secs", defaults.fetch_timeout_secs)?
        .set_default(
            "remote-check-timeout-secs",
            defaults.remote_check_timeout_secs,
        )?;

    let config_path = override_path.map(PathBuf::from).or_else(get_config_path);
    if let Some(config_path) = config_path
        && config_path.exists()
    {
        builder = builder.add_source(File::from(config_path));
    }

    builder = builder.add_source(config::Environment::with_prefix("DUALSYNC").separator("_"));

    let settings: Settings = builder.build()?.try_deserialize()?;
    validate_settings(&settings)?;
    Ok(settings)
}

fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    if settings.core_remote.is_empty() || settings.github_remote.is_empty() {
        return Err(ConfigError::Message(
            "core-remote and github-remote must not be empty".to_string(),
        ));
    }
    if settings.core_remote == settings.github_remote {
        return Err(ConfigError::Message(
            "core-remote and github-remote must name different remotes".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let settings = Settings::default();
        assert_eq!(settings.core_remote, "origin");
        assert_eq!(settings.github_remote, "github");
        assert_eq!(settings.binary_size_threshold_mb, 50);
        assert_eq!(settings.max_branches, 100);
        assert!(!settings.skip_fetch);
        assert_eq!(settings.fetch_timeout_secs, 30);
        assert_eq!(settings.remote_check_timeout_secs, 2);
    }

    #[test]
    fn load_settings_without_file_or_env_returns_defaults() {
        let settings = load_settings().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn validate_rejects_identical_remotes() {
        let mut settings = Settings::default();
        settings.github_remote = settings.core_remote.clone();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn validate_rejects_empty_remote() {
        let mut settings = Settings::default();
        settings.core_remote = String::new();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn serializes_with_kebab_case_keys() {
        let toml = toml::to_string(&Settings::default()).unwrap();
        assert!(toml.contains("core-remote"));
        assert!(toml.contains("binary-size-threshold-mb"));
    }
}
