//! config
//!
//! Configuration loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Config file
//! 3. Environment variables
//!
//! # File locations
//!
//! Searched in order:
//! 1. `$HUBCAP_CONFIG` if set
//! 2. `<user config dir>/hubcap/config.toml`
//!
//! # Environment variables
//!
//! - `HUBCAP_GITHUB_TOKEN` (or `GITHUB_TOKEN`): API token
//! - `HUBCAP_API_URL`: API base, for GitHub Enterprise installs
//!
//! The resolved [`Config`] is constructed once at startup and passed by
//! reference into the client and registry constructors; nothing reads
//! ambient process state after that.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: PathBuf, message: String },
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API token; `None` runs unauthenticated (public reads only)
    pub token: Option<String>,
    /// API base URL
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// On-disk config schema.
///
/// ```toml
/// token = "ghp_..."
/// api_base = "https://github.example.com/api/v3"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    token: Option<String>,
    api_base: Option<String>,
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = config_file_path() {
            if path.exists() {
                config.apply_file(&path)?;
            }
        }
        config.apply_env();

        Ok(config)
    }

    /// Layer a config file over the current values.
    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if let Some(token) = file.token {
            self.token = Some(token);
        }
        if let Some(api_base) = file.api_base {
            self.api_base = api_base;
        }
        Ok(())
    }

    /// Layer environment variables over the current values.
    fn apply_env(&mut self) {
        if let Some(token) = read_env("HUBCAP_GITHUB_TOKEN").or_else(|| read_env("GITHUB_TOKEN")) {
            self.token = Some(token);
        }
        if let Some(api_base) = read_env("HUBCAP_API_URL") {
            self.api_base = api_base;
        }
    }
}

/// Read an environment variable, treating empty values as unset.
fn read_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

/// Locate the config file.
fn config_file_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("HUBCAP_CONFIG") {
        if !explicit.trim().is_empty() {
            return Some(PathBuf::from(explicit));
        }
    }
    dirs::config_dir().map(|dir| dir.join("hubcap").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.token.is_none());
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn file_values_apply() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "token = \"from-file\"\napi_base = \"https://ghe.example.com/api/v3\""
        )
        .unwrap();

        let mut config = Config::default();
        config.apply_file(file.path()).unwrap();
        assert_eq!(config.token.as_deref(), Some("from-file"));
        assert_eq!(config.api_base, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "token = \"only-token\"").unwrap();

        let mut config = Config::default();
        config.apply_file(file.path()).unwrap();
        assert_eq!(config.token.as_deref(), Some("only-token"));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tokne = \"typo\"").unwrap();

        let mut config = Config::default();
        let err = config.apply_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
