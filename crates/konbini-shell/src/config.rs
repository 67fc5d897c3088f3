//! Shell configuration.
//!
//! Defaults, then an optional YAML file, then `KONBINI_*` environment
//! overrides, then `~` expansion and validation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Root config
// ---------------------------------------------------------------------------

/// Root configuration for the konbini shell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub initial_route: String,
    pub logging: LoggingConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            initial_route: "home".into(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file path. Empty means stderr.
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            file: String::new(),
        }
    }
}

impl ShellConfig {
    /// Load from the first config file found plus process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        let path = find_config_file(&env);
        Self::load_from(path.as_deref(), &env)
    }

    /// Load from an explicit file (if any) and an explicit environment.
    pub fn load_from(path: Option<&Path>, env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut cfg = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        cfg.apply_env(env);
        cfg.expand_paths();
        cfg.validate().map_err(ConfigError::Invalid)?;
        Ok(cfg)
    }

    /// Parse a YAML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `KONBINI_INITIAL_ROUTE`, `KONBINI_LOG_LEVEL`, `KONBINI_LOG_FILE`.
    pub fn apply_env(&mut self, env: &HashMap<String, String>) {
        if let Some(route) = non_empty(env, "KONBINI_INITIAL_ROUTE") {
            self.initial_route = route;
        }
        if let Some(level) = non_empty(env, "KONBINI_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(file) = non_empty(env, "KONBINI_LOG_FILE") {
            self.logging.file = file;
        }
    }

    pub fn expand_paths(&mut self) {
        self.logging.file = expand_tilde(&self.logging.file);
    }

    /// Validates the configuration, returning an error message on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_route.trim().is_empty() {
            return Err("initial_route is required".into());
        }
        match self.logging.level.to_lowercase().trim() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err("logging.level must be one of trace, debug, info, warn, error".into()),
        }
    }
}

fn non_empty(env: &HashMap<String, String>, key: &str) -> Option<String> {
    env.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if path == "~" {
        return home_dir().display().to_string();
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return home_dir().join(rest).display().to_string();
    }
    path.to_string()
}

/// Search `KONBINI_CONFIG`, then the XDG and home config directories.
pub fn find_config_file(env: &HashMap<String, String>) -> Option<PathBuf> {
    if let Some(explicit) = non_empty(env, "KONBINI_CONFIG") {
        return Some(PathBuf::from(expand_tilde(&explicit)));
    }
    config_search_paths(env)
        .into_iter()
        .map(|dir| dir.join("config.yaml"))
        .find(|candidate| candidate.is_file())
}

fn config_search_paths(env: &HashMap<String, String>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(xdg) = non_empty(env, "XDG_CONFIG_HOME") {
        paths.push(Path::new(&xdg).join("konbini"));
    }
    let home = home_dir();
    if home.as_os_str() != "" {
        paths.push(home.join(".config/konbini"));
    }
    paths
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
