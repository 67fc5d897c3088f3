//! Tracing subscriber setup for the shell binary.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("install subscriber: {0}")]
    Install(String),
}

/// `RUST_LOG` wins over the configured level.
#[must_use]
pub fn env_filter(cfg: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(cfg.level.trim()))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Logs go to `cfg.file` when set, otherwise
/// to stderr so they never mix with the status lines on stdout.
pub fn init_logging(cfg: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = env_filter(cfg);
    let installed = if cfg.file.trim().is_empty() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
    } else {
        let path = PathBuf::from(cfg.file.trim());
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LoggingError::Open { path, source })?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init()
    };
    installed.map_err(|err| LoggingError::Install(err.to_string()))
}
