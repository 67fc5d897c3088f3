//! konbini-shell: terminal client shell built on `konbini-router`.
//!
//! Hosts the konbini screens, turns decoded [`Message`]s into router calls,
//! and drains the deferred work screens hand back.

pub mod app;
pub mod config;
pub mod logging;
pub mod message;
pub mod screens;
pub mod session;

pub use app::{Flow, Screen, Shell};
pub use config::{ConfigError, LoggingConfig, ShellConfig};
pub use message::{Message, ParseError};
pub use session::run_session;

/// Stable crate label used for bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "konbini-shell"
}
