//! konbini-router: page-history navigation controller for the konbini TUI.
//!
//! Maps route names to page factories and keeps a browser-style history chain
//! with back/forward traversal, lifecycle hooks, and forward-branch pruning on
//! new navigation. Deferred work is returned as [`Command`] values for the
//! host runtime to schedule.

pub mod command;
pub mod error;
pub mod history;
pub mod page;
pub mod params;
pub mod registry;
pub mod router;

pub use command::{Command, Task};
pub use error::RouterError;
pub use page::{LifecycleHooks, Page};
pub use params::Params;
pub use registry::PageFactory;
pub use router::{HistoryItem, Router};

/// Stable crate label used for bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "konbini-router"
}
