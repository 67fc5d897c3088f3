//! Deferred work returned by pages and navigation calls.
//!
//! A [`Command`] is handed to the host runtime for scheduling. The router never
//! executes commands itself; it only preserves their submission order.

use std::fmt;
use std::sync::Arc;

use crate::params::Params;

/// Commands returned by pages and the router to drive the host event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    None,
    /// Ask the host to navigate to `to`.
    Navigate {
        to: String,
        params: Params,
    },
    Back,
    Forward,
    Quit,
    Task(Task),
    Batch(Vec<Command>),
}

impl Command {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Navigation request command.
    #[must_use]
    pub fn navigate(to: impl Into<String>, params: Params) -> Self {
        Self::Navigate {
            to: to.into(),
            params,
        }
    }

    /// Wrap a closure as a labelled task command.
    #[must_use]
    pub fn task<F>(label: impl Into<String>, run: F) -> Self
    where
        F: Fn() -> Command + Send + Sync + 'static,
    {
        Self::Task(Task::new(label, run))
    }

    /// Group commands, dropping `None` entries.
    ///
    /// Returns `None` when nothing is left and the single command when only
    /// one remains. Order is preserved.
    #[must_use]
    pub fn batch<I>(cmds: I) -> Self
    where
        I: IntoIterator<Item = Command>,
    {
        let mut kept: Vec<Command> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match kept.len() {
            0 => Self::None,
            1 => kept.pop().unwrap_or(Self::None),
            _ => Self::Batch(kept),
        }
    }

    /// Flatten nested batches depth-first, in submission order.
    #[must_use]
    pub fn into_leaves(self) -> Vec<Command> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(self, out: &mut Vec<Command>) {
        match self {
            Self::None => {}
            Self::Batch(cmds) => {
                for cmd in cmds {
                    cmd.collect_leaves(out);
                }
            }
            other => out.push(other),
        }
    }
}

impl From<Task> for Command {
    fn from(task: Task) -> Self {
        Self::Task(task)
    }
}

/// An opaque unit of deferred work.
///
/// Running a task yields a follow-up command. Tasks compare by label since
/// closures carry no identity.
#[derive(Clone)]
pub struct Task {
    label: String,
    run: Arc<dyn Fn() -> Command + Send + Sync>,
}

impl Task {
    pub fn new<F>(label: impl Into<String>, run: F) -> Self
    where
        F: Fn() -> Command + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            run: Arc::new(run),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Execute the task.
    #[must_use]
    pub fn run(&self) -> Command {
        (self.run)()
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}
