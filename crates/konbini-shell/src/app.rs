//! App shell for the konbini terminal client.
//!
//! Owns the router, routes messages to the current screen, resolves the
//! navigation commands screens return, and drains deferred work in submission
//! order. Individual screens implement the [`Screen`] trait.

use std::collections::VecDeque;

use konbini_router::{Command, Page, Params, Router, RouterError};
use tracing::{debug, warn};

use crate::message::Message;

/// Upper bound on commands processed by one [`Shell::drain`] call.
const MAX_DRAIN_STEPS: usize = 256;

// ---------------------------------------------------------------------------
// Screen trait
// ---------------------------------------------------------------------------

/// A routable page that also handles ordinary messages.
pub trait Screen: Page {
    /// Short label used in the status line.
    fn title(&self) -> &str;

    /// Handle a non-navigation message routed to this screen.
    fn update(&mut self, msg: &Message) -> Command;

    /// One-line plain text description of the screen state.
    fn summary(&self) -> String;
}

/// Whether the host loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

/// Global client state: the router plus the status line.
pub struct Shell {
    router: Router<dyn Screen>,
    home: String,
    status: String,
    quitting: bool,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    #[must_use]
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            home: String::new(),
            status: String::new(),
            quitting: false,
        }
    }

    // -- screen registration ---------------------------------------------------

    pub fn register_screen<F>(&mut self, route: &str, factory: F) -> Result<(), RouterError>
    where
        F: Fn(&Params) -> Box<dyn Screen> + 'static,
    {
        self.router.register_page(route, factory)
    }

    /// Install the first screen. `route` also becomes the logout target.
    ///
    /// The returned work is meant for [`Self::drain`].
    pub fn start(&mut self, route: &str, params: Params) -> Result<Command, RouterError> {
        let cmd = self.router.set_initial_page(route, params)?;
        self.home = route.to_owned();
        Ok(cmd)
    }

    /// Drop the whole history and return to the start screen.
    pub fn logout(&mut self) -> Result<Command, RouterError> {
        let cmd = self.router.reset(self.home.clone(), Params::new())?;
        self.status = "signed out".to_owned();
        Ok(cmd)
    }

    // -- accessors ---------------------------------------------------------------

    #[must_use]
    pub fn router(&self) -> &Router<dyn Screen> {
        &self.router
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn clear_status(&mut self) {
        self.status.clear();
    }

    #[must_use]
    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    #[must_use]
    pub fn current_route(&self) -> Option<&str> {
        self.router.current_route()
    }

    #[must_use]
    pub fn current_title(&self) -> &str {
        self.router.current_page().map_or("", |s| s.title())
    }

    #[must_use]
    pub fn history_string(&self) -> String {
        self.router.history_string()
    }

    /// `title | summary | history`, plus the status when one is set.
    #[must_use]
    pub fn status_line(&self) -> String {
        let summary = self
            .router
            .current_page()
            .map(|s| s.summary())
            .unwrap_or_default();
        let mut line = format!(
            "{} | {} | {}",
            self.current_title(),
            summary,
            self.history_string()
        );
        if !self.status.is_empty() {
            line.push_str(" ! ");
            line.push_str(&self.status);
        }
        line
    }

    // -- main update loop --------------------------------------------------------

    /// Process one message. Navigation messages go to the router, everything
    /// else to the current screen.
    pub fn dispatch(&mut self, msg: Message) -> Command {
        self.status.clear();
        match msg {
            Message::Navigate { to, params } => self.resolve(Command::navigate(to, params)),
            Message::Back => self.resolve(Command::Back),
            Message::Forward => self.resolve(Command::Forward),
            Message::Quit => self.resolve(Command::Quit),
            other => {
                let cmd = match self.router.current_page_mut() {
                    Some(screen) => screen.update(&other),
                    None => Command::None,
                };
                self.resolve(cmd)
            }
        }
    }

    /// Execute navigation commands against the router.
    ///
    /// Work produced by the router (init and hook results) is returned as is,
    /// never resolved here. A page that redirects from `init` or `on_enter`
    /// therefore only moves one step per call; [`Self::drain`] bounds the rest.
    pub fn resolve(&mut self, cmd: Command) -> Command {
        match cmd {
            Command::Navigate { to, params } => match self.router.navigate(&to, params) {
                Ok(next) => next,
                Err(err) => {
                    self.report_navigation_error(&to, &err);
                    Command::None
                }
            },
            Command::Back => {
                let step = self.router.back().map(|(_, next)| next);
                self.after_step(step)
            }
            Command::Forward => {
                let step = self.router.forward().map(|(_, next)| next);
                self.after_step(step)
            }
            Command::Quit => {
                self.quitting = true;
                Command::Quit
            }
            Command::Batch(cmds) => {
                let mut resolved = Vec::with_capacity(cmds.len());
                for c in cmds {
                    resolved.push(self.resolve(c));
                }
                Command::batch(resolved)
            }
            other => other,
        }
    }

    /// Run every pending task and router follow-up, feeding each back through
    /// [`Self::resolve`], until nothing is left, a quit is requested or
    /// `MAX_DRAIN_STEPS` commands have been processed.
    pub fn drain(&mut self, cmd: Command) -> Flow {
        let mut queue: VecDeque<Command> = self.resolve(cmd).into_leaves().into();
        let mut steps = 0;
        while let Some(next) = queue.pop_front() {
            steps += 1;
            if steps > MAX_DRAIN_STEPS {
                warn!(pending = queue.len() + 1, "drain step limit reached");
                break;
            }
            match next {
                Command::Quit => return Flow::Quit,
                Command::Task(task) => {
                    debug!(task = task.label(), "running task");
                    let follow = self.resolve(task.run());
                    queue.extend(follow.into_leaves());
                }
                other => queue.extend(self.resolve(other).into_leaves()),
            }
        }
        if self.quitting {
            Flow::Quit
        } else {
            Flow::Continue
        }
    }

    /// Vetoes can clear up on their own, so they are only debug events and
    /// the status says so. Anything else is a routing bug worth a warning.
    fn report_navigation_error(&mut self, to: &str, err: &RouterError) {
        if err.is_retryable() {
            debug!(to, blocked_by = ?err.route(), "navigation vetoed");
            self.status = format!("{err} (retry later)");
        } else {
            warn!(to, route = ?err.route(), error = %err, "navigation failed");
            self.status = err.to_string();
        }
    }

    fn after_step(&mut self, step: Result<Command, RouterError>) -> Command {
        match step {
            Ok(next) => next,
            Err(err) => {
                warn!(error = %err, "history step failed");
                self.status = err.to_string();
                Command::None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
