//! The navigation controller.
//!
//! Owns the page registry and the history chain. Navigation calls run the
//! outgoing page's hooks, build or resume the incoming page, move the current
//! pointer and hand back the collected deferred work.
//!
//! Every call either applies completely or leaves the chain untouched: the veto
//! gate and route lookup run before any mutation.

use std::fmt::Write as _;

use tracing::debug;

use crate::command::Command;
use crate::error::RouterError;
use crate::history::{EntryId, History, HistoryEntry};
use crate::page::{depart, enter, Departure, Page};
use crate::params::Params;
use crate::registry::{PageFactory, Registry};

/// One row of the history listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub route: String,
    pub current: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Back,
    Forward,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Forward => "forward",
        }
    }
}

/// Page-history router with forward/back semantics.
///
/// Single-threaded: every method takes the router by reference for the whole
/// call, so hooks cannot reach back into it.
pub struct Router<P: ?Sized + Page> {
    registry: Registry<P>,
    history: History<P>,
    current: Option<EntryId>,
}

impl<P: ?Sized + Page> Default for Router<P> {
    fn default() -> Self {
        Self {
            registry: Registry::new(),
            history: History::new(),
            current: None,
        }
    }
}

impl<P: ?Sized + Page> Router<P> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- registry -------------------------------------------------------------

    /// Register a factory for `route`.
    pub fn register_page<F>(&mut self, route: impl Into<String>, factory: F) -> Result<(), RouterError>
    where
        F: Fn(&Params) -> Box<P> + 'static,
    {
        let route = route.into();
        let boxed: PageFactory<P> = Box::new(factory);
        self.registry.register(route.clone(), boxed).inspect_err(|err| {
            tracing::warn!(route = %route, error = %err, "page registration rejected");
        })?;
        debug!(route = %route, "registered page");
        Ok(())
    }

    /// Build the first page and install it as head and current.
    ///
    /// Fails with `AlreadyInitialized` if a chain exists; use [`Self::reset`]
    /// to replace it.
    pub fn set_initial_page(
        &mut self,
        route: impl Into<String>,
        params: Params,
    ) -> Result<Command, RouterError> {
        if let Ok(entry) = self.current_entry() {
            return Err(RouterError::AlreadyInitialized {
                route: entry.route().to_owned(),
            });
        }
        self.install_head(route.into(), params)
    }

    /// Discard the whole chain and start over at `route`.
    ///
    /// No gate or exit hook runs on the discarded pages. An unknown route
    /// leaves the existing chain in place.
    pub fn reset(&mut self, route: impl Into<String>, params: Params) -> Result<Command, RouterError> {
        self.install_head(route.into(), params)
    }

    fn install_head(&mut self, route: String, params: Params) -> Result<Command, RouterError> {
        let (page, cmd) = self.registry.build(&route, &params)?;
        debug!(route = %route, params = %params, "initial page");
        let id = self.history.start(route, params, page);
        self.current = Some(id);
        debug_assert!(self.history.verify_links());
        Ok(cmd)
    }

    // -- navigation -----------------------------------------------------------

    /// Navigate to `route`, pruning any forward history.
    ///
    /// Navigating to the current route is a no-op. The outgoing page's gate
    /// runs before the destination page is built.
    pub fn navigate(&mut self, route: &str, params: Params) -> Result<Command, RouterError> {
        let current = self.current.ok_or(RouterError::NotInitialized)?;
        let from = self.current_entry()?.route().to_owned();
        if from == route {
            debug!(route, "navigate to current route ignored");
            return Ok(Command::None);
        }
        if !self.registry.contains(route) {
            return Err(RouterError::UnknownRoute {
                route: route.to_owned(),
            });
        }

        let outgoing = self.current_entry_mut()?;
        let leave = match depart(outgoing.page_mut()) {
            Departure::Approved(cmd) => cmd,
            Departure::Vetoed => {
                debug!(from = %from, to = route, "navigation vetoed");
                return Err(RouterError::NavigationCancelled { route: from });
            }
        };

        let (page, arrive) = self.registry.build(route, &params)?;
        let (id, pruned) = self
            .history
            .append_after(current, route.to_owned(), params, page)
            .ok_or(RouterError::NotInitialized)?;
        self.current = Some(id);
        debug_assert!(self.history.verify_links());
        debug!(from = %from, to = route, pruned, "navigated");

        Ok(Command::batch([leave, arrive]))
    }

    /// Step to the previous entry.
    ///
    /// At the head, or when the current page vetoes, returns the current page
    /// unchanged with no work.
    pub fn back(&mut self) -> Result<(&P, Command), RouterError> {
        self.step(Direction::Back)
    }

    /// Step to the next entry. Mirrors [`Self::back`].
    pub fn forward(&mut self) -> Result<(&P, Command), RouterError> {
        self.step(Direction::Forward)
    }

    fn step(&mut self, direction: Direction) -> Result<(&P, Command), RouterError> {
        let current = self.current.ok_or(RouterError::NotInitialized)?;
        let target = match direction {
            Direction::Back => self.history.prev_of(current),
            Direction::Forward => self.history.next_of(current),
        };
        let Some(target) = target else {
            return Ok((self.current_entry()?.page(), Command::None));
        };

        let leave = match depart(self.current_entry_mut()?.page_mut()) {
            Departure::Approved(cmd) => cmd,
            Departure::Vetoed => {
                debug!(direction = direction.as_str(), "history step vetoed");
                return Ok((self.current_entry()?.page(), Command::None));
            }
        };

        self.current = Some(target);
        // Resumed pages keep their state: only `on_enter` runs, never `init`.
        let entry = self.current_entry_mut()?;
        let params = entry.params().clone();
        let arrive = enter(entry.page_mut(), &params);
        debug!(
            direction = direction.as_str(),
            route = entry.route(),
            "history step"
        );

        let cmd = Command::batch([leave, arrive]);
        Ok((self.current_entry()?.page(), cmd))
    }

    // -- introspection --------------------------------------------------------

    /// The current page.
    #[must_use]
    pub fn current_page(&self) -> Option<&P> {
        self.current_entry().ok().map(HistoryEntry::page)
    }

    /// Mutable access to the current page for ordinary message handling.
    pub fn current_page_mut(&mut self) -> Option<&mut P> {
        self.current_entry_mut().ok().map(HistoryEntry::page_mut)
    }

    /// Replace the current entry's page in place.
    pub fn update_current_page(&mut self, page: Box<P>) -> Result<(), RouterError> {
        self.current_entry_mut()?.replace_page(page);
        Ok(())
    }

    #[must_use]
    pub fn current_route(&self) -> Option<&str> {
        self.current_entry().ok().map(HistoryEntry::route)
    }

    #[must_use]
    pub fn current_params(&self) -> Option<&Params> {
        self.current_entry().ok().map(HistoryEntry::params)
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// Registered route names, sorted.
    #[must_use]
    pub fn routes(&self) -> Vec<&str> {
        self.registry.routes()
    }

    /// Number of entries in the chain.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.current
            .and_then(|id| self.history.prev_of(id))
            .is_some()
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.current
            .and_then(|id| self.history.next_of(id))
            .is_some()
    }

    /// Chain from head to tail, flagging the current entry.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryItem> {
        self.history
            .iter()
            .map(|(id, entry)| HistoryItem {
                route: entry.route().to_owned(),
                current: Some(id) == self.current,
            })
            .collect()
    }

    /// Debug rendering such as `home -> [login] -> bentos`.
    #[must_use]
    pub fn history_string(&self) -> String {
        let mut out = String::new();
        for (i, item) in self.history().iter().enumerate() {
            if i > 0 {
                out.push_str(" -> ");
            }
            if item.current {
                let _ = write!(out, "[{}]", item.route);
            } else {
                out.push_str(&item.route);
            }
        }
        out
    }

    fn current_entry(&self) -> Result<&HistoryEntry<P>, RouterError> {
        self.current
            .and_then(|id| self.history.get(id))
            .ok_or(RouterError::NotInitialized)
    }

    fn current_entry_mut(&mut self) -> Result<&mut HistoryEntry<P>, RouterError> {
        let id = self.current.ok_or(RouterError::NotInitialized)?;
        self.history.get_mut(id).ok_or(RouterError::NotInitialized)
    }
}
