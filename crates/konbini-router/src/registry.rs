//! Route name to page factory registry.

use std::collections::HashMap;

use crate::command::Command;
use crate::error::RouterError;
use crate::page::{enter, Page};
use crate::params::Params;

/// Builds a page from navigation parameters.
pub type PageFactory<P> = Box<dyn Fn(&Params) -> Box<P>>;

/// Immutable-after-insert map of route factories.
pub struct Registry<P: ?Sized> {
    factories: HashMap<String, PageFactory<P>>,
}

impl<P: ?Sized> Default for Registry<P> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<P: ?Sized + Page> Registry<P> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a factory. Routes can only be registered once.
    pub fn register(
        &mut self,
        route: impl Into<String>,
        factory: PageFactory<P>,
    ) -> Result<(), RouterError> {
        let route = route.into();
        if self.factories.contains_key(&route) {
            return Err(RouterError::DuplicateRoute { route });
        }
        self.factories.insert(route, factory);
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, route: &str) -> bool {
        self.factories.contains_key(route)
    }

    /// Registered route names, sorted.
    #[must_use]
    pub fn routes(&self) -> Vec<&str> {
        let mut routes: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        routes.sort_unstable();
        routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Construct and initialize a page for `route`.
    ///
    /// Runs the factory, then `init`, then `on_enter` when the page has
    /// lifecycle hooks. Work is batched in that order.
    pub fn build(&self, route: &str, params: &Params) -> Result<(Box<P>, Command), RouterError> {
        let factory = self
            .factories
            .get(route)
            .ok_or_else(|| RouterError::UnknownRoute {
                route: route.to_owned(),
            })?;
        let mut page = factory(params);
        let init = page.init();
        let entered = enter(&mut *page, params);
        Ok((page, Command::batch([init, entered])))
    }
}
