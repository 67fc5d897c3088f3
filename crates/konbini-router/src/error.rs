//! Error taxonomy for router operations.
//!
//! Every failing call leaves the history chain and the current entry exactly
//! as they were before the call.

/// Errors returned by [`crate::Router`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// A factory is already registered under this route.
    #[error("page with route {route:?} already exists")]
    DuplicateRoute { route: String },

    /// No factory is registered under this route.
    #[error("no page registered for route {route:?}")]
    UnknownRoute { route: String },

    /// The outgoing page's `before_navigate_away` gate returned `false`.
    #[error("navigation cancelled by current page {route:?}")]
    NavigationCancelled { route: String },

    /// The router has no current page yet.
    #[error("router has no initial page")]
    NotInitialized,

    /// `set_initial_page` was called on a router that already has a chain.
    #[error("router already started at {route:?}")]
    AlreadyInitialized { route: String },
}

impl RouterError {
    /// The route the error refers to, if any.
    #[must_use]
    pub fn route(&self) -> Option<&str> {
        match self {
            Self::DuplicateRoute { route }
            | Self::UnknownRoute { route }
            | Self::NavigationCancelled { route }
            | Self::AlreadyInitialized { route } => Some(route),
            Self::NotInitialized => None,
        }
    }

    /// Whether the caller can fix the failure by retrying later without
    /// changing its route table (a veto may be lifted by the page).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NavigationCancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        let cases = [
            (
                RouterError::DuplicateRoute {
                    route: "home".into(),
                },
                "page with route \"home\" already exists",
            ),
            (
                RouterError::UnknownRoute {
                    route: "nowhere".into(),
                },
                "no page registered for route \"nowhere\"",
            ),
            (
                RouterError::NavigationCancelled {
                    route: "login".into(),
                },
                "navigation cancelled by current page \"login\"",
            ),
            (RouterError::NotInitialized, "router has no initial page"),
        ];
        for (err, want) in cases {
            assert_eq!(err.to_string(), want);
        }
    }

    #[test]
    fn route_accessor() {
        let err = RouterError::UnknownRoute {
            route: "bento".into(),
        };
        assert_eq!(err.route(), Some("bento"));
        assert_eq!(RouterError::NotInitialized.route(), None);
    }

    #[test]
    fn only_cancellation_is_retryable() {
        assert!(RouterError::NavigationCancelled {
            route: "login".into()
        }
        .is_retryable());
        assert!(!RouterError::UnknownRoute { route: "x".into() }.is_retryable());
        assert!(!RouterError::NotInitialized.is_retryable());
    }
}
