//! Page capabilities consumed by the router.
//!
//! Every page can be initialized. Lifecycle hooks are an optional capability
//! discovered through [`Page::lifecycle`]; the router never inspects concrete
//! page types.

use crate::command::Command;
use crate::params::Params;

/// A unit of UI state produced by a page factory.
pub trait Page {
    /// Called once, right after the factory builds the page.
    ///
    /// Not called again when the page is resumed through back/forward.
    fn init(&mut self) -> Command;

    /// Capability query for lifecycle hooks.
    fn lifecycle(&mut self) -> Option<&mut dyn LifecycleHooks> {
        None
    }
}

/// Optional navigation hooks.
///
/// Call order when leaving a page is fixed: `before_navigate_away`, then
/// `after_navigate_away`, then `on_exit`. `on_enter` runs on the page that
/// becomes current.
pub trait LifecycleHooks {
    /// Veto gate. Returning `false` cancels the navigation before anything
    /// changes.
    fn before_navigate_away(&mut self) -> bool {
        true
    }

    fn after_navigate_away(&mut self) -> Command {
        Command::None
    }

    fn on_exit(&mut self) -> Command {
        Command::None
    }

    fn on_enter(&mut self, _params: &Params) -> Command {
        Command::None
    }
}

/// Outcome of running the outgoing hooks of a page.
#[derive(Debug)]
pub(crate) enum Departure {
    Approved(Command),
    Vetoed,
}

/// Run `before_navigate_away`, `after_navigate_away`, `on_exit` in order.
pub(crate) fn depart<P: ?Sized + Page>(page: &mut P) -> Departure {
    let Some(hooks) = page.lifecycle() else {
        return Departure::Approved(Command::None);
    };
    if !hooks.before_navigate_away() {
        return Departure::Vetoed;
    }
    let after = hooks.after_navigate_away();
    let exit = hooks.on_exit();
    Departure::Approved(Command::batch([after, exit]))
}

/// Run `on_enter` if the page supports hooks.
pub(crate) fn enter<P: ?Sized + Page>(page: &mut P, params: &Params) -> Command {
    match page.lifecycle() {
        Some(hooks) => hooks.on_enter(params),
        None => Command::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl Page for Bare {
        fn init(&mut self) -> Command {
            Command::None
        }
    }

    struct Gated {
        allow: bool,
        calls: Vec<&'static str>,
    }

    impl Page for Gated {
        fn init(&mut self) -> Command {
            Command::None
        }

        fn lifecycle(&mut self) -> Option<&mut dyn LifecycleHooks> {
            Some(self)
        }
    }

    impl LifecycleHooks for Gated {
        fn before_navigate_away(&mut self) -> bool {
            self.calls.push("before");
            self.allow
        }

        fn after_navigate_away(&mut self) -> Command {
            self.calls.push("after");
            Command::task("after", || Command::None)
        }

        fn on_exit(&mut self) -> Command {
            self.calls.push("exit");
            Command::task("exit", || Command::None)
        }
    }

    #[test]
    fn bare_page_departs_without_work() {
        assert!(matches!(
            depart(&mut Bare),
            Departure::Approved(Command::None)
        ));
        assert!(enter(&mut Bare, &Params::new()).is_none());
    }

    #[test]
    fn hooks_run_in_fixed_order() {
        let mut page = Gated {
            allow: true,
            calls: Vec::new(),
        };
        let Departure::Approved(cmd) = depart(&mut page) else {
            panic!("expected approval");
        };
        assert_eq!(page.calls, ["before", "after", "exit"]);
        let labels: Vec<String> = cmd
            .into_leaves()
            .into_iter()
            .filter_map(|c| match c {
                Command::Task(t) => Some(t.label().to_owned()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, ["after", "exit"]);
    }

    #[test]
    fn veto_stops_before_other_hooks() {
        let mut page = Gated {
            allow: false,
            calls: Vec::new(),
        };
        assert!(matches!(depart(&mut page), Departure::Vetoed));
        assert_eq!(page.calls, ["before"]);
    }
}
