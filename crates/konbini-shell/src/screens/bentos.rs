//! Bento list and bento detail screens.
//!
//! A bento is a named bundle of secret entries. Detail values stay masked
//! until selected and are masked again whenever the screen is left.

use konbini_router::{Command, LifecycleHooks, Page, Params};
use tracing::debug;

use crate::app::Screen;
use crate::message::Message;

const SAMPLE_BENTOS: [&str; 3] = ["groceries", "staging-env", "home-wifi"];

// ---------------------------------------------------------------------------
// BentoListScreen
// ---------------------------------------------------------------------------

pub struct BentoListScreen {
    user: String,
    names: Vec<String>,
    refreshes: usize,
}

impl BentoListScreen {
    #[must_use]
    pub fn new(params: &Params) -> Self {
        Self {
            user: params.get_str("user").unwrap_or("guest").to_owned(),
            names: Vec::new(),
            refreshes: 0,
        }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn refreshes(&self) -> usize {
        self.refreshes
    }
}

impl Page for BentoListScreen {
    fn init(&mut self) -> Command {
        self.names = SAMPLE_BENTOS.iter().map(|n| (*n).to_owned()).collect();
        Command::None
    }

    fn lifecycle(&mut self) -> Option<&mut dyn LifecycleHooks> {
        Some(self)
    }
}

impl LifecycleHooks for BentoListScreen {
    fn on_enter(&mut self, _params: &Params) -> Command {
        self.refreshes += 1;
        let user = self.user.clone();
        Command::task("bentos:refresh", move || {
            debug!(user = %user, "refreshing bento list");
            Command::None
        })
    }
}

impl Screen for BentoListScreen {
    fn title(&self) -> &str {
        "Bentos"
    }

    fn update(&mut self, msg: &Message) -> Command {
        match msg {
            Message::Select(n) => match self.names.get(*n) {
                Some(name) => Command::navigate(
                    "bento",
                    Params::new()
                        .with("name", name.as_str())
                        .with("user", self.user.as_str()),
                ),
                None => Command::None,
            },
            Message::Cancel => Command::Back,
            _ => Command::None,
        }
    }

    fn summary(&self) -> String {
        format!("user={} bentos=[{}]", self.user, self.names.join(", "))
    }
}

// ---------------------------------------------------------------------------
// BentoScreen
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    value: String,
    revealed: bool,
}

pub struct BentoScreen {
    name: String,
    entries: Vec<Entry>,
}

impl BentoScreen {
    #[must_use]
    pub fn new(params: &Params) -> Self {
        Self {
            name: params.get_str("name").unwrap_or_default().to_owned(),
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of entries currently shown in clear text.
    #[must_use]
    pub fn revealed(&self) -> usize {
        self.entries.iter().filter(|e| e.revealed).count()
    }
}

impl Page for BentoScreen {
    fn init(&mut self) -> Command {
        let prefix = self.name.to_uppercase().replace('-', "_");
        self.entries = ["USER", "TOKEN"]
            .iter()
            .map(|suffix| Entry {
                key: format!("{prefix}_{suffix}"),
                value: format!("{}-{}", self.name, suffix.to_lowercase()),
                revealed: false,
            })
            .collect();
        Command::None
    }

    fn lifecycle(&mut self) -> Option<&mut dyn LifecycleHooks> {
        Some(self)
    }
}

impl LifecycleHooks for BentoScreen {
    fn on_exit(&mut self) -> Command {
        for entry in &mut self.entries {
            entry.revealed = false;
        }
        Command::None
    }
}

impl Screen for BentoScreen {
    fn title(&self) -> &str {
        "Bento"
    }

    fn update(&mut self, msg: &Message) -> Command {
        match msg {
            Message::Select(n) => {
                if let Some(entry) = self.entries.get_mut(*n) {
                    entry.revealed = !entry.revealed;
                }
                Command::None
            }
            Message::Cancel => Command::Back,
            _ => Command::None,
        }
    }

    fn summary(&self) -> String {
        let entries: Vec<String> = self
            .entries
            .iter()
            .map(|e| {
                if e.revealed {
                    format!("{}={}", e.key, e.value)
                } else {
                    format!("{}=****", e.key)
                }
            })
            .collect();
        format!("{}: {}", self.name, entries.join(" "))
    }
}
