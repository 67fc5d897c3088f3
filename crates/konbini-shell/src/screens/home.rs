use konbini_router::{Command, Page, Params};

use crate::app::Screen;
use crate::message::Message;

const MENU: [(&str, &str); 3] = [
    ("login", "Log in"),
    ("signup", "Create account"),
    ("bentos", "Browse bentos"),
];

/// Start screen: a menu of the other screens.
pub struct HomeScreen {
    selected: usize,
}

impl HomeScreen {
    #[must_use]
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for HomeScreen {
    fn init(&mut self) -> Command {
        Command::None
    }
}

impl Screen for HomeScreen {
    fn title(&self) -> &str {
        "Home"
    }

    fn update(&mut self, msg: &Message) -> Command {
        match msg {
            Message::Select(n) if *n < MENU.len() => {
                self.selected = *n;
                Command::navigate(MENU[*n].0, Params::new())
            }
            Message::Submit => Command::navigate(MENU[self.selected].0, Params::new()),
            _ => Command::None,
        }
    }

    fn summary(&self) -> String {
        MENU.iter()
            .enumerate()
            .map(|(i, (_, label))| {
                if i == self.selected {
                    format!(">{label}")
                } else {
                    (*label).to_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
