//! Login and signup forms.
//!
//! The form refuses to be navigated away from while it holds unsaved input.
//! A first cancel arms the discard, the second one leaves.

use konbini_router::{Command, LifecycleHooks, Page, Params};
use tracing::debug;

use crate::app::Screen;
use crate::message::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    fn title(self) -> &'static str {
        match self {
            Self::Login => "Log in",
            Self::Signup => "Sign up",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Email,
    Password,
}

pub struct AuthScreen {
    mode: AuthMode,
    email: String,
    password: String,
    focus: Field,
    dirty: bool,
    discard_armed: bool,
    error: String,
}

impl AuthScreen {
    /// `params.email` pre-fills the email field (set after signup).
    #[must_use]
    pub fn new(mode: AuthMode, params: &Params) -> Self {
        let email = params.get_str("email").unwrap_or_default().to_owned();
        let focus = if email.is_empty() {
            Field::Email
        } else {
            Field::Password
        };
        Self {
            mode,
            email,
            password: String::new(),
            focus,
            dirty: false,
            discard_armed: false,
            error: String::new(),
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn submit(&mut self) -> Command {
        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = "email and password are required".to_owned();
            return Command::None;
        }
        self.error.clear();
        self.dirty = false;
        let email = self.email.trim().to_owned();
        match self.mode {
            AuthMode::Login => Command::task("auth:login", move || {
                debug!(user = %email, "signed in");
                Command::navigate("bentos", Params::new().with("user", email.clone()))
            }),
            AuthMode::Signup => Command::task("auth:signup", move || {
                debug!(user = %email, "account created");
                Command::navigate("login", Params::new().with("email", email.clone()))
            }),
        }
    }
}

impl Page for AuthScreen {
    fn init(&mut self) -> Command {
        Command::None
    }

    fn lifecycle(&mut self) -> Option<&mut dyn LifecycleHooks> {
        Some(self)
    }
}

impl LifecycleHooks for AuthScreen {
    fn before_navigate_away(&mut self) -> bool {
        !self.dirty || self.discard_armed
    }

    fn on_exit(&mut self) -> Command {
        // Passwords do not outlive the visible form.
        self.password.clear();
        self.dirty = false;
        self.discard_armed = false;
        Command::None
    }

    fn on_enter(&mut self, _params: &Params) -> Command {
        self.error.clear();
        Command::None
    }
}

impl Screen for AuthScreen {
    fn title(&self) -> &str {
        self.mode.title()
    }

    fn update(&mut self, msg: &Message) -> Command {
        match msg {
            Message::Input(text) => {
                match self.focus {
                    Field::Email => {
                        self.email = text.clone();
                        self.focus = Field::Password;
                    }
                    Field::Password => self.password = text.clone(),
                }
                self.dirty = true;
                self.discard_armed = false;
                Command::None
            }
            Message::Select(0) => {
                self.focus = Field::Email;
                Command::None
            }
            Message::Select(_) => {
                self.focus = Field::Password;
                Command::None
            }
            Message::Submit => self.submit(),
            Message::Cancel => {
                if self.dirty && !self.discard_armed {
                    self.discard_armed = true;
                    self.error = "unsaved input, cancel again to discard".to_owned();
                    return Command::None;
                }
                Command::Back
            }
            _ => Command::None,
        }
    }

    fn summary(&self) -> String {
        let password = if self.password.is_empty() {
            "<empty>"
        } else {
            "********"
        };
        let focus = match self.focus {
            Field::Email => "email",
            Field::Password => "password",
        };
        let mut out = format!("email={} password={password} focus={focus}", self.email);
        if !self.error.is_empty() {
            out.push_str(" error=");
            out.push_str(&self.error);
        }
        out
    }
}
