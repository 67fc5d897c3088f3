//! konbini client screens.

mod auth;
mod bentos;
mod home;

pub use auth::{AuthMode, AuthScreen};
pub use bentos::{BentoListScreen, BentoScreen};
pub use home::HomeScreen;

use konbini_router::{Params, RouterError};

use crate::app::{Screen, Shell};

pub const HOME: &str = "home";
pub const LOGIN: &str = "login";
pub const SIGNUP: &str = "signup";
pub const BENTOS: &str = "bentos";
pub const BENTO: &str = "bento";

/// Register every konbini screen on `shell`.
pub fn register_all(shell: &mut Shell) -> Result<(), RouterError> {
    shell.register_screen(HOME, |_: &Params| -> Box<dyn Screen> { Box::new(HomeScreen::new()) })?;
    shell.register_screen(LOGIN, |params: &Params| -> Box<dyn Screen> {
        Box::new(AuthScreen::new(AuthMode::Login, params))
    })?;
    shell.register_screen(SIGNUP, |params: &Params| -> Box<dyn Screen> {
        Box::new(AuthScreen::new(AuthMode::Signup, params))
    })?;
    shell.register_screen(BENTOS, |params: &Params| -> Box<dyn Screen> {
        Box::new(BentoListScreen::new(params))
    })?;
    shell.register_screen(BENTO, |params: &Params| -> Box<dyn Screen> {
        Box::new(BentoScreen::new(params))
    })?;
    Ok(())
}
