//! Navigation targets used by the auth flows

use serde::{Deserialize, Serialize};
use std::fmt;

/// Routes the auth flows can send the browser to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Redirect {
    Login,
    Register,
    /// Post-login landing page that stamps login history
    Stamp,
    Home,
}

impl Redirect {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Stamp => "/stamp",
            Self::Home => "/home",
        }
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Performs client-side redirects
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    fn navigate(&self, to: Redirect);
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn navigate(&self, to: Redirect) {
        (**self).navigate(to);
    }
}

impl<N: Navigator + ?Sized> Navigator for std::rc::Rc<N> {
    fn navigate(&self, to: Redirect) {
        (**self).navigate(to);
    }
}
