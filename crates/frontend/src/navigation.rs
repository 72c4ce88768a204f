//! [`Navigator`] implementations for the browser

use crate::routes::Route;
use taskdesk_core::{Navigator, Redirect};

/// Client-side navigation through the router
#[derive(Clone, PartialEq)]
pub struct RouterNavigator(yew_router::navigator::Navigator);

impl RouterNavigator {
    pub fn new(navigator: yew_router::navigator::Navigator) -> Self {
        Self(navigator)
    }
}

impl Navigator for RouterNavigator {
    fn navigate(&self, to: Redirect) {
        self.0.push(&Route::from(to));
    }
}

/// Full page load; usable outside the component tree
#[derive(Debug, Clone, Copy, Default)]
pub struct PageNavigator;

impl Navigator for PageNavigator {
    fn navigate(&self, to: Redirect) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(to.path()) {
            tracing::error!(error = ?e, to = %to, "Page navigation failed");
        }
    }
}

/// Notifies the auth context before navigating
///
/// Used by the interceptor so a 401 also signs the context out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionExpiredNavigator;

impl Navigator for SessionExpiredNavigator {
    fn navigate(&self, to: Redirect) {
        if to == Redirect::Login && crate::auth::error_handler::trigger_auth_error() {
            return;
        }
        PageNavigator.navigate(to);
    }
}
