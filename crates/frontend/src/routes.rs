//! Application routes

use taskdesk_core::Redirect;
use yew_router::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, Routable)]
pub enum Route {
    #[at("/")]
    Root,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/stamp")]
    Stamp,
    #[at("/home")]
    Home,
    #[at("/tasks")]
    Tasks,
    #[at("/tasks/create")]
    CreateTask,
    #[at("/dashboard")]
    Dashboard,
    #[at("/calendar")]
    Calendar,
    #[at("/login-history")]
    LoginHistory,
    #[at("/play-history")]
    PlayHistory,
    #[at("/users")]
    Users,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<Redirect> for Route {
    fn from(redirect: Redirect) -> Self {
        match redirect {
            Redirect::Login => Self::Login,
            Redirect::Register => Self::Register,
            Redirect::Stamp => Self::Stamp,
            Redirect::Home => Self::Home,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirects_match_route_paths() {
        for redirect in [Redirect::Login, Redirect::Register, Redirect::Stamp, Redirect::Home] {
            assert_eq!(Route::from(redirect).to_path(), redirect.path());
        }
    }
}
