mod calendar;
mod create_task;
mod dashboard;
mod home;
mod login;
mod login_history;
mod not_found;
mod play_history;
mod register;
mod stamp;
mod tasks;
mod users;

pub use calendar::CalendarPage;
pub use create_task::CreateTaskPage;
pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use login_history::LoginHistoryPage;
pub use not_found::NotFoundPage;
pub use play_history::PlayHistoryPage;
pub use register::RegisterPage;
pub use stamp::StampPage;
pub use tasks::TasksPage;
pub use users::UsersPage;

use crate::auth::AuthContext;
use crate::client::{AppSessionClient, ClientError, create_session_client};
use crate::components::LoadingSpinner;
use taskdesk_core::CurrentUser;
use yew::prelude::*;

/// Data owned by a page, loaded through the interceptor
#[derive(Debug, Clone, PartialEq)]
pub enum Load<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> Load<T> {
    fn from_result(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => {
                tracing::error!(error = %e, "Page data failed to load");
                Self::Failed(e.to_string())
            }
        }
    }

    /// Render `ready` once loaded, a spinner or the error otherwise
    fn view(&self, ready: impl FnOnce(&T) -> Html) -> Html {
        match self {
            Self::Pending => html! { <LoadingSpinner text="Loading..." /> },
            Self::Ready(value) => ready(value),
            Self::Failed(message) => html! {
                <p class="text-red-600 dark:text-red-400">{message}</p>
            },
        }
    }
}

/// Interceptor carrying the provider session of the context
fn page_client(auth: Option<&AuthContext>) -> Result<AppSessionClient, ClientError> {
    create_session_client(auth.and_then(|auth| auth.provider.session().cloned()))
}

/// Backend id of a reconciled user
fn known_user_id(user_id: Option<&str>) -> Result<String, ClientError> {
    user_id
        .map(str::to_string)
        .ok_or_else(|| ClientError::Configuration("User id is not known".into()))
}

/// Interceptor plus the id of the page's user
fn user_client(
    auth: Option<&AuthContext>,
    user: &CurrentUser,
) -> Result<(AppSessionClient, String), ClientError> {
    Ok((page_client(auth)?, known_user_id(user.user_id.as_deref())?))
}

fn text_input(field: UseStateHandle<String>) -> Callback<InputEvent> {
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        field.set(input.value());
    })
}

fn text_area_input(field: UseStateHandle<String>) -> Callback<InputEvent> {
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
        field.set(input.value());
    })
}

fn select_input(field: UseStateHandle<String>) -> Callback<Event> {
    Callback::from(move |e: Event| {
        let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
        field.set(select.value());
    })
}

/// Empty form fields are not sent
fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_dropped() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" Home "), Some("Home".to_string()));
    }

    #[test]
    fn test_unreconciled_user_has_no_id() {
        assert!(matches!(
            known_user_id(None),
            Err(ClientError::Configuration(_))
        ));
        assert_eq!(known_user_id(Some("7")).unwrap(), "7");
    }
}
