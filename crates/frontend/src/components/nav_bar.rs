//! Top navigation with logout and preference toggles

use crate::auth::{AuthAction, use_auth, use_current_user};
use crate::client::identity_service;
use crate::navigation::RouterNavigator;
use crate::provider::SessionSource;
use crate::routes::Route;
use crate::storage::session_manager;
use crate::theme::{PreferencesAction, use_preferences};
use taskdesk_core::Theme;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NavBar)]
pub fn nav_bar() -> Html {
    let auth = use_auth();
    let user = use_current_user();
    let preferences = use_preferences();
    let navigator = use_navigator();

    let on_logout = Callback::from(move |_: MouseEvent| {
        let Some(navigator) = navigator.clone() else {
            return;
        };
        if let Err(e) = session_manager().logout(&RouterNavigator::new(navigator)) {
            tracing::error!(error = %e, "Failed to clear cached identity on logout");
        }
        if let Some(auth) = &auth {
            auth.dispatch(AuthAction::SignedOut);
        }
        wasm_bindgen_futures::spawn_local(async {
            let result = match identity_service() {
                Ok(service) => service.sign_out().await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                tracing::warn!(error = %e, "Provider sign-out failed");
            }
        });
    });

    let (theme_label, cursor_label, on_theme, on_cursor) = match &preferences {
        Some(preferences) => {
            let theme_label = match preferences.preferences.theme {
                Theme::Light => "Dark mode",
                Theme::Dark => "Light mode",
            };
            let cursor_label = if preferences.preferences.custom_cursor_enabled {
                "Default cursor"
            } else {
                "Custom cursor"
            };
            let on_theme = {
                let preferences = preferences.clone();
                Callback::from(move |_: MouseEvent| {
                    preferences.dispatch(PreferencesAction::ToggleTheme);
                })
            };
            let on_cursor = {
                let preferences = preferences.clone();
                Callback::from(move |_: MouseEvent| {
                    preferences.dispatch(PreferencesAction::ToggleCursor);
                })
            };
            (theme_label, cursor_label, on_theme, on_cursor)
        }
        None => ("Dark mode", "Custom cursor", Callback::noop(), Callback::noop()),
    };

    html! {
        <nav class="bg-white/80 dark:bg-gray-900/80 border-b border-gray-200 dark:border-gray-700">
            <div class="max-w-7xl mx-auto px-4 flex justify-between h-16 items-center">
                <div class="flex items-center gap-6">
                    <Link<Route> to={Route::Home} classes="text-2xl font-bold text-blue-600">{"TaskDesk"}</Link<Route>>
                    if user.is_some() {
                        <Link<Route> to={Route::Dashboard} classes="text-sm">{"Dashboard"}</Link<Route>>
                        <Link<Route> to={Route::Tasks} classes="text-sm">{"Tasks"}</Link<Route>>
                        <Link<Route> to={Route::CreateTask} classes="text-sm">{"New task"}</Link<Route>>
                        <Link<Route> to={Route::Calendar} classes="text-sm">{"Calendar"}</Link<Route>>
                        <Link<Route> to={Route::LoginHistory} classes="text-sm">{"Login history"}</Link<Route>>
                        <Link<Route> to={Route::PlayHistory} classes="text-sm">{"Play history"}</Link<Route>>
                    }
                    if user.as_ref().is_some_and(|user| user.is_admin) {
                        <Link<Route> to={Route::Users} classes="text-sm">{"Users"}</Link<Route>>
                    }
                </div>
                <div class="flex items-center gap-4">
                    <button onclick={on_theme} class="text-sm">{theme_label}</button>
                    <button onclick={on_cursor} class="text-sm">{cursor_label}</button>
                    if let Some(user) = &user {
                        <span class="text-sm text-gray-600 dark:text-gray-400">
                            {format!("Welcome, {}", user.greeting_name())}
                        </span>
                        <button onclick={on_logout} class="text-sm">{"Sign Out"}</button>
                    } else {
                        <Link<Route> to={Route::Login} classes="text-sm">{"Sign In"}</Link<Route>>
                    }
                </div>
            </div>
        </nav>
    }
}
