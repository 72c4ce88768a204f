//! Username/password login and provider sign-in

use crate::auth::{AuthAction, use_auth};
use crate::client::{auth_backend, identity_service};
use crate::config::{app_config, page_origin};
use crate::navigation::RouterNavigator;
use crate::provider::SessionSource;
use crate::routes::Route;
use crate::storage::session_manager;
use taskdesk_core::credentials::{CredentialLogin, LOGIN_FAILED};
use taskdesk_core::{ProviderKind, Redirect};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let show_password = use_state(|| false);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_email_input = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_: MouseEvent| show_password.set(!*show_password))
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(navigator) = navigator.clone() else {
                return;
            };
            let (username, secret) = ((*email).clone(), (*password).clone());
            let (auth, error, submitting) = (auth.clone(), error.clone(), submitting.clone());
            submitting.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let backend = match auth_backend() {
                    Ok(backend) => backend,
                    Err(e) => {
                        tracing::error!(error = %e, "Backend client could not be built");
                        error.set(Some(LOGIN_FAILED.to_string()));
                        submitting.set(false);
                        return;
                    }
                };
                let login = CredentialLogin::new(app_config().auth.landing_route);
                let navigator = RouterNavigator::new(navigator);
                match login
                    .submit(&backend, &session_manager(), &navigator, &username, &secret)
                    .await
                {
                    Ok(_) => {
                        error.set(None);
                        if let Some(auth) = &auth {
                            auth.dispatch(AuthAction::Refresh);
                        }
                    }
                    Err(failure) => error.set(Some(failure.message)),
                }
                submitting.set(false);
            });
        })
    };

    let google_sign_in = identity_service().map_or_else(
        |_| "#".to_string(),
        |service| {
            let callback = format!("{}{}", page_origin(), Redirect::Stamp.path());
            service.sign_in_url(ProviderKind::Google, &callback)
        },
    );

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 dark:bg-gray-900">
            <div class="max-w-md w-full bg-white dark:bg-gray-800 shadow rounded-lg p-6 text-center">
                <h2 class="text-3xl font-bold text-gray-900 dark:text-white mb-4">{"Login"}</h2>

                if let Some(message) = &*error {
                    <p class="text-sm text-red-600 dark:text-red-400 mb-2">{message}</p>
                }

                <form onsubmit={on_submit} class="space-y-4">
                    <input
                        type="text"
                        placeholder="Email"
                        value={(*email).clone()}
                        oninput={on_email_input}
                        class="w-full px-3 py-2 border border-gray-300 dark:border-gray-600 rounded-md"
                    />
                    <input
                        type={if *show_password { "text" } else { "password" }}
                        placeholder="Password"
                        value={(*password).clone()}
                        oninput={on_password_input}
                        class="w-full px-3 py-2 border border-gray-300 dark:border-gray-600 rounded-md"
                    />
                    <button type="button" onclick={on_toggle_password} class="text-sm text-blue-600">
                        {if *show_password { "Hide Password" } else { "Show Password" }}
                    </button>
                    <button
                        type="submit"
                        disabled={*submitting}
                        class="w-full py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-md disabled:opacity-50"
                    >
                        {"Login"}
                    </button>
                </form>

                <p class="mt-4 text-sm text-gray-600 dark:text-gray-400">
                    {"Don't have an account? "}
                    <Link<Route> to={Route::Register} classes="text-blue-600">{"Register"}</Link<Route>>
                </p>

                <p class="mt-4 text-sm text-gray-500">{"Or sign in with"}</p>
                <a href={google_sign_in} class="mt-2 block w-full py-2 border border-gray-300 dark:border-gray-600 rounded-md">
                    {"Sign in with Google"}
                </a>
            </div>
        </div>
    }
}
