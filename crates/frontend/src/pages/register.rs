//! Account creation

use super::text_input;
use crate::client::auth_backend;
use crate::routes::Route;
use taskdesk_core::register::{REGISTRATION_FAILED, RegistrationForm};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, PartialEq)]
enum Notice {
    Success(String),
    Error(String),
}

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let show_password = use_state(|| false);
    let notice = use_state(|| None::<Notice>);

    let on_submit = {
        let (name, email) = (name.clone(), email.clone());
        let (password, confirm_password) = (password.clone(), confirm_password.clone());
        let notice = notice.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = RegistrationForm {
                name: (*name).clone(),
                email: (*email).clone(),
                password: (*password).clone(),
                confirm_password: (*confirm_password).clone(),
            };
            if let Err(e) = form.validate() {
                notice.set(Some(Notice::Error(e.to_string())));
                return;
            }

            let notice = notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match auth_backend() {
                    Ok(backend) => form.submit(&backend).await.map_err(|e| e.to_string()),
                    Err(e) => {
                        tracing::error!(error = %e, "Backend client could not be built");
                        Err(REGISTRATION_FAILED.to_string())
                    }
                };
                notice.set(Some(match outcome {
                    Ok(message) => Notice::Success(message.to_string()),
                    Err(message) => Notice::Error(message),
                }));
            });
        })
    };

    let on_toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_: MouseEvent| show_password.set(!*show_password))
    };
    let password_type = if *show_password { "text" } else { "password" };
    let input_class = "w-full px-3 py-2 border border-gray-300 dark:border-gray-600 rounded-md";

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 dark:bg-gray-900">
            <div class="max-w-md w-full bg-white dark:bg-gray-800 shadow rounded-lg p-6">
                <h2 class="text-3xl font-bold text-center text-gray-900 dark:text-white mb-4">{"Register"}</h2>

                {match &*notice {
                    Some(Notice::Success(message)) => html! {
                        <div class="mb-4 p-3 rounded-md bg-green-50 dark:bg-green-900 text-green-800 dark:text-green-200">
                            {message}
                        </div>
                    },
                    Some(Notice::Error(message)) => html! {
                        <div class="mb-4 p-3 rounded-md bg-red-50 dark:bg-red-900 text-red-800 dark:text-red-200">
                            {message}
                        </div>
                    },
                    None => html! {},
                }}

                <form onsubmit={on_submit} class="space-y-4">
                    <input type="text" placeholder="Name" value={(*name).clone()}
                        oninput={text_input(name.clone())} class={input_class} />
                    <input type="email" placeholder="Email" value={(*email).clone()}
                        oninput={text_input(email.clone())} class={input_class} />
                    <input type={password_type} placeholder="Password" value={(*password).clone()}
                        oninput={text_input(password.clone())} class={input_class} />
                    <input type={password_type} placeholder="Confirm Password" value={(*confirm_password).clone()}
                        oninput={text_input(confirm_password.clone())} class={input_class} />
                    <button type="button" onclick={on_toggle_password} class="text-sm text-blue-600">
                        {if *show_password { "Hide Passwords" } else { "Show Passwords" }}
                    </button>
                    <button type="submit" class="w-full py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-md">
                        {"Register"}
                    </button>
                </form>

                <p class="mt-4 text-sm text-center text-gray-600 dark:text-gray-400">
                    {"Already have an account? "}
                    <Link<Route> to={Route::Login} classes="text-blue-600">{"Login"}</Link<Route>>
                </p>
            </div>
        </div>
    }
}
