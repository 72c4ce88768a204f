//! Admin listing of every account, with account removal

use super::{Load, page_client};
use crate::auth::{PageProps, use_auth};
use taskdesk_http::types::UserSummary;
use yew::prelude::*;

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Ask before removing an account
fn confirm_delete(user: &UserSummary) -> bool {
    let message = format!("Delete user {} ({})?", user.username, user.email);
    web_sys::window()
        .and_then(|window| window.confirm_with_message(&message).ok())
        .unwrap_or(false)
}

#[function_component(UsersPage)]
pub fn users_page(props: &PageProps) -> Html {
    let auth = use_auth();
    let users = use_state(|| Load::<Vec<UserSummary>>::Pending);
    let notice = use_state(|| None::<Result<String, String>>);
    // Bumped after each removal to reload the list
    let revision = use_state(|| 0_u32);

    {
        let users = users.clone();
        let auth = auth.clone();
        use_effect_with(*revision, move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let result = match page_client(auth.as_ref()) {
                    Ok(client) => client.all_users().await,
                    Err(e) => Err(e),
                };
                users.set(Load::from_result(result));
            });
        });
    }

    let on_delete = {
        let (notice, revision) = (notice.clone(), revision.clone());
        Callback::from(move |user: UserSummary| {
            if !confirm_delete(&user) {
                return;
            }
            let auth = auth.clone();
            let (notice, revision) = (notice.clone(), revision.clone());
            wasm_bindgen_futures::spawn_local(async move {
                let result = match page_client(auth.as_ref()) {
                    Ok(client) => client.delete_user(user.user_id).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(deleted) => {
                        tracing::info!(user_id = user.user_id, "User deleted");
                        notice.set(Some(Ok(deleted.message)));
                        revision.set(*revision + 1);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, user_id = user.user_id, "User deletion failed");
                        notice.set(Some(Err(e.to_string())));
                    }
                }
            });
        })
    };

    let own_id = props.user.user_id.clone();

    html! {
        <div class="max-w-6xl mx-auto p-6">
            <h2 class="text-3xl font-bold text-blue-600 mb-4">{"All Users"}</h2>
            {match &*notice {
                Some(Ok(message)) => html! { <p class="mb-2 text-green-600">{message}</p> },
                Some(Err(message)) => html! { <p class="mb-2 text-red-600 dark:text-red-400">{message}</p> },
                None => Html::default(),
            }}
            {users.view(|users| html! {
                <table class="w-full text-center border border-gray-200 dark:border-gray-700">
                    <thead class="bg-blue-600 text-white">
                        <tr>
                            <th>{"User ID"}</th>
                            <th>{"Username"}</th>
                            <th>{"Email"}</th>
                            <th>{"Is Active"}</th>
                            <th>{"Is Admin"}</th>
                            <th>{"Create Date"}</th>
                            <th>{"Delete"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {for users.iter().map(|user| {
                            let is_self = own_id.as_deref() == Some(user.user_id.to_string().as_str());
                            let onclick = {
                                let (on_delete, user) = (on_delete.clone(), user.clone());
                                Callback::from(move |_: MouseEvent| on_delete.emit(user.clone()))
                            };
                            html! {
                                <tr key={user.user_id}>
                                    <td>{user.user_id.to_string()}</td>
                                    <td>{&user.username}</td>
                                    <td>{&user.email}</td>
                                    <td>{yes_no(user.is_active)}</td>
                                    <td>{yes_no(user.is_admin)}</td>
                                    <td>{&user.create_date}</td>
                                    <td>
                                        <button {onclick} disabled={is_self}
                                            class="px-2 py-1 text-sm rounded-md bg-red-600 text-white disabled:opacity-50">
                                            {"Delete"}
                                        </button>
                                    </td>
                                </tr>
                            }
                        })}
                    </tbody>
                </table>
            })}
        </div>
    }
}
