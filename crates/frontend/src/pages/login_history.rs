//! Login history of the signed-in user

use super::{Load, user_client};
use crate::auth::{PageProps, use_auth};
use taskdesk_http::types::LoginRecord;
use yew::prelude::*;

#[function_component(LoginHistoryPage)]
pub fn login_history_page(props: &PageProps) -> Html {
    let auth = use_auth();
    let history = use_state(|| Load::<Vec<LoginRecord>>::Pending);

    {
        let history = history.clone();
        use_effect_with(props.user.clone(), move |user| {
            let user = user.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match user_client(auth.as_ref(), &user) {
                    Ok((client, user_id)) => client.login_history(&user_id).await,
                    Err(e) => Err(e),
                };
                history.set(Load::from_result(result));
            });
        });
    }

    html! {
        <div class="max-w-5xl mx-auto p-6">
            <h2 class="text-3xl font-bold text-blue-600 mb-4">{"Login History"}</h2>
            {history.view(|records| {
                if records.is_empty() {
                    return html! { <p class="text-gray-500">{"No login history found."}</p> };
                }
                html! {
                    <table class="w-full text-center border border-gray-200 dark:border-gray-700">
                        <thead class="bg-blue-600 text-white">
                            <tr>
                                <th>{"Login ID"}</th>
                                <th>{"User ID"}</th>
                                <th>{"Time"}</th>
                                <th>{"Day"}</th>
                                <th>{"Month"}</th>
                                <th>{"Year"}</th>
                                <th>{"Weekday"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for records.iter().map(|record| html! {
                                <tr key={record.login_id}>
                                    <td>{record.login_id.to_string()}</td>
                                    <td>{record.user_id.to_string()}</td>
                                    <td>{&record.time}</td>
                                    <td>{record.day.to_string()}</td>
                                    <td>{record.month.to_string()}</td>
                                    <td>{record.year.to_string()}</td>
                                    <td>{&record.weekday}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                }
            })}
        </div>
    }
}
