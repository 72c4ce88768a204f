//! Play history of the signed-in user

use super::{Load, user_client};
use crate::auth::{PageProps, use_auth};
use taskdesk_http::types::PlayRecord;
use yew::prelude::*;

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

#[function_component(PlayHistoryPage)]
pub fn play_history_page(props: &PageProps) -> Html {
    let auth = use_auth();
    let plays = use_state(|| Load::<Vec<PlayRecord>>::Pending);

    {
        let plays = plays.clone();
        use_effect_with(props.user.clone(), move |user| {
            let user = user.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match user_client(auth.as_ref(), &user) {
                    Ok((client, user_id)) => client.play_history(&user_id).await,
                    Err(e) => Err(e),
                };
                plays.set(Load::from_result(result));
            });
        });
    }

    html! {
        <div class="max-w-5xl mx-auto p-6">
            <h2 class="text-3xl font-bold text-blue-600 mb-4">{"Play History"}</h2>
            {plays.view(|plays| {
                if plays.is_empty() {
                    return html! { <p class="text-gray-500">{"No play history found."}</p> };
                }
                html! {
                    <table class="w-full text-center border border-gray-200 dark:border-gray-700">
                        <thead class="bg-blue-600 text-white">
                            <tr>
                                <th>{"Play ID"}</th>
                                <th>{"Timestamp"}</th>
                                <th>{"Mode"}</th>
                                <th>{"Time to Finish"}</th>
                                <th>{"Mistakes"}</th>
                                <th>{"Status"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for plays.iter().map(|play| html! {
                                <tr key={play.play_id}>
                                    <td>{play.play_id.to_string()}</td>
                                    <td>{&play.timestamp}</td>
                                    <td>{&play.mode}</td>
                                    <td>{or_dash(play.time_to_finish.clone())}</td>
                                    <td>{or_dash(play.number_of_mistakes.map(|n| n.to_string()))}</td>
                                    <td>{or_dash(play.status.clone())}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                }
            })}
        </div>
    }
}
