//! Task totals by category, priority and status

use super::{Load, user_client};
use crate::auth::{PageProps, use_auth};
use std::collections::BTreeMap;
use taskdesk_http::types::TasksOverview;
use yew::prelude::*;

/// Largest count first; ties by name
fn ranked(counts: &BTreeMap<String, u32>) -> Vec<(&str, u32)> {
    let mut rows: Vec<_> = counts
        .iter()
        .map(|(name, count)| {
            let name = if name == "null" { "None" } else { name.as_str() };
            (name, *count)
        })
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    rows
}

fn count_table(title: &'static str, counts: &BTreeMap<String, u32>) -> Html {
    html! {
        <div class="bg-white dark:bg-gray-800 shadow rounded-lg p-4">
            <h3 class="text-lg font-semibold mb-2">{title}</h3>
            if counts.is_empty() {
                <p class="text-gray-500">{"-"}</p>
            } else {
                <table class="w-full">
                    <tbody>
                        {for ranked(counts).into_iter().map(|(name, count)| html! {
                            <tr key={name.to_string()}>
                                <td>{name}</td>
                                <td class="text-right">{count.to_string()}</td>
                            </tr>
                        })}
                    </tbody>
                </table>
            }
        </div>
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &PageProps) -> Html {
    let auth = use_auth();
    let overview = use_state(|| Load::<TasksOverview>::Pending);

    {
        let overview = overview.clone();
        use_effect_with(props.user.clone(), move |user| {
            let user = user.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match user_client(auth.as_ref(), &user) {
                    Ok((client, user_id)) => client.tasks_overview(&user_id).await,
                    Err(e) => Err(e),
                };
                overview.set(Load::from_result(result));
            });
        });
    }

    html! {
        <div class="max-w-6xl mx-auto p-6">
            <h2 class="text-3xl font-bold text-blue-600 mb-4">{"Dashboard"}</h2>
            {overview.view(|overview| {
                let important = overview.tasks.iter().filter(|task| task.is_important).count();
                html! {
                    <>
                        <p class="mb-4">
                            {format!("{} tasks, {important} marked important", overview.total_tasks)}
                        </p>
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                            {count_table("By category", &overview.category_counts)}
                            {count_table("By priority", &overview.priority_counts)}
                            {count_table("By status", &overview.status_counts)}
                        </div>
                    </>
                }
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_ranked_with_null_named() {
        let counts = BTreeMap::from([
            ("Home".to_string(), 2),
            ("null".to_string(), 1),
            ("Work".to_string(), 2),
        ]);
        assert_eq!(ranked(&counts), vec![("Home", 2), ("Work", 2), ("None", 1)]);
    }
}
