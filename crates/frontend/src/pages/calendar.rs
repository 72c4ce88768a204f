//! Tasks grouped by due day

use super::{Load, user_client};
use crate::auth::{PageProps, use_auth};
use std::collections::BTreeMap;
use taskdesk_http::types::CalendarTask;
use yew::prelude::*;

/// Tasks keyed by the `YYYY-MM-DD` part of their due date, earliest first
fn by_day(tasks: &[CalendarTask]) -> BTreeMap<&str, Vec<&CalendarTask>> {
    let mut days: BTreeMap<&str, Vec<&CalendarTask>> = BTreeMap::new();
    for task in tasks {
        let day = task.due_date.get(..10).unwrap_or(task.due_date.as_str());
        days.entry(day).or_default().push(task);
    }
    days
}

#[function_component(CalendarPage)]
pub fn calendar_page(props: &PageProps) -> Html {
    let auth = use_auth();
    let tasks = use_state(|| Load::<Vec<CalendarTask>>::Pending);

    {
        let tasks = tasks.clone();
        use_effect_with(props.user.clone(), move |user| {
            let user = user.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match user_client(auth.as_ref(), &user) {
                    Ok((client, user_id)) => client.calendar_tasks(&user_id).await,
                    Err(e) => Err(e),
                };
                tasks.set(Load::from_result(result));
            });
        });
    }

    html! {
        <div class="max-w-4xl mx-auto p-6">
            <h2 class="text-3xl font-bold text-blue-600 mb-4">{"Calendar"}</h2>
            {tasks.view(|tasks| {
                if tasks.is_empty() {
                    return html! { <p class="text-gray-500">{"No tasks scheduled."}</p> };
                }
                html! {
                    <div class="space-y-4">
                        {for by_day(tasks).into_iter().map(|(day, tasks)| html! {
                            <section key={day.to_string()}>
                                <h3 class="text-lg font-semibold border-b border-gray-200 dark:border-gray-700">{day}</h3>
                                <ul class="mt-2 space-y-1">
                                    {for tasks.into_iter().map(|task| html! {
                                        <li key={task.task_id}>
                                            <span class="font-medium">{&task.title}</span>
                                            if let Some(description) = &task.description {
                                                <span class="text-gray-500">{format!(" - {description}")}</span>
                                            }
                                        </li>
                                    })}
                                </ul>
                            </section>
                        })}
                    </div>
                }
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(task_id: i64, due_date: &str) -> CalendarTask {
        CalendarTask {
            task_id,
            title: format!("Task {task_id}"),
            description: None,
            due_date: due_date.to_string(),
        }
    }

    #[test]
    fn test_tasks_grouped_by_day_in_order() {
        let tasks = vec![
            task(1, "2024-06-02T08:00:00"),
            task(2, "2024-06-01T17:00:00"),
            task(3, "2024-06-02T12:00:00"),
        ];
        let days = by_day(&tasks);
        let keys: Vec<_> = days.keys().copied().collect();
        assert_eq!(keys, vec!["2024-06-01", "2024-06-02"]);
        assert_eq!(days["2024-06-02"].len(), 2);
    }

    #[test]
    fn test_short_dates_are_kept() {
        let tasks = vec![task(1, "soon")];
        assert!(by_day(&tasks).contains_key("soon"));
    }
}
