//! Task list with search, filters and complete/abandon actions

use super::{Load, non_empty, page_client, select_input, text_input, user_client};
use crate::auth::{PageProps, use_auth};
use taskdesk_http::types::{Category, Priority, Task, TaskQuery, TaskStatus};
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
enum TaskAction {
    Complete,
    Abandon,
}

/// Sort keys the backend accepts, with their labels
const SORT_KEYS: [(&str, &str); 4] = [
    ("task_id", "Task ID"),
    ("title", "Title"),
    ("due_date", "Due Date"),
    ("is_important", "Important Status"),
];

/// Filters applied to the task list; empty strings mean "any"
#[derive(Debug, Clone, PartialEq, Eq)]
struct TaskFilters {
    title: String,
    category: String,
    status: String,
    priority: String,
    sort_by: String,
    reverse: bool,
}

impl Default for TaskFilters {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: String::new(),
            status: String::new(),
            priority: String::new(),
            sort_by: SORT_KEYS[0].0.to_string(),
            reverse: false,
        }
    }
}

impl TaskFilters {
    fn query(&self, user_id: String) -> TaskQuery {
        TaskQuery {
            title: non_empty(&self.title),
            category: non_empty(&self.category),
            status: non_empty(&self.status),
            priority: non_empty(&self.priority),
            sorting_status: non_empty(&self.sort_by),
            reverse_status: self.reverse,
            ..TaskQuery::for_user(user_id)
        }
    }
}

/// Options for the filter selects
#[derive(Debug, Clone, Default, PartialEq)]
struct Lookups {
    categories: Vec<Category>,
    priorities: Vec<Priority>,
    statuses: Vec<TaskStatus>,
}

fn filter_select(
    label: &'static str,
    selected: &str,
    names: impl Iterator<Item = String>,
    onchange: Callback<Event>,
) -> Html {
    html! {
        <label class="flex items-center gap-2 text-sm">
            {label}
            <select {onchange} class="px-2 py-1 border border-gray-300 dark:border-gray-600 rounded-md dark:bg-gray-800">
                <option value="" selected={selected.is_empty()}>{"Any"}</option>
                {for names.map(|name| html! {
                    <option value={name.clone()} selected={name == selected}>{name.clone()}</option>
                })}
            </select>
        </label>
    }
}

#[function_component(TasksPage)]
pub fn tasks_page(props: &PageProps) -> Html {
    let auth = use_auth();
    let tasks = use_state(|| Load::<Vec<Task>>::Pending);
    let lookups = use_state(Lookups::default);
    let filters = use_state(TaskFilters::default);
    let title = use_state(String::new);
    let category = use_state(String::new);
    let status = use_state(String::new);
    let priority = use_state(String::new);
    let sort_by = use_state(|| SORT_KEYS[0].0.to_string());
    let action_error = use_state(|| None::<String>);
    // Bumped after each action to reload the list
    let revision = use_state(|| 0_u32);

    {
        let lookups = lookups.clone();
        let auth = auth.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let client = match page_client(auth.as_ref()) {
                    Ok(client) => client,
                    Err(e) => {
                        tracing::error!(error = %e, "Filter options unavailable");
                        return;
                    }
                };
                let categories = client.categories().await;
                let priorities = client.priorities().await;
                let statuses = client.statuses().await;
                match (categories, priorities, statuses) {
                    (Ok(categories), Ok(priorities), Ok(statuses)) => lookups.set(Lookups {
                        categories,
                        priorities,
                        statuses,
                    }),
                    (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                        tracing::error!(error = %e, "Failed to fetch filter options");
                    }
                }
            });
        });
    }

    // Selects and sort apply at once; the title applies on search
    {
        let filters = filters.clone();
        use_effect_with(
            (
                (*category).clone(),
                (*status).clone(),
                (*priority).clone(),
                (*sort_by).clone(),
            ),
            move |(category, status, priority, sort_by)| {
                filters.set(TaskFilters {
                    category: category.clone(),
                    status: status.clone(),
                    priority: priority.clone(),
                    sort_by: sort_by.clone(),
                    ..(*filters).clone()
                });
            },
        );
    }

    {
        let tasks = tasks.clone();
        let auth = auth.clone();
        let user = props.user.clone();
        use_effect_with(((*filters).clone(), *revision), move |(filters, _)| {
            let filters = filters.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match user_client(auth.as_ref(), &user) {
                    Ok((client, user_id)) => client.list_tasks(&filters.query(user_id)).await,
                    Err(e) => Err(e),
                };
                tasks.set(Load::from_result(result));
            });
        });
    }

    let on_search = {
        let (filters, title) = (filters.clone(), title.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            filters.set(TaskFilters {
                title: (*title).clone(),
                ..(*filters).clone()
            });
        })
    };

    let on_show_all = {
        let (filters, title) = (filters.clone(), title.clone());
        let (category, status, priority) = (category.clone(), status.clone(), priority.clone());
        let sort_by = sort_by.clone();
        Callback::from(move |_: MouseEvent| {
            title.set(String::new());
            category.set(String::new());
            status.set(String::new());
            priority.set(String::new());
            sort_by.set(SORT_KEYS[0].0.to_string());
            filters.set(TaskFilters::default());
        })
    };

    let on_reverse = {
        let filters = filters.clone();
        Callback::from(move |_: MouseEvent| {
            filters.set(TaskFilters {
                reverse: !filters.reverse,
                ..(*filters).clone()
            });
        })
    };
    let on_action = {
        let action_error = action_error.clone();
        let revision = revision.clone();
        Callback::from(move |(task_id, action): (i64, TaskAction)| {
            let auth = auth.clone();
            let action_error = action_error.clone();
            let revision = revision.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match page_client(auth.as_ref()) {
                    Ok(client) => match action {
                        TaskAction::Complete => client.complete_task(task_id).await,
                        TaskAction::Abandon => client.abandon_task(task_id).await,
                    },
                    Err(e) => Err(e),
                };
                match result {
                    Ok(task) => {
                        tracing::info!(
                            task_id = task.task_id,
                            status = ?task.status,
                            "Task updated"
                        );
                        action_error.set(None);
                        revision.set(*revision + 1);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, task_id, "Task update failed");
                        action_error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    html! {
        <div class="max-w-6xl mx-auto p-6">
            <h2 class="text-3xl font-bold text-blue-600 mb-4">{"All Tasks"}</h2>
            <form onsubmit={on_search} class="flex gap-2 mb-3">
                <input type="text" placeholder="Enter Task Title" value={(*title).clone()}
                    oninput={text_input(title.clone())}
                    class="flex-1 px-3 py-2 border border-gray-300 dark:border-gray-600 rounded-md" />
                <button type="submit" class="px-3 py-2 rounded-md bg-blue-600 text-white">{"Search"}</button>
                <button type="button" onclick={on_show_all} class="px-3 py-2 rounded-md bg-gray-200 dark:bg-gray-700">{"Show All"}</button>
            </form>
            <div class="flex flex-wrap items-center gap-4 mb-4">
                <label class="flex items-center gap-2 text-sm">
                    {"Sort by"}
                    <select onchange={select_input(sort_by.clone())} class="px-2 py-1 border border-gray-300 dark:border-gray-600 rounded-md dark:bg-gray-800">
                        {for SORT_KEYS.iter().map(|(key, label)| html! {
                            <option value={*key} selected={*key == sort_by.as_str()}>{*label}</option>
                        })}
                    </select>
                </label>
                {filter_select("Category", &category, lookups.categories.iter().map(|c| c.name.clone()), select_input(category.clone()))}
                {filter_select("Status", &status, lookups.statuses.iter().map(|s| s.name.clone()), select_input(status.clone()))}
                {filter_select("Priority", &priority, lookups.priorities.iter().map(|p| p.name.clone()), select_input(priority.clone()))}
                <button onclick={on_reverse} class="px-3 py-1 text-sm rounded-md bg-gray-200 dark:bg-gray-700">
                    {if filters.reverse { "Ascending" } else { "Descending" }}
                </button>
            </div>
            if let Some(message) = &*action_error {
                <p class="mb-2 text-red-600 dark:text-red-400">{message}</p>
            }
            {tasks.view(|tasks| {
                if tasks.is_empty() {
                    return html! { <p class="text-gray-500">{"No tasks found."}</p> };
                }
                html! {
                    <table class="w-full text-center border border-gray-200 dark:border-gray-700">
                        <thead class="bg-blue-600 text-white">
                            <tr>
                                <th>{"Task ID"}</th>
                                <th>{"Title"}</th>
                                <th>{"Description"}</th>
                                <th>{"Due Date"}</th>
                                <th>{"Is Important"}</th>
                                <th>{"Category"}</th>
                                <th>{"Status"}</th>
                                <th>{"Priority"}</th>
                                <th>{"Done"}</th>
                                <th>{"Abandon"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for tasks.iter().map(|task| task_row(task, &on_action))}
                        </tbody>
                    </table>
                }
            })}
        </div>
    }
}

fn task_row(task: &Task, on_action: &Callback<(i64, TaskAction)>) -> Html {
    let task_id = task.task_id;
    let button = |action: TaskAction, label: &'static str| {
        let on_action = on_action.clone();
        html! {
            <button
                disabled={task.is_closed()}
                onclick={Callback::from(move |_: MouseEvent| on_action.emit((task_id, action)))}
                class="px-2 py-1 text-sm rounded-md bg-gray-200 dark:bg-gray-700 disabled:opacity-50"
            >
                {label}
            </button>
        }
    };
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    html! {
        <tr key={task_id}>
            <td>{task_id.to_string()}</td>
            <td>{&task.title}</td>
            <td>{text(&task.description)}</td>
            <td>{text(&task.due_date)}</td>
            <td>{if task.is_important { "Yes" } else { "No" }}</td>
            <td>{text(&task.category)}</td>
            <td>{text(&task.status)}</td>
            <td>{text(&task.priority)}</td>
            <td>{button(TaskAction::Complete, "Done")}</td>
            <td>{button(TaskAction::Abandon, "Abandon")}</td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_send_only_sort_key() {
        let query = TaskFilters::default().query("7".to_string());
        assert_eq!(query.sorting_status.as_deref(), Some("task_id"));
        assert_eq!(
            query,
            TaskQuery {
                sorting_status: Some("task_id".to_string()),
                ..TaskQuery::for_user("7")
            }
        );
    }

    #[test]
    fn test_selected_filters_become_query() {
        let filters = TaskFilters {
            title: " plants ".to_string(),
            category: "Home".to_string(),
            status: String::new(),
            priority: "High".to_string(),
            sort_by: "due_date".to_string(),
            reverse: true,
        };
        let query = filters.query("7".to_string());
        assert_eq!(query.title.as_deref(), Some("plants"));
        assert_eq!(query.category.as_deref(), Some("Home"));
        assert_eq!(query.status, None);
        assert_eq!(query.priority.as_deref(), Some("High"));
        assert!(query.reverse_status);
    }
}
