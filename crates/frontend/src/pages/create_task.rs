//! New task form

use super::{Load, page_client, select_input, text_area_input, text_input, user_client};
use crate::auth::{PageProps, use_auth};
use crate::client::ClientError;
use crate::routes::Route;
use taskdesk_http::types::{Category, NewTask, Priority};
use yew::prelude::*;
use yew_router::prelude::*;

const TITLE_REQUIRED: &str = "Task title is required.";
const DUE_REQUIRED: &str = "Due date and time are required.";
const LOOKUP_REQUIRED: &str = "Choose a category and a priority.";
const INVALID_LOOKUP: &str = "Invalid category, priority, or status.";
const CREATE_FAILED: &str = "Failed to create task. Please try again.";

/// Form contents as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TaskDraft {
    title: String,
    description: String,
    due_date: String,
    due_time: String,
    is_important: bool,
    category_id: String,
    priority_id: String,
}

impl TaskDraft {
    /// Body for `user_id`, or the first message to show
    fn to_new_task(&self, user_id: i64) -> Result<NewTask, &'static str> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TITLE_REQUIRED);
        }
        if self.due_date.is_empty() || self.due_time.is_empty() {
            return Err(DUE_REQUIRED);
        }
        let (Ok(category_id), Ok(priority_id)) =
            (self.category_id.parse::<i64>(), self.priority_id.parse::<i64>())
        else {
            return Err(LOOKUP_REQUIRED);
        };
        // Time inputs omit seconds
        let due_time = if self.due_time.len() == 5 {
            format!("{}:00", self.due_time)
        } else {
            self.due_time.clone()
        };
        let description = self.description.trim();

        Ok(NewTask {
            user_id,
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            due_date: self.due_date.clone(),
            due_time,
            is_important: self.is_important,
            category_id,
            priority_id,
            status_id: NewTask::DEFAULT_STATUS,
        })
    }
}

fn failure_message(error: &ClientError) -> &'static str {
    match error {
        ClientError::BadRequest(_) => INVALID_LOOKUP,
        _ => CREATE_FAILED,
    }
}

#[function_component(CreateTaskPage)]
pub fn create_task_page(props: &PageProps) -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let options = use_state(|| Load::<(Vec<Category>, Vec<Priority>)>::Pending);
    let title = use_state(String::new);
    let description = use_state(String::new);
    let due_date = use_state(String::new);
    let due_time = use_state(String::new);
    let is_important = use_state(|| false);
    let category_id = use_state(String::new);
    let priority_id = use_state(String::new);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    {
        let options = options.clone();
        let auth = auth.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let result = match page_client(auth.as_ref()) {
                    Ok(client) => match (client.categories().await, client.priorities().await) {
                        (Ok(categories), Ok(priorities)) => Ok((categories, priorities)),
                        (Err(e), _) | (_, Err(e)) => Err(e),
                    },
                    Err(e) => Err(e),
                };
                options.set(Load::from_result(result));
            });
        });
    }

    let on_submit = {
        let draft = TaskDraft {
            title: (*title).clone(),
            description: (*description).clone(),
            due_date: (*due_date).clone(),
            due_time: (*due_time).clone(),
            is_important: *is_important,
            category_id: (*category_id).clone(),
            priority_id: (*priority_id).clone(),
        };
        let user = props.user.clone();
        let (error, saving) = (error.clone(), saving.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let user_id = user.user_id.as_deref().and_then(|id| id.parse::<i64>().ok());
            let new_task = match user_id.map(|user_id| draft.to_new_task(user_id)) {
                Some(Ok(new_task)) => new_task,
                Some(Err(message)) => {
                    error.set(Some(message.to_string()));
                    return;
                }
                None => {
                    error.set(Some(CREATE_FAILED.to_string()));
                    return;
                }
            };

            saving.set(true);
            error.set(None);
            let (auth, user, navigator) = (auth.clone(), user.clone(), navigator.clone());
            let (error, saving) = (error.clone(), saving.clone());
            wasm_bindgen_futures::spawn_local(async move {
                let result = match user_client(auth.as_ref(), &user) {
                    Ok((client, _)) => client.create_task(&new_task).await,
                    Err(e) => Err(e),
                };
                saving.set(false);
                match result {
                    Ok(task) => {
                        tracing::info!(title = %task.title, "Task created");
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Tasks);
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to create task");
                        error.set(Some(failure_message(&e).to_string()));
                    }
                }
            });
        })
    };

    let on_important = {
        let is_important = is_important.clone();
        Callback::from(move |_: Event| is_important.set(!*is_important))
    };
    let input_class = "w-full px-3 py-2 border border-gray-300 dark:border-gray-600 rounded-md dark:bg-gray-800";

    html! {
        <div class="max-w-2xl mx-auto p-6">
            <h2 class="text-3xl font-bold text-blue-600 mb-4">{"Create New Task"}</h2>
            if let Some(message) = &*error {
                <p class="mb-3 text-red-600 dark:text-red-400">{message}</p>
            }
            {options.view(|(categories, priorities)| html! {
                <form onsubmit={on_submit.clone()} class="space-y-4">
                    <label class="block">{"Task Title *"}
                        <input type="text" placeholder="Enter the task title" value={(*title).clone()}
                            oninput={text_input(title.clone())} class={input_class} />
                    </label>
                    <label class="block">{"Task Description"}
                        <textarea placeholder="Enter a brief description of the task (optional)"
                            value={(*description).clone()}
                            oninput={text_area_input(description.clone())} class={input_class} />
                    </label>
                    <div class="flex gap-4">
                        <label class="flex-1">{"Category *"}
                            <select onchange={select_input(category_id.clone())} class={input_class}>
                                <option value="" selected={category_id.is_empty()}>{"Select"}</option>
                                {for categories.iter().map(|c| html! {
                                    <option value={c.category_id.to_string()}>{&c.name}</option>
                                })}
                            </select>
                        </label>
                        <label class="flex-1">{"Priority *"}
                            <select onchange={select_input(priority_id.clone())} class={input_class}>
                                <option value="" selected={priority_id.is_empty()}>{"Select"}</option>
                                {for priorities.iter().map(|p| html! {
                                    <option value={p.priority_id.to_string()}>{&p.name}</option>
                                })}
                            </select>
                        </label>
                    </div>
                    <div class="flex gap-4">
                        <label class="flex-1">{"Due Date *"}
                            <input type="date" value={(*due_date).clone()}
                                oninput={text_input(due_date.clone())} class={input_class} />
                        </label>
                        <label class="flex-1">{"Due Time *"}
                            <input type="time" value={(*due_time).clone()}
                                oninput={text_input(due_time.clone())} class={input_class} />
                        </label>
                    </div>
                    <label class="flex items-center gap-2">
                        <input type="checkbox" checked={*is_important} onchange={on_important.clone()} />
                        {"Mark as important"}
                    </label>
                    <div class="flex gap-2">
                        <button type="submit" disabled={*saving}
                            class="px-4 py-2 rounded-md bg-blue-600 text-white disabled:opacity-50">
                            {if *saving { "Creating..." } else { "Create Task" }}
                        </button>
                        <Link<Route> to={Route::Home} classes="px-4 py-2 rounded-md bg-gray-200 dark:bg-gray-700">
                            {"Back to Home"}
                        </Link<Route>>
                    </div>
                </form>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TaskDraft {
        TaskDraft {
            title: " Water plants ".to_string(),
            description: String::new(),
            due_date: "2024-06-01".to_string(),
            due_time: "09:30".to_string(),
            is_important: true,
            category_id: "2".to_string(),
            priority_id: "1".to_string(),
        }
    }

    #[test]
    fn test_draft_becomes_new_task() {
        let task = draft().to_new_task(7).unwrap();
        assert_eq!(task.title, "Water plants");
        assert_eq!(task.description, None);
        assert_eq!(task.due_time, "09:30:00");
        assert_eq!((task.category_id, task.priority_id), (2, 1));
        assert_eq!(task.status_id, NewTask::DEFAULT_STATUS);
    }

    #[test]
    fn test_title_is_required() {
        let draft = TaskDraft {
            title: "   ".to_string(),
            ..draft()
        };
        assert_eq!(draft.to_new_task(7), Err(TITLE_REQUIRED));
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let no_time = TaskDraft {
            due_time: String::new(),
            ..draft()
        };
        assert_eq!(no_time.to_new_task(7), Err(DUE_REQUIRED));

        let no_category = TaskDraft {
            category_id: String::new(),
            ..draft()
        };
        assert_eq!(no_category.to_new_task(7), Err(LOOKUP_REQUIRED));
    }

    #[test]
    fn test_rejected_lookup_has_its_own_message() {
        assert_eq!(
            failure_message(&ClientError::BadRequest("x".into())),
            INVALID_LOOKUP
        );
        assert_eq!(
            failure_message(&ClientError::NotFound("x".into())),
            CREATE_FAILED
        );
    }
}
