//! Request and response bodies of the task backend

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `POST /data/login-history-stamp` body
#[derive(Debug, Clone, Serialize)]
pub struct StampRequest<'a> {
    pub user_id: &'a str,
}

/// Task as returned by `/algo/*`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub due_date: Option<String>,
    pub is_important: bool,
    #[serde(default)]
    pub finished_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Task {
    /// Completed or abandoned tasks take no further actions
    pub fn is_closed(&self) -> bool {
        self.status.as_deref().is_some_and(|s| {
            s.eq_ignore_ascii_case("completed") || s.eq_ignore_ascii_case("abandoned")
        })
    }
}

/// Filters for `GET /algo/get-all-tasks`; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskQuery {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorting_status: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub reverse_status: bool,
}

impl TaskQuery {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }
}

/// Entry of a user's login history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRecord {
    pub login_id: i64,
    pub user_id: i64,
    pub time: String,
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub weekday: String,
}

/// Row of the admin user listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub create_date: String,
}

/// `POST /algo/tasks` body; the backend echoes it back on success
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `YYYY-MM-DD`
    pub due_date: String,
    /// `HH:MM:SS`
    pub due_time: String,
    pub is_important: bool,
    pub category_id: i64,
    pub priority_id: i64,
    #[serde(default = "NewTask::default_status")]
    pub status_id: i64,
}

impl NewTask {
    /// Status a new task starts in
    pub const DEFAULT_STATUS: i64 = 1;

    const fn default_status() -> i64 {
        Self::DEFAULT_STATUS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub priority_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub status_id: i64,
    pub name: String,
}

/// Entry of a user's play history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub play_id: i64,
    pub user_id: i64,
    pub timestamp: String,
    /// `HH:MM:SS`
    #[serde(default)]
    pub time_to_finish: Option<String>,
    pub mode: String,
    #[serde(default)]
    pub number_of_mistakes: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Task as listed by `GET /task-for-calendar`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarTask {
    pub task_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub due_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewTask {
    pub task_id: i64,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    pub priority: String,
    pub status: String,
    #[serde(default)]
    pub due_date: Option<String>,
    pub is_important: bool,
}

/// Per-user totals of `GET /algo/tasks-overview`
///
/// Count maps are keyed by name; tasks without a category count under
/// `"null"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasksOverview {
    pub total_tasks: u32,
    pub tasks: Vec<OverviewTask>,
    pub category_counts: BTreeMap<String, u32>,
    pub priority_counts: BTreeMap<String, u32>,
    pub status_counts: BTreeMap<String, u32>,
}

/// `DELETE /algo/delete_user/{id}` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedUser {
    pub message: String,
}
