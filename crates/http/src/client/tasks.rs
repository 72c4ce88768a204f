//! Authenticated data services

use super::{error::ClientError, session::SessionClient};
use crate::types::{
    CalendarTask, Category, DeletedUser, LoginRecord, NewTask, PlayRecord, Priority, Task,
    TaskQuery, TaskStatus, TasksOverview, UserSummary,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use taskdesk_core::{Navigator, SessionStore};

/// A 404 from the list endpoints means "nothing found"
fn empty_on_not_found<T>(result: Result<Vec<T>, ClientError>) -> Result<Vec<T>, ClientError> {
    match result {
        Err(ClientError::NotFound(_)) => Ok(Vec::new()),
        other => other,
    }
}

impl<S: SessionStore, N: Navigator> SessionClient<S, N> {
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.call(|client| async move {
            let request = client.request(Method::GET, path);
            client.execute(request).await
        })
        .await
    }

    /// Tasks of a user; "no tasks match" is an empty list, not an error
    pub async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, ClientError> {
        empty_on_not_found(
            self.call(|client| async move {
                let request = client
                    .request(Method::GET, "/algo/get-all-tasks")
                    .query(query);
                client.execute(request).await
            })
            .await,
        )
    }

    /// Create a task; an unknown category, priority or status is a 400
    pub async fn create_task(&self, task: &NewTask) -> Result<NewTask, ClientError> {
        self.call(|client| async move {
            let request = client.request(Method::POST, "/algo/tasks").json(task);
            client.execute(request).await
        })
        .await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        empty_on_not_found(self.get_json("/algo/categories").await)
    }

    pub async fn priorities(&self) -> Result<Vec<Priority>, ClientError> {
        empty_on_not_found(self.get_json("/algo/priorities").await)
    }

    pub async fn statuses(&self) -> Result<Vec<TaskStatus>, ClientError> {
        empty_on_not_found(self.get_json("/algo/statuses").await)
    }

    /// Tasks with a due date, for the calendar view
    pub async fn calendar_tasks(&self, user_id: &str) -> Result<Vec<CalendarTask>, ClientError> {
        empty_on_not_found(
            self.call(|client| async move {
                let request = client
                    .request(Method::GET, "/task-for-calendar")
                    .query(&[("user_id", user_id)]);
                client.execute(request).await
            })
            .await,
        )
    }

    /// Task totals by category, priority and status
    pub async fn tasks_overview(&self, user_id: &str) -> Result<TasksOverview, ClientError> {
        self.call(|client| async move {
            let request = client
                .request(Method::GET, "/algo/tasks-overview")
                .query(&[("user_id", user_id)]);
            client.execute(request).await
        })
        .await
    }

    pub async fn complete_task(&self, task_id: i64) -> Result<Task, ClientError> {
        self.call(|client| async move {
            let request = client.request(Method::PUT, &format!("/algo/complete-task/{task_id}"));
            client.execute(request).await
        })
        .await
    }

    pub async fn abandon_task(&self, task_id: i64) -> Result<Task, ClientError> {
        self.call(|client| async move {
            let request = client.request(Method::PUT, &format!("/algo/abandon-task/{task_id}"));
            client.execute(request).await
        })
        .await
    }

    pub async fn login_history(&self, user_id: &str) -> Result<Vec<LoginRecord>, ClientError> {
        self.get_json(&format!("/data/login-history/user/{user_id}")).await
    }

    pub async fn play_history(&self, user_id: &str) -> Result<Vec<PlayRecord>, ClientError> {
        empty_on_not_found(self.get_json(&format!("/data/play-history/user/{user_id}")).await)
    }

    /// Admin user listing
    pub async fn all_users(&self) -> Result<Vec<UserSummary>, ClientError> {
        self.get_json("/algo/all_users").await
    }

    /// Admin removal of a user account
    pub async fn delete_user(&self, user_id: i64) -> Result<DeletedUser, ClientError> {
        self.call(|client| async move {
            let request = client.request(Method::DELETE, &format!("/algo/delete_user/{user_id}"));
            client.execute(request).await
        })
        .await
    }
}
