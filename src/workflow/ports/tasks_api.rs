//! Remote persistence port for tasks lists and tasks.

use crate::workflow::domain::{TaskId, TasksList, TasksListId, WorkflowDomainError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for persistence API calls.
pub type TasksApiResult<T> = Result<T, TasksApiError>;

/// Persistence contract consumed by the workflow.
///
/// Each call is a single request with a single response: a success payload
/// or a [`TasksApiError`] carrying a human-readable message.
#[async_trait]
pub trait TasksApi: Send + Sync {
    /// Lists every tasks list visible to the user, with their tasks.
    async fn list_all(&self) -> TasksApiResult<Vec<TasksList>>;

    /// Creates an empty list.
    async fn create_list(&self, name: &str) -> TasksApiResult<ListSummary>;

    /// Renames a list.
    async fn rename_list(&self, id: &TasksListId, name: &str) -> TasksApiResult<ListSummary>;

    /// Deletes a list.
    async fn delete_list(&self, id: &TasksListId) -> TasksApiResult<DeletedList>;

    /// Appends a task to a list.
    async fn create_task(
        &self,
        list_id: &TasksListId,
        content: &str,
    ) -> TasksApiResult<CreatedTask>;

    /// Marks a task complete.
    async fn tick_task(&self, list_id: &TasksListId, task_id: &TaskId) -> TasksApiResult<TaskAck>;

    /// Defers a task into the next cycle.
    async fn carry_task(&self, list_id: &TasksListId, task_id: &TaskId) -> TasksApiResult<TaskAck>;

    /// Discards a task.
    async fn remove_task(&self, list_id: &TasksListId, task_id: &TaskId) -> TasksApiResult<TaskAck>;
}

/// Names of the persistence API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TasksApiCall {
    /// List every tasks list.
    ListAll,
    /// Create a list.
    CreateList,
    /// Rename a list.
    RenameList,
    /// Delete a list.
    DeleteList,
    /// Create a task.
    CreateTask,
    /// Tick a task.
    TickTask,
    /// Carry a task.
    CarryTask,
    /// Remove a task.
    RemoveTask,
}

impl TasksApiCall {
    /// Returns the canonical call name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListAll => "list_all",
            Self::CreateList => "create_list",
            Self::RenameList => "rename_list",
            Self::DeleteList => "delete_list",
            Self::CreateTask => "create_task",
            Self::TickTask => "tick_task",
            Self::CarryTask => "carry_task",
            Self::RemoveTask => "remove_task",
        }
    }
}

impl fmt::Display for TasksApiCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and name of a created or renamed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    /// List identifier.
    pub id: TasksListId,
    /// List name.
    pub name: String,
}

/// Identity of a deleted list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedList {
    /// List identifier.
    pub id: TasksListId,
}

/// Identity and content of a created task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTask {
    /// Task identifier.
    pub id: TaskId,
    /// Task content.
    pub content: String,
}

/// Acknowledgement of a tick, carry or remove call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAck {
    /// Task identifier.
    pub task_id: TaskId,
}

/// Errors returned by persistence API implementations.
#[derive(Debug, Clone, Error)]
pub enum TasksApiError {
    /// The server refused the request.
    #[error("{0}")]
    Rejected(String),

    /// The list or task does not exist.
    #[error("{what} not found: {id}")]
    NotFound {
        /// Kind of record that was missing.
        what: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// The server could not be reached.
    #[error("{0}")]
    Unavailable(String),

    /// Adapter-internal failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TasksApiError {
    /// Wraps an adapter-internal error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Human-readable message surfaced to the user.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<WorkflowDomainError> for TasksApiError {
    fn from(err: WorkflowDomainError) -> Self {
        match err {
            WorkflowDomainError::ListNotFound(id) => Self::NotFound {
                what: "tasks list",
                id: id.to_string(),
            },
            other => Self::Rejected(other.to_string()),
        }
    }
}
