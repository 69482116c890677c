//! Error types for tasks list rules and workflow configuration.

use super::{TaskId, TasksListId};
use thiserror::Error;

/// Rule violations raised when a tasks list refuses a change.
///
/// The messages are the human-readable text surfaced to users through the
/// error notification channel.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowDomainError {
    /// The list name is empty after trimming.
    #[error("Tasks list name must not be empty")]
    EmptyListName,

    /// No list exists with the given identifier.
    #[error("Tasks list not found: {0}")]
    ListNotFound(TasksListId),

    /// The list holds as many tasks as the limit allows.
    #[error("Tasks list holds {limit} tasks. Each task must be carried, removed or ticked")]
    ListFull {
        /// Configured task limit.
        limit: usize,
    },

    /// Carry and remove are only available once the list is full.
    #[error("Tasks list is not yet full")]
    ListNotYetFull,

    /// No task exists with the given identifier in the list.
    #[error("Task not found")]
    TaskNotFound(TaskId),

    /// Ticked tasks are done and cannot be deferred.
    #[error("Ticked tasks cannot be carried")]
    TickedTaskCannotBeCarried(TaskId),

    /// Ticked tasks are done and cannot be discarded.
    #[error("Ticked tasks cannot be marked for removal")]
    TickedTaskCannotBeRemoved(TaskId),

    /// The task has used up its carries.
    #[error("Task has been carried twice and must be removed")]
    CarriedTwice(TaskId),

    /// The task was already carried or removed in the current cycle.
    #[error("Task has already been decided in this cycle")]
    AlreadyDecided(TaskId),

    /// The task was already ticked or removed.
    #[error("Task is already resolved")]
    AlreadyResolved(TaskId),
}

/// Error returned when workflow configuration cannot be loaded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowConfigError {
    /// The task limit is not a positive integer.
    #[error("invalid task limit '{0}', expected a positive integer")]
    InvalidTaskLimit(String),
}
