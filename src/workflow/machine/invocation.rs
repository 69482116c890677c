//! Remote calls started on entry to invoking states.

use crate::workflow::{
    domain::{TaskId, TasksList, TasksListId},
    ports::{CreatedTask, DeletedList, ListSummary, TaskAck, TasksApiCall},
};
use std::fmt;

/// Token identifying one outstanding invocation.
///
/// Tokens increase monotonically per machine. A resolution whose token does
/// not match the outstanding invocation is stale and gets discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvocationToken(u64);

impl InvocationToken {
    /// Returns the raw token value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    pub(super) const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub(super) const fn first() -> Self {
        Self(1)
    }
}

impl fmt::Display for InvocationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Input of a remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    /// List every tasks list.
    ListAll,
    /// Create a list.
    CreateList {
        /// Requested name.
        name: String,
    },
    /// Rename a list.
    RenameList {
        /// List to rename.
        id: TasksListId,
        /// New name.
        name: String,
    },
    /// Delete a list.
    DeleteList {
        /// List to delete.
        id: TasksListId,
    },
    /// Create a task.
    CreateTask {
        /// Owning list.
        list_id: TasksListId,
        /// Task content.
        content: String,
    },
    /// Tick a task.
    TickTask {
        /// Owning list.
        list_id: TasksListId,
        /// Task to tick.
        task_id: TaskId,
    },
    /// Carry a task.
    CarryTask {
        /// Owning list.
        list_id: TasksListId,
        /// Task to carry.
        task_id: TaskId,
    },
    /// Remove a task.
    RemoveTask {
        /// Owning list.
        list_id: TasksListId,
        /// Task to remove.
        task_id: TaskId,
    },
}

impl RemoteCall {
    /// Returns which persistence API call this is.
    #[must_use]
    pub const fn call(&self) -> TasksApiCall {
        match self {
            Self::ListAll => TasksApiCall::ListAll,
            Self::CreateList { .. } => TasksApiCall::CreateList,
            Self::RenameList { .. } => TasksApiCall::RenameList,
            Self::DeleteList { .. } => TasksApiCall::DeleteList,
            Self::CreateTask { .. } => TasksApiCall::CreateTask,
            Self::TickTask { .. } => TasksApiCall::TickTask,
            Self::CarryTask { .. } => TasksApiCall::CarryTask,
            Self::RemoveTask { .. } => TasksApiCall::RemoveTask,
        }
    }
}

/// Success payload of a remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteReply {
    /// Every list with its tasks.
    Lists(Vec<TasksList>),
    /// A list was created.
    ListCreated(ListSummary),
    /// A list was renamed.
    ListRenamed(ListSummary),
    /// A list was deleted.
    ListDeleted(DeletedList),
    /// A task was created.
    TaskCreated(CreatedTask),
    /// A task was ticked.
    TaskTicked(TaskAck),
    /// A task was carried.
    TaskCarried(TaskAck),
    /// A task was removed.
    TaskRemoved(TaskAck),
}

impl RemoteReply {
    /// Returns which persistence API call produced this reply.
    #[must_use]
    pub const fn call(&self) -> TasksApiCall {
        match self {
            Self::Lists(_) => TasksApiCall::ListAll,
            Self::ListCreated(_) => TasksApiCall::CreateList,
            Self::ListRenamed(_) => TasksApiCall::RenameList,
            Self::ListDeleted(_) => TasksApiCall::DeleteList,
            Self::TaskCreated(_) => TasksApiCall::CreateTask,
            Self::TaskTicked(_) => TasksApiCall::TickTask,
            Self::TaskCarried(_) => TasksApiCall::CarryTask,
            Self::TaskRemoved(_) => TasksApiCall::RemoveTask,
        }
    }
}

/// A remote call to perform on behalf of the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Token to hand back with the resolution.
    pub token: InvocationToken,
    /// Call input.
    pub call: RemoteCall,
}
