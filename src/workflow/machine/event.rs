//! Events dispatched by the view layer.

use crate::workflow::domain::{TaskId, TasksListId};
use serde::{Deserialize, Serialize};

/// Named event accepted by the workflow machine.
///
/// Serialized with a `type` tag, e.g. `{"type":"add","content":"Buy milk"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorkflowEvent {
    /// Clears everything and reloads; accepted in every state.
    Reset,
    /// Leaves `empty` to ask for the first list name.
    ReadyToAddFirstTaskList,
    /// Creates a list.
    AddTasksList {
        /// Requested list name.
        name: String,
    },
    /// Renames a list.
    UpdateTasksList {
        /// List to rename.
        id: TasksListId,
        /// New name.
        name: String,
    },
    /// Deletes the selected list.
    DeleteTasksList,
    /// Selects another list.
    SelectTasksList {
        /// List to select.
        id: TasksListId,
    },
    /// Adds a task to the selected list.
    Add {
        /// Task content.
        content: String,
    },
    /// Ticks a task of the selected list.
    Tick {
        /// Task to tick.
        id: TaskId,
    },
    /// Carries a task of the selected list into the next cycle.
    Carry {
        /// Task to carry.
        id: TaskId,
    },
    /// Removes a task of the selected list.
    Remove {
        /// Task to remove.
        id: TaskId,
    },
}

impl WorkflowEvent {
    /// Returns the event name used on the wire and in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::ReadyToAddFirstTaskList => "readyToAddFirstTaskList",
            Self::AddTasksList { .. } => "addTasksList",
            Self::UpdateTasksList { .. } => "updateTasksList",
            Self::DeleteTasksList => "deleteTasksList",
            Self::SelectTasksList { .. } => "selectTasksList",
            Self::Add { .. } => "add",
            Self::Tick { .. } => "tick",
            Self::Carry { .. } => "carry",
            Self::Remove { .. } => "remove",
        }
    }
}
