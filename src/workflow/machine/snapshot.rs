//! Read-only views handed to the view layer.

use super::WorkflowState;
use crate::workflow::domain::WorkflowContext;
use serde::{Deserialize, Serialize};

/// Current state and context of a workflow machine.
///
/// Snapshots are owned copies; mutating one has no effect on the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSnapshot {
    /// Full state path.
    pub state: WorkflowState,
    /// Selection and list collection.
    pub context: WorkflowContext,
    /// Configured task limit.
    pub task_limit: usize,
}

impl WorkflowSnapshot {
    /// Returns `true` while a remote call is outstanding.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Returns `true` when the selected list holds as many tasks as allowed.
    #[must_use]
    pub fn tasks_are_full(&self) -> bool {
        self.context.tasks_are_full(self.task_limit)
    }
}

/// Notification emitted when an invoked call fails.
///
/// Serializes as `{"type":"error","error":"<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorkflowNotification {
    /// A remote call failed; the machine recovered without changes.
    Error {
        /// Human-readable failure message.
        error: String,
    },
}

impl WorkflowNotification {
    /// Creates an error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Error { error } => error,
        }
    }
}
