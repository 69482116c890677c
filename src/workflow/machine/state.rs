//! State values of the list-level machine and its nested task machine.

use serde::{Serialize, Serializer};
use std::fmt;

/// State of the list-level machine.
///
/// The task-level state only exists while the list machine is in
/// [`WorkflowState::AddingLists`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    /// Fetching every list from the persistence API.
    Loading,
    /// No list is shown yet.
    Empty,
    /// Waiting for the first list name.
    ReadyToAddLists,
    /// Creating a list remotely.
    CreatingTheList,
    /// Renaming a list remotely.
    UpdatingTheList,
    /// Deleting the selected list remotely.
    DeletingTheList,
    /// Lists exist and one is selected; hosts the task machine.
    AddingLists(TaskState),
    /// Pass-through after the selection changed.
    AssessingTheList,
    /// Pass-through marking a confirmed list change.
    Success,
}

/// State of the task-level machine nested in [`WorkflowState::AddingLists`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Accepting new tasks and ticks.
    AddingTasks,
    /// Creating a task remotely.
    CreatingTheTask,
    /// Ticking a task remotely.
    TickingTheTask,
    /// Ticking a task remotely while the list is full.
    TickingTheTaskDuringChoosing,
    /// The list is full; every task must be carried, removed or ticked.
    ChoosingTasksToCarry,
    /// Removing a task remotely.
    RemovingTheTask,
    /// Carrying a task remotely.
    CarryingTheTask,
    /// Pass-through that rolls the page over once the cycle completes.
    AssessingTasks,
}

impl TaskState {
    /// Returns the canonical state name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddingTasks => "addingTasks",
            Self::CreatingTheTask => "creatingTheTask",
            Self::TickingTheTask => "tickingTheTask",
            Self::TickingTheTaskDuringChoosing => "tickingTheTaskDuringChoosing",
            Self::ChoosingTasksToCarry => "choosingTasksToCarry",
            Self::RemovingTheTask => "removingTheTask",
            Self::CarryingTheTask => "carryingTheTask",
            Self::AssessingTasks => "assessingTasks",
        }
    }

    /// Returns `true` while a remote call is outstanding.
    #[must_use]
    pub const fn is_invoking(self) -> bool {
        matches!(
            self,
            Self::CreatingTheTask
                | Self::TickingTheTask
                | Self::TickingTheTaskDuringChoosing
                | Self::RemovingTheTask
                | Self::CarryingTheTask
        )
    }
}

impl WorkflowState {
    /// Initial state of a fresh machine.
    pub const INITIAL: Self = Self::Loading;

    /// Entry state of the list container.
    pub const ADDING_TASKS: Self = Self::AddingLists(TaskState::AddingTasks);

    /// Returns the canonical name of the list-level state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Empty => "empty",
            Self::ReadyToAddLists => "readyToAddLists",
            Self::CreatingTheList => "creatingTheList",
            Self::UpdatingTheList => "updatingTheList",
            Self::DeletingTheList => "deletingTheList",
            Self::AddingLists(_) => "addingLists",
            Self::AssessingTheList => "assessingTheList",
            Self::Success => "success",
        }
    }

    /// Returns the nested task state, if the list container is active.
    #[must_use]
    pub const fn task_state(self) -> Option<TaskState> {
        match self {
            Self::AddingLists(inner) => Some(inner),
            _ => None,
        }
    }

    /// Returns `true` while a remote call is outstanding.
    #[must_use]
    pub const fn is_invoking(self) -> bool {
        match self {
            Self::Loading | Self::CreatingTheList | Self::UpdatingTheList | Self::DeletingTheList => {
                true
            }
            Self::AddingLists(inner) => inner.is_invoking(),
            _ => false,
        }
    }

    /// Returns `true` while the view should show a progress indicator.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        self.is_invoking()
    }

    /// Returns `true` when the view should offer creating the first list.
    #[must_use]
    pub const fn shows_create_list(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` once lists exist and tasks can be shown.
    #[must_use]
    pub const fn ready_to_add_tasks(self) -> bool {
        !matches!(self, Self::Empty | Self::ReadyToAddLists)
    }

    /// Returns `true` once the initial load finished with something to show.
    #[must_use]
    pub const fn not_empty_or_initially_loading(self) -> bool {
        !matches!(self, Self::Empty | Self::Loading)
    }

    /// Returns `true` when the view should offer adding a task.
    #[must_use]
    pub const fn shows_add_task(self) -> bool {
        matches!(
            self.task_state(),
            Some(TaskState::AddingTasks | TaskState::CreatingTheTask | TaskState::TickingTheTask)
        )
    }

    /// Returns `true` when the view should offer ticking tasks.
    #[must_use]
    pub const fn shows_tick_tasks(self) -> bool {
        self.shows_add_task() || self.is_carrying_or_removing()
    }

    /// Returns `true` during the carry cycle.
    #[must_use]
    pub const fn is_carrying_or_removing(self) -> bool {
        matches!(
            self.task_state(),
            Some(
                TaskState::ChoosingTasksToCarry
                    | TaskState::CarryingTheTask
                    | TaskState::RemovingTheTask
                    | TaskState::AssessingTasks
                    | TaskState::TickingTheTaskDuringChoosing
            )
        )
    }

    /// Returns `true` while a list rename is outstanding.
    #[must_use]
    pub const fn is_renaming_list(self) -> bool {
        matches!(self, Self::UpdatingTheList)
    }

    /// Returns `true` while a list deletion is outstanding.
    #[must_use]
    pub const fn is_deleting_list(self) -> bool {
        matches!(self, Self::DeletingTheList)
    }
}

/// Renders the full state path, e.g. `addingLists.choosingTasksToCarry`.
impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddingLists(inner) => write!(f, "{}.{}", self.as_str(), inner.as_str()),
            _ => f.write_str(self.as_str()),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WorkflowState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
