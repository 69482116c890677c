//! Transition table of the workflow machine.
//!
//! Each `(state, event)` pair maps to at most one [`Transition`]. Guards are
//! evaluated against the context before anything changes; a failing guard or
//! a missing entry leaves the machine untouched. Invoking states have no
//! entries, so only `reset` reaches them while a call is outstanding.

use super::{
    RemoteCall, RemoteReply, WorkflowEvent,
    state::{TaskState, WorkflowState},
};
use crate::workflow::domain::{
    Task, TaskId, TasksList, TasksListId, WorkflowConfig, WorkflowContext,
};

/// Condition checked before a transition is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Guard {
    ListExists(TasksListId),
    CanAddTask,
    CanTick(TaskId),
    CanCarry(TaskId),
    CanRemove(TaskId),
}

impl Guard {
    pub(super) fn holds(&self, context: &WorkflowContext, config: &WorkflowConfig) -> bool {
        match self {
            Self::ListExists(id) => context.list(id).is_some(),
            Self::CanAddTask => {
                context.selected_list().is_some() && !context.tasks_are_full(config.task_limit)
            }
            Self::CanTick(id) => context.task(id).is_some_and(Task::can_tick),
            Self::CanCarry(id) => context.task(id).is_some_and(Task::can_carry),
            Self::CanRemove(id) => context.task(id).is_some_and(Task::can_remove),
        }
    }

    pub(super) const fn name(&self) -> &'static str {
        match self {
            Self::ListExists(_) => "listExists",
            Self::CanAddTask => "canAddTask",
            Self::CanTick(_) => "canTick",
            Self::CanCarry(_) => "canCarry",
            Self::CanRemove(_) => "canRemove",
        }
    }
}

/// Effect applied when a transition is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Action {
    None,
    SelectList(TasksListId),
    Invoke(RemoteCall),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Transition {
    pub(super) guard: Option<Guard>,
    pub(super) action: Action,
    pub(super) target: WorkflowState,
}

impl Transition {
    const fn to(target: WorkflowState) -> Self {
        Self {
            guard: None,
            action: Action::None,
            target,
        }
    }

    const fn invoke(target: WorkflowState, call: RemoteCall) -> Self {
        Self {
            guard: None,
            action: Action::Invoke(call),
            target,
        }
    }

    fn guarded(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }
}

/// Looks up the transition for `event` in `state`.
///
/// `reset` is handled by the machine itself and never appears here.
pub(super) fn on_event(
    state: WorkflowState,
    event: &WorkflowEvent,
    context: &WorkflowContext,
) -> Option<Transition> {
    match state {
        WorkflowState::Empty => match event {
            WorkflowEvent::ReadyToAddFirstTaskList => {
                Some(Transition::to(WorkflowState::ReadyToAddLists))
            }
            _ => None,
        },
        WorkflowState::ReadyToAddLists => match event {
            WorkflowEvent::AddTasksList { name } => Some(create_list(name)),
            _ => None,
        },
        WorkflowState::AddingLists(inner) if !inner.is_invoking() => {
            on_list_event(event, context).or_else(|| on_task_event(inner, event, context))
        }
        _ => None,
    }
}

/// Handlers declared on the list container itself.
fn on_list_event(event: &WorkflowEvent, context: &WorkflowContext) -> Option<Transition> {
    match event {
        WorkflowEvent::AddTasksList { name } => Some(create_list(name)),
        WorkflowEvent::UpdateTasksList { id, name } => Some(
            Transition::invoke(
                WorkflowState::UpdatingTheList,
                RemoteCall::RenameList {
                    id: id.clone(),
                    name: name.clone(),
                },
            )
            .guarded(Guard::ListExists(id.clone())),
        ),
        WorkflowEvent::DeleteTasksList => {
            let id = context.selected_id()?.clone();
            Some(Transition::invoke(
                WorkflowState::DeletingTheList,
                RemoteCall::DeleteList { id },
            ))
        }
        WorkflowEvent::SelectTasksList { id } => Some(Transition {
            guard: Some(Guard::ListExists(id.clone())),
            action: Action::SelectList(id.clone()),
            target: WorkflowState::AssessingTheList,
        }),
        _ => None,
    }
}

/// Handlers of the nested task machine.
fn on_task_event(
    state: TaskState,
    event: &WorkflowEvent,
    context: &WorkflowContext,
) -> Option<Transition> {
    let list_id = context.selected_id()?.clone();
    let nested = WorkflowState::AddingLists;
    match (state, event) {
        (TaskState::AddingTasks, WorkflowEvent::Add { content }) => Some(
            Transition::invoke(
                nested(TaskState::CreatingTheTask),
                RemoteCall::CreateTask {
                    list_id,
                    content: content.clone(),
                },
            )
            .guarded(Guard::CanAddTask),
        ),
        (TaskState::AddingTasks, WorkflowEvent::Tick { id }) => Some(
            Transition::invoke(
                nested(TaskState::TickingTheTask),
                RemoteCall::TickTask {
                    list_id,
                    task_id: id.clone(),
                },
            )
            .guarded(Guard::CanTick(id.clone())),
        ),
        (TaskState::ChoosingTasksToCarry, WorkflowEvent::Tick { id }) => Some(
            Transition::invoke(
                nested(TaskState::TickingTheTaskDuringChoosing),
                RemoteCall::TickTask {
                    list_id,
                    task_id: id.clone(),
                },
            )
            .guarded(Guard::CanTick(id.clone())),
        ),
        (TaskState::ChoosingTasksToCarry, WorkflowEvent::Carry { id }) => Some(
            Transition::invoke(
                nested(TaskState::CarryingTheTask),
                RemoteCall::CarryTask {
                    list_id,
                    task_id: id.clone(),
                },
            )
            .guarded(Guard::CanCarry(id.clone())),
        ),
        (TaskState::ChoosingTasksToCarry, WorkflowEvent::Remove { id }) => Some(
            Transition::invoke(
                nested(TaskState::RemovingTheTask),
                RemoteCall::RemoveTask {
                    list_id,
                    task_id: id.clone(),
                },
            )
            .guarded(Guard::CanRemove(id.clone())),
        ),
        _ => None,
    }
}

fn create_list(name: &str) -> Transition {
    Transition::invoke(
        WorkflowState::CreatingTheList,
        RemoteCall::CreateList {
            name: name.to_owned(),
        },
    )
}

/// Eventless transition taken as soon as `state` is entered.
pub(super) fn always(
    state: WorkflowState,
    context: &WorkflowContext,
    config: &WorkflowConfig,
) -> Option<WorkflowState> {
    match state {
        WorkflowState::Empty if context.has_lists() => Some(WorkflowState::ADDING_TASKS),
        WorkflowState::AssessingTheList
        | WorkflowState::Success
        | WorkflowState::AddingLists(TaskState::AssessingTasks) => {
            Some(WorkflowState::ADDING_TASKS)
        }
        WorkflowState::AddingLists(TaskState::AddingTasks)
            if context.tasks_are_full(config.task_limit) =>
        {
            Some(WorkflowState::AddingLists(TaskState::ChoosingTasksToCarry))
        }
        WorkflowState::AddingLists(TaskState::ChoosingTasksToCarry)
            if context.tasks_have_been_carried() =>
        {
            Some(WorkflowState::ADDING_TASKS)
        }
        _ => None,
    }
}

/// Exit action of `state`.
pub(super) fn on_exit(
    state: WorkflowState,
    context: WorkflowContext,
    config: &WorkflowConfig,
) -> WorkflowContext {
    match state {
        WorkflowState::AddingLists(TaskState::AssessingTasks) => {
            context.with_selected_assessed(config.task_limit)
        }
        _ => context,
    }
}

/// Applies a confirmed reply to the context.
///
/// `reply` must answer `call`; the caller checks this beforehand.
pub(super) fn on_done(
    call: &RemoteCall,
    reply: RemoteReply,
    context: WorkflowContext,
) -> WorkflowContext {
    match (call, reply) {
        (RemoteCall::ListAll, RemoteReply::Lists(lists)) => context.with_lists(lists),
        (RemoteCall::CreateList { .. }, RemoteReply::ListCreated(summary)) => {
            context.with_list_created(TasksList::new(summary.id, summary.name))
        }
        (RemoteCall::RenameList { .. }, RemoteReply::ListRenamed(summary)) => {
            context.with_list_renamed(&summary.id, &summary.name)
        }
        (RemoteCall::DeleteList { .. }, RemoteReply::ListDeleted(deleted)) => {
            context.without_list(&deleted.id)
        }
        (RemoteCall::CreateTask { list_id, .. }, RemoteReply::TaskCreated(created)) => context
            .with_list_updated(list_id, |list| {
                list.with_task(Task::new(created.id, created.content))
            }),
        (RemoteCall::TickTask { list_id, .. }, RemoteReply::TaskTicked(ack)) => {
            context.with_task_updated(list_id, &ack.task_id, Task::tick)
        }
        (RemoteCall::CarryTask { list_id, .. }, RemoteReply::TaskCarried(ack)) => {
            context.with_task_updated(list_id, &ack.task_id, Task::carry)
        }
        (RemoteCall::RemoveTask { list_id, .. }, RemoteReply::TaskRemoved(ack)) => {
            context.with_task_updated(list_id, &ack.task_id, Task::remove)
        }
        _ => context,
    }
}

/// State entered once the call made in `state` succeeded.
pub(super) fn done_target(state: WorkflowState, context: &WorkflowContext) -> WorkflowState {
    match state {
        WorkflowState::Loading => WorkflowState::Empty,
        WorkflowState::UpdatingTheList => WorkflowState::Success,
        WorkflowState::DeletingTheList if !context.has_lists() => WorkflowState::Empty,
        WorkflowState::AddingLists(
            TaskState::TickingTheTaskDuringChoosing
            | TaskState::CarryingTheTask
            | TaskState::RemovingTheTask,
        ) => WorkflowState::AddingLists(TaskState::AssessingTasks),
        _ => WorkflowState::ADDING_TASKS,
    }
}

/// State entered once the call made in `state` failed.
pub(super) const fn error_target(state: WorkflowState) -> WorkflowState {
    match state {
        WorkflowState::Loading | WorkflowState::DeletingTheList => WorkflowState::Empty,
        _ => WorkflowState::ADDING_TASKS,
    }
}
