//! Machine-owned aggregate: the list collection and the current selection.

use super::{Task, TaskId, TasksList, TasksListId};
use serde::{Deserialize, Serialize};

/// Selected list identifier plus the full collection of lists.
///
/// Only the workflow machine produces new contexts. Every update consumes
/// the current value and returns a fresh one, so snapshots already handed
/// to the view layer stay as they were.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected_id: Option<TasksListId>,
    #[serde(default)]
    tasks_lists: Vec<TasksList>,
}

impl WorkflowContext {
    /// Creates a context holding `lists`, with the first one selected.
    #[must_use]
    pub fn new(lists: Vec<TasksList>) -> Self {
        Self::default().with_lists(lists)
    }

    /// Returns the selected list identifier, if any.
    #[must_use]
    pub const fn selected_id(&self) -> Option<&TasksListId> {
        self.selected_id.as_ref()
    }

    /// Returns every list in collection order.
    #[must_use]
    pub fn tasks_lists(&self) -> &[TasksList] {
        &self.tasks_lists
    }

    /// Returns `true` when at least one list exists.
    #[must_use]
    pub fn has_lists(&self) -> bool {
        !self.tasks_lists.is_empty()
    }

    /// Finds a list by identifier.
    #[must_use]
    pub fn list(&self, id: &TasksListId) -> Option<&TasksList> {
        self.tasks_lists.iter().find(|list| list.id() == id)
    }

    /// Returns the selected list, if any.
    #[must_use]
    pub fn selected_list(&self) -> Option<&TasksList> {
        self.selected_id.as_ref().and_then(|id| self.list(id))
    }

    /// Returns the tasks of the selected list, or nothing.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.selected_list().map(TasksList::tasks).unwrap_or_default()
    }

    /// Finds a task of the selected list.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.selected_list().and_then(|list| list.task(task_id))
    }

    /// Returns the selected list name, or an empty string.
    #[must_use]
    pub fn name(&self) -> &str {
        self.selected_list().map_or("", TasksList::name)
    }

    /// Returns the owner identity of the selected list.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.selected_list().and_then(TasksList::owner)
    }

    /// Returns the sharer identities of the selected list.
    #[must_use]
    pub fn sharers(&self) -> &[String] {
        self.selected_list().map(TasksList::sharers).unwrap_or_default()
    }

    /// Returns `true` when `identity` owns the selected list.
    #[must_use]
    pub fn is_owner(&self, identity: &str) -> bool {
        self.owner() == Some(identity)
    }

    /// Returns `true` when the selected list is shared with `identity`.
    ///
    /// Comparison ignores ASCII case.
    #[must_use]
    pub fn sharer_exists(&self, identity: &str) -> bool {
        self.sharers()
            .iter()
            .any(|sharer| sharer.eq_ignore_ascii_case(identity))
    }

    /// Returns `true` when the selected list holds `limit` tasks.
    #[must_use]
    pub fn tasks_are_full(&self, limit: usize) -> bool {
        self.selected_list().is_some_and(|list| list.is_full(limit))
    }

    /// Returns `true` when every task of the selected list was decided.
    ///
    /// With no selected list there is nothing to decide and the result is
    /// `false`.
    #[must_use]
    pub fn tasks_have_been_carried(&self) -> bool {
        self.selected_list().is_some_and(TasksList::all_carried)
    }

    /// Replaces the collection and selects its first list.
    #[must_use]
    pub fn with_lists(mut self, lists: Vec<TasksList>) -> Self {
        self.selected_id = lists.first().map(|list| list.id().clone());
        self.tasks_lists = lists;
        self
    }

    /// Selects the list with `id` when it exists.
    #[must_use]
    pub fn with_selected(mut self, id: &TasksListId) -> Self {
        if self.list(id).is_some() {
            self.selected_id = Some(id.clone());
        }
        self
    }

    /// Appends a list and selects it.
    #[must_use]
    pub fn with_list_created(mut self, list: TasksList) -> Self {
        self.selected_id = Some(list.id().clone());
        self.tasks_lists.push(list);
        self
    }

    /// Renames the matching list in place.
    #[must_use]
    pub fn with_list_renamed(self, id: &TasksListId, name: &str) -> Self {
        self.with_list_updated(id, |list| list.renamed(name))
    }

    /// Removes the matching list and selects the first remaining one.
    #[must_use]
    pub fn without_list(mut self, id: &TasksListId) -> Self {
        self.tasks_lists.retain(|list| list.id() != id);
        self.selected_id = self.tasks_lists.first().map(|list| list.id().clone());
        self
    }

    /// Replaces the matching list with the result of `update`.
    ///
    /// A missing list leaves the context unchanged.
    #[must_use]
    pub fn with_list_updated(
        mut self,
        id: &TasksListId,
        update: impl FnOnce(TasksList) -> TasksList,
    ) -> Self {
        let mut update = Some(update);
        self.tasks_lists = self
            .tasks_lists
            .into_iter()
            .map(|list| {
                if list.id() == id
                    && let Some(apply) = update.take()
                {
                    return apply(list);
                }
                list
            })
            .collect();
        self
    }

    /// Replaces the matching task of the matching list.
    #[must_use]
    pub fn with_task_updated(
        self,
        list_id: &TasksListId,
        task_id: &TaskId,
        update: impl FnOnce(Task) -> Task,
    ) -> Self {
        self.with_list_updated(list_id, |list| list.with_task_updated(task_id, update))
    }

    /// Rolls the selected list over when it is ready for a new page.
    #[must_use]
    pub fn with_selected_assessed(self, limit: usize) -> Self {
        let Some(id) = self.selected_id.clone() else {
            return self;
        };
        self.with_list_updated(&id, |list| list.assessed(limit))
    }
}
