//! Tasks list aggregate, fullness bookkeeping and page rollover.

use super::{Task, TaskId, TasksListId, WorkflowDomainError};
use serde::{Deserialize, Serialize};

/// A named, user-owned ordered collection of tasks.
///
/// Tasks keep insertion order. A list is full once the tasks held on its
/// current page reach the task limit; ticked and removed tasks keep their
/// slot until the page rolls over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksList {
    id: TasksListId,
    name: String,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    #[serde(default)]
    shared_with: Vec<String>,
}

impl TasksList {
    /// Creates an empty list.
    #[must_use]
    pub fn new(id: TasksListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tasks: Vec::new(),
            owner: None,
            shared_with: Vec::new(),
        }
    }

    /// Sets the tasks held by the list.
    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks = tasks.into_iter().collect();
        self
    }

    /// Sets the owner identity.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the identities the list is shared with.
    #[must_use]
    pub fn with_sharers(mut self, sharers: impl IntoIterator<Item = String>) -> Self {
        self.shared_with = sharers.into_iter().collect();
        self
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> &TasksListId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tasks in creation order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the owner identity, if known.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Returns the identities the list is shared with.
    #[must_use]
    pub fn sharers(&self) -> &[String] {
        &self.shared_with
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Number of tasks that are neither ticked nor removed.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_active()).count()
    }

    /// Number of tasks that are ticked, removed or carried.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_resolved()).count()
    }

    /// Returns `true` once the list holds `limit` tasks on its current page.
    #[must_use]
    pub fn is_full(&self, limit: usize) -> bool {
        self.tasks.len() >= limit
    }

    /// Returns `true` when no task is left undecided in the current cycle.
    #[must_use]
    pub fn all_carried(&self) -> bool {
        self.tasks.iter().all(Task::is_resolved)
    }

    /// Returns `true` when exactly `limit` tasks were resolved this cycle.
    #[must_use]
    pub fn is_ready_for_new_page(&self, limit: usize) -> bool {
        self.resolved_count() == limit
    }

    /// Renames the list.
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Appends a task at the end of the list.
    #[must_use]
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Replaces the matching task with the result of `update`.
    ///
    /// A missing task leaves the list unchanged.
    #[must_use]
    pub fn with_task_updated(
        mut self,
        task_id: &TaskId,
        update: impl FnOnce(Task) -> Task,
    ) -> Self {
        let mut update = Some(update);
        self.tasks = self
            .tasks
            .into_iter()
            .map(|task| {
                if task.id() == task_id
                    && let Some(apply) = update.take()
                {
                    return apply(task);
                }
                task
            })
            .collect();
        self
    }

    /// Starts a new page: drops resolved tasks and clears carry flags.
    #[must_use]
    pub fn rolled_over(mut self) -> Self {
        self.tasks = self
            .tasks
            .into_iter()
            .filter(Task::survives_rollover)
            .map(Task::clear_carry)
            .collect();
        self
    }

    /// Rolls the page over when the list is ready for a new page.
    #[must_use]
    pub fn assessed(self, limit: usize) -> Self {
        if self.is_ready_for_new_page(limit) {
            self.rolled_over()
        } else {
            self
        }
    }

    /// Checks that a new task may be added.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::ListFull`] when the list is full.
    pub fn ensure_can_add(&self, limit: usize) -> Result<(), WorkflowDomainError> {
        if self.is_full(limit) {
            return Err(WorkflowDomainError::ListFull { limit });
        }
        Ok(())
    }

    /// Checks that a task may be ticked.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::TaskNotFound`] for unknown tasks,
    /// [`WorkflowDomainError::AlreadyDecided`] for tasks carried in the
    /// current cycle and [`WorkflowDomainError::AlreadyResolved`] for ticked
    /// or removed tasks.
    pub fn ensure_can_tick(&self, task_id: &TaskId) -> Result<(), WorkflowDomainError> {
        let task = self.require_task(task_id)?;
        if task.is_carried() {
            return Err(WorkflowDomainError::AlreadyDecided(task_id.clone()));
        }
        if !task.can_tick() {
            return Err(WorkflowDomainError::AlreadyResolved(task_id.clone()));
        }
        Ok(())
    }

    /// Checks that a task may be carried.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::ListNotYetFull`] below the limit, and
    /// task-specific errors when the task is unknown, ticked, already
    /// decided or carried twice.
    pub fn ensure_can_carry(
        &self,
        task_id: &TaskId,
        limit: usize,
    ) -> Result<(), WorkflowDomainError> {
        if !self.is_full(limit) {
            return Err(WorkflowDomainError::ListNotYetFull);
        }
        let task = self.require_task(task_id)?;
        if task.is_ticked() {
            return Err(WorkflowDomainError::TickedTaskCannotBeCarried(
                task_id.clone(),
            ));
        }
        if task.is_carried() || task.is_removed() {
            return Err(WorkflowDomainError::AlreadyDecided(task_id.clone()));
        }
        if !task.can_carry() {
            return Err(WorkflowDomainError::CarriedTwice(task_id.clone()));
        }
        Ok(())
    }

    /// Checks that a task may be removed.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::ListNotYetFull`] below the limit, and
    /// task-specific errors when the task is unknown, ticked or already
    /// decided.
    pub fn ensure_can_remove(
        &self,
        task_id: &TaskId,
        limit: usize,
    ) -> Result<(), WorkflowDomainError> {
        if !self.is_full(limit) {
            return Err(WorkflowDomainError::ListNotYetFull);
        }
        let task = self.require_task(task_id)?;
        if task.is_ticked() {
            return Err(WorkflowDomainError::TickedTaskCannotBeRemoved(
                task_id.clone(),
            ));
        }
        if !task.can_remove() {
            return Err(WorkflowDomainError::AlreadyDecided(task_id.clone()));
        }
        Ok(())
    }

    fn require_task(&self, task_id: &TaskId) -> Result<&Task, WorkflowDomainError> {
        self.task(task_id)
            .ok_or_else(|| WorkflowDomainError::TaskNotFound(task_id.clone()))
    }
}
