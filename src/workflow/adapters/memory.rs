//! In-memory tasks API for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use tracing::debug;

use crate::workflow::{
    domain::{Task, TaskId, TasksList, TasksListId, WorkflowConfig, WorkflowDomainError},
    ports::{
        CreatedTask, DeletedList, ListSummary, TaskAck, TasksApi, TasksApiCall, TasksApiError,
        TasksApiResult,
    },
};

/// Thread-safe in-memory tasks API enforcing the server-side carry rules.
///
/// Clones share the same storage, so a test can keep one clone for seeding
/// and inspection while the runtime uses another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTasksApi {
    config: WorkflowConfig,
    state: Arc<RwLock<InMemoryTasksState>>,
}

#[derive(Debug, Default)]
struct InMemoryTasksState {
    lists: Vec<TasksList>,
    failures: HashMap<TasksApiCall, String>,
    unavailable: Option<String>,
}

impl InMemoryTasksState {
    /// Consumes an injected failure for `call`, if one is armed.
    fn check(&mut self, call: TasksApiCall) -> TasksApiResult<()> {
        if let Some(reason) = &self.unavailable {
            return Err(TasksApiError::Unavailable(reason.clone()));
        }
        if let Some(message) = self.failures.remove(&call) {
            debug!(%call, "injected failure");
            return Err(TasksApiError::Rejected(message));
        }
        Ok(())
    }

    fn list(&self, id: &TasksListId) -> TasksApiResult<&TasksList> {
        self.lists
            .iter()
            .find(|list| list.id() == id)
            .ok_or_else(|| WorkflowDomainError::ListNotFound(id.clone()).into())
    }

    fn update_list(
        &mut self,
        id: &TasksListId,
        update: impl FnOnce(TasksList) -> TasksList,
    ) -> TasksApiResult<()> {
        let slot = self
            .lists
            .iter_mut()
            .find(|list| list.id() == id)
            .ok_or_else(|| TasksApiError::from(WorkflowDomainError::ListNotFound(id.clone())))?;
        *slot = update(slot.clone());
        Ok(())
    }
}

impl InMemoryTasksApi {
    /// Creates an empty store using `config` for the task limit.
    #[must_use]
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            state: Arc::default(),
        }
    }

    /// Seeds the store with `lists`.
    #[must_use]
    pub fn with_lists(self, lists: impl IntoIterator<Item = TasksList>) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.lists.extend(lists);
        }
        self
    }

    /// Returns a copy of every stored list.
    ///
    /// # Errors
    ///
    /// Returns [`TasksApiError::Persistence`] when the lock is poisoned.
    pub fn lists(&self) -> TasksApiResult<Vec<TasksList>> {
        let state = self.state.read().map_err(|err| {
            TasksApiError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.lists.clone())
    }

    /// Makes the next `call` fail with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`TasksApiError::Persistence`] when the lock is poisoned.
    pub fn fail_next(&self, call: TasksApiCall, message: impl Into<String>) -> TasksApiResult<()> {
        self.write()?.failures.insert(call, message.into());
        Ok(())
    }

    /// Makes every call fail as unreachable until cleared with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TasksApiError::Persistence`] when the lock is poisoned.
    pub fn set_unavailable(&self, reason: Option<String>) -> TasksApiResult<()> {
        self.write()?.unavailable = reason;
        Ok(())
    }

    fn write(&self) -> TasksApiResult<RwLockWriteGuard<'_, InMemoryTasksState>> {
        self.state.write().map_err(|err| {
            TasksApiError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn require_name(name: &str) -> TasksApiResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(WorkflowDomainError::EmptyListName.into());
    }
    Ok(trimmed.to_owned())
}

#[async_trait]
impl TasksApi for InMemoryTasksApi {
    async fn list_all(&self) -> TasksApiResult<Vec<TasksList>> {
        let mut state = self.write()?;
        state.check(TasksApiCall::ListAll)?;
        Ok(state.lists.clone())
    }

    async fn create_list(&self, name: &str) -> TasksApiResult<ListSummary> {
        let mut state = self.write()?;
        state.check(TasksApiCall::CreateList)?;
        let list_name = require_name(name)?;
        let id = TasksListId::generate();
        state
            .lists
            .push(TasksList::new(id.clone(), list_name.clone()));
        Ok(ListSummary {
            id,
            name: list_name,
        })
    }

    async fn rename_list(&self, id: &TasksListId, name: &str) -> TasksApiResult<ListSummary> {
        let mut state = self.write()?;
        state.check(TasksApiCall::RenameList)?;
        let list_name = require_name(name)?;
        state.update_list(id, |list| list.renamed(list_name.clone()))?;
        Ok(ListSummary {
            id: id.clone(),
            name: list_name,
        })
    }

    async fn delete_list(&self, id: &TasksListId) -> TasksApiResult<DeletedList> {
        let mut state = self.write()?;
        state.check(TasksApiCall::DeleteList)?;
        state.list(id)?;
        state.lists.retain(|list| list.id() != id);
        Ok(DeletedList { id: id.clone() })
    }

    async fn create_task(
        &self,
        list_id: &TasksListId,
        content: &str,
    ) -> TasksApiResult<CreatedTask> {
        let mut state = self.write()?;
        state.check(TasksApiCall::CreateTask)?;
        state.list(list_id)?.ensure_can_add(self.config.task_limit)?;
        let id = TaskId::generate();
        let task = Task::new(id.clone(), content);
        state.update_list(list_id, |list| list.with_task(task))?;
        Ok(CreatedTask {
            id,
            content: content.to_owned(),
        })
    }

    async fn tick_task(&self, list_id: &TasksListId, task_id: &TaskId) -> TasksApiResult<TaskAck> {
        let limit = self.config.task_limit;
        let mut state = self.write()?;
        state.check(TasksApiCall::TickTask)?;
        state.list(list_id)?.ensure_can_tick(task_id)?;
        state.update_list(list_id, |list| {
            list.with_task_updated(task_id, Task::tick).assessed(limit)
        })?;
        Ok(TaskAck {
            task_id: task_id.clone(),
        })
    }

    async fn carry_task(&self, list_id: &TasksListId, task_id: &TaskId) -> TasksApiResult<TaskAck> {
        let limit = self.config.task_limit;
        let mut state = self.write()?;
        state.check(TasksApiCall::CarryTask)?;
        state.list(list_id)?.ensure_can_carry(task_id, limit)?;
        state.update_list(list_id, |list| {
            list.with_task_updated(task_id, Task::carry).assessed(limit)
        })?;
        Ok(TaskAck {
            task_id: task_id.clone(),
        })
    }

    async fn remove_task(
        &self,
        list_id: &TasksListId,
        task_id: &TaskId,
    ) -> TasksApiResult<TaskAck> {
        let limit = self.config.task_limit;
        let mut state = self.write()?;
        state.check(TasksApiCall::RemoveTask)?;
        state.list(list_id)?.ensure_can_remove(task_id, limit)?;
        state.update_list(list_id, |list| {
            list.with_task_updated(task_id, Task::remove).assessed(limit)
        })?;
        Ok(TaskAck {
            task_id: task_id.clone(),
        })
    }
}
