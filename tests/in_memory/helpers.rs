//! Shared test helpers for in-memory workflow integration tests.

use std::sync::Arc;

use carryover::workflow::{
    adapters::memory::InMemoryTasksApi,
    domain::{Task, TaskId, TasksList, TasksListId, WorkflowConfig},
    machine::{WorkflowEvent, WorkflowSnapshot},
    services::{WorkflowHandle, WorkflowRuntime},
};
use eyre::WrapErr;
use rstest::fixture;

/// Task limit used by the integration tests.
pub const TEST_TASK_LIMIT: usize = 3;

/// Provides a configuration with a small task limit.
#[fixture]
pub fn config() -> WorkflowConfig {
    WorkflowConfig::with_task_limit(TEST_TASK_LIMIT)
}

/// Provides an empty in-memory tasks API.
#[fixture]
pub fn api(config: WorkflowConfig) -> InMemoryTasksApi {
    InMemoryTasksApi::new(config)
}

/// Builds a list holding `count` fresh tasks named `t0`, `t1`, ...
pub fn list_with_tasks(id: &str, name: &str, count: usize) -> TasksList {
    TasksList::new(TasksListId::new(id), name).with_tasks(
        (0..count).map(|index| Task::new(TaskId::new(format!("t{index}")), format!("task {index}"))),
    )
}

/// Starts a runtime over `api` and waits for the initial load.
///
/// # Errors
///
/// Returns an error if the runtime stops before settling.
pub async fn start(
    api: &InMemoryTasksApi,
    config: WorkflowConfig,
) -> eyre::Result<(WorkflowHandle, WorkflowSnapshot)> {
    let handle = WorkflowRuntime::spawn(Arc::new(api.clone()), config);
    let snapshot = handle.settled().await.wrap_err("initial load")?;
    Ok((handle, snapshot))
}

/// Dispatches `event` and waits for any resulting call to resolve.
///
/// # Errors
///
/// Returns an error if the runtime has stopped.
pub async fn send(handle: &WorkflowHandle, event: WorkflowEvent) -> eyre::Result<WorkflowSnapshot> {
    let name = event.name();
    handle
        .dispatch(event)
        .await
        .wrap_err_with(|| format!("dispatch {name}"))?;
    handle
        .settled()
        .await
        .wrap_err_with(|| format!("settle after {name}"))
}
