//! Shared world state for carry-forward cycle BDD scenarios.

use std::sync::Arc;

use carryover::workflow::{
    adapters::memory::InMemoryTasksApi,
    domain::{TaskId, WorkflowConfig},
    machine::{WorkflowEvent, WorkflowNotification, WorkflowSnapshot},
    services::{WorkflowHandle, WorkflowRuntime},
};
use eyre::WrapErr;
use rstest::fixture;
use tokio::sync::broadcast;

/// Scenario world for carry cycle behaviour tests.
#[derive(Default)]
pub struct CarryCycleWorld {
    pub store: Option<InMemoryTasksApi>,
    pub handle: Option<WorkflowHandle>,
    pub errors: Option<broadcast::Receiver<WorkflowNotification>>,
    pub last_snapshot: Option<WorkflowSnapshot>,
}

impl CarryCycleWorld {
    /// Starts a runtime over `store` and waits for the initial load.
    pub fn start(
        &mut self,
        store: InMemoryTasksApi,
        config: WorkflowConfig,
    ) -> Result<(), eyre::Report> {
        let handle = run_async(async {
            let handle = WorkflowRuntime::spawn(Arc::new(store.clone()), config);
            handle.settled().await.map(|snapshot| (handle, snapshot))
        });
        let (handle, snapshot) = handle.wrap_err("start workflow runtime")?;
        self.errors = Some(handle.subscribe_errors());
        self.handle = Some(handle);
        self.store = Some(store);
        self.last_snapshot = Some(snapshot);
        Ok(())
    }

    /// Returns the running handle.
    pub fn handle(&self) -> Result<&WorkflowHandle, eyre::Report> {
        self.handle
            .as_ref()
            .ok_or_else(|| eyre::eyre!("workflow runtime not started in scenario world"))
    }

    /// Returns the latest settled snapshot.
    pub fn snapshot(&self) -> Result<&WorkflowSnapshot, eyre::Report> {
        self.last_snapshot
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no snapshot recorded in scenario world"))
    }

    /// Returns the in-memory store.
    pub fn store(&self) -> Result<&InMemoryTasksApi, eyre::Report> {
        self.store
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no store in scenario world"))
    }

    /// Dispatches `event` and records the settled snapshot.
    pub fn send(&mut self, event: WorkflowEvent) -> Result<(), eyre::Report> {
        let name = event.name();
        let handle = self.handle()?.clone();
        let snapshot = run_async(async move {
            handle.dispatch(event).await?;
            handle.settled().await
        })
        .wrap_err_with(|| format!("dispatch {name}"))?;
        self.last_snapshot = Some(snapshot);
        Ok(())
    }

    /// Returns the identifiers of the tasks on the selected list.
    pub fn task_ids(&self) -> Result<Vec<TaskId>, eyre::Report> {
        Ok(self
            .snapshot()?
            .context
            .tasks()
            .iter()
            .map(|task| task.id().clone())
            .collect())
    }

    /// Carries every task currently on the selected list.
    pub fn carry_every_task(&mut self) -> Result<(), eyre::Report> {
        for id in self.task_ids()? {
            self.send(WorkflowEvent::Carry { id })?;
        }
        Ok(())
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CarryCycleWorld {
    CarryCycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
