//! Carry cycle flows through the runtime and the in-memory API.

use super::helpers::{TEST_TASK_LIMIT, api, config, list_with_tasks, send, start};
use carryover::workflow::{
    adapters::memory::InMemoryTasksApi,
    domain::{TaskId, WorkflowConfig},
    machine::{TaskState, WorkflowEvent, WorkflowSnapshot, WorkflowState},
    services::WorkflowHandle,
};
use rstest::rstest;

const CHOOSING: WorkflowState = WorkflowState::AddingLists(TaskState::ChoosingTasksToCarry);

fn task_ids(snapshot: &WorkflowSnapshot) -> Vec<TaskId> {
    snapshot
        .context
        .tasks()
        .iter()
        .map(|task| task.id().clone())
        .collect()
}

async fn carry_all(handle: &WorkflowHandle, ids: &[TaskId]) -> eyre::Result<WorkflowSnapshot> {
    let mut last = handle.snapshot();
    for id in ids {
        last = send(handle, WorkflowEvent::Carry { id: id.clone() }).await?;
    }
    Ok(last)
}

/// Asserts the runtime context and the store hold the same tasks.
fn assert_store_matches(store: &InMemoryTasksApi, snapshot: &WorkflowSnapshot) -> eyre::Result<()> {
    let stored = store.lists()?;
    let list = stored
        .first()
        .ok_or_else(|| eyre::eyre!("store holds no list"))?;
    eyre::ensure!(
        list.tasks() == snapshot.context.tasks(),
        "store and context diverged: {:?} vs {:?}",
        list.tasks(),
        snapshot.context.tasks()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filling_the_list_starts_the_carry_cycle(
    api: InMemoryTasksApi,
    config: WorkflowConfig,
) -> eyre::Result<()> {
    let store = api.with_lists([list_with_tasks("L", "Home", 0)]);
    let (handle, _) = start(&store, config).await?;

    let mut last = handle.snapshot();
    for index in 0..TEST_TASK_LIMIT {
        last = send(
            &handle,
            WorkflowEvent::Add {
                content: format!("Chore {index}"),
            },
        )
        .await?;
    }

    assert_eq!(last.state, CHOOSING);
    assert!(last.tasks_are_full());
    assert!(last.state.is_carrying_or_removing());
    assert_store_matches(&store, &last)?;

    let refused = send(
        &handle,
        WorkflowEvent::Add {
            content: "Overflow".to_owned(),
        },
    )
    .await?;
    assert_eq!(refused, last);
    assert_store_matches(&store, &refused)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn two_carries_then_removal_clears_the_page(
    api: InMemoryTasksApi,
    config: WorkflowConfig,
) -> eyre::Result<()> {
    let store = api.with_lists([list_with_tasks("L", "Home", TEST_TASK_LIMIT)]);
    let (handle, initial) = start(&store, config).await?;
    assert_eq!(initial.state, CHOOSING);
    let ids = task_ids(&initial);

    let first = carry_all(&handle, &ids).await?;
    assert_eq!(first.state, CHOOSING);
    assert!(first.context.tasks().iter().all(|task| task.page() == 1));
    assert_store_matches(&store, &first)?;

    let second = carry_all(&handle, &ids).await?;
    assert_eq!(second.state, CHOOSING);
    assert!(second.context.tasks().iter().all(|task| task.page() == 2));
    assert_store_matches(&store, &second)?;

    let third_id = ids.first().cloned().ok_or_else(|| eyre::eyre!("no tasks"))?;
    let refused = send(&handle, WorkflowEvent::Carry { id: third_id }).await?;
    assert_eq!(refused, second);

    let mut last = refused;
    for id in &ids {
        last = send(&handle, WorkflowEvent::Remove { id: id.clone() }).await?;
    }

    assert_eq!(last.state, WorkflowState::ADDING_TASKS);
    assert!(last.context.tasks().is_empty());
    assert_store_matches(&store, &last)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ticks_count_towards_the_next_page(
    api: InMemoryTasksApi,
    config: WorkflowConfig,
) -> eyre::Result<()> {
    let store = api.with_lists([list_with_tasks("L", "Home", TEST_TASK_LIMIT)]);
    let (handle, _) = start(&store, config).await?;

    send(&handle, WorkflowEvent::Tick { id: TaskId::new("t0") }).await?;
    send(&handle, WorkflowEvent::Carry { id: TaskId::new("t1") }).await?;
    let rolled = send(&handle, WorkflowEvent::Remove { id: TaskId::new("t2") }).await?;

    assert_eq!(rolled.state, WorkflowState::ADDING_TASKS);
    assert_eq!(task_ids(&rolled), vec![TaskId::new("t1")]);
    assert!(rolled.state.shows_add_task());
    assert_store_matches(&store, &rolled)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn carried_task_cannot_be_removed(
    api: InMemoryTasksApi,
    config: WorkflowConfig,
) -> eyre::Result<()> {
    let store = api.with_lists([list_with_tasks("L", "Home", TEST_TASK_LIMIT)]);
    let (handle, _) = start(&store, config).await?;
    let carried = send(&handle, WorkflowEvent::Carry { id: TaskId::new("t0") }).await?;

    let refused = send(&handle, WorkflowEvent::Remove { id: TaskId::new("t0") }).await?;

    assert_eq!(refused, carried);
    let task = refused
        .context
        .task(&TaskId::new("t0"))
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    assert!(task.is_carried() && !task.is_removed());
    Ok(())
}
