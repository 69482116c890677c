//! Server-side rule tests for the in-memory tasks API.

use super::helpers::{TEST_TASK_LIMIT, api, list_with_tasks};
use carryover::workflow::{
    adapters::memory::InMemoryTasksApi,
    domain::{TaskId, TasksListId},
    ports::{TasksApi, TasksApiCall, TasksApiError},
};
use rstest::rstest;

fn message(result: Result<impl std::fmt::Debug, TasksApiError>) -> String {
    match result {
        Ok(value) => format!("unexpected success: {value:?}"),
        Err(err) => err.message(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_lists_get_fresh_ids(api: InMemoryTasksApi) {
    let first = api.create_list("Home").await.expect("create succeeds");
    let second = api.create_list("Work").await.expect("create succeeds");

    assert_ne!(first.id, second.id);
    let stored = api.lists().expect("store readable");
    assert_eq!(stored.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_list_rejects_blank_names(api: InMemoryTasksApi) {
    let result = api.create_list("   ").await;

    assert_eq!(message(result), "Tasks list name must not be empty");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_fails_once_the_list_is_full(api: InMemoryTasksApi) {
    let store = api.with_lists([list_with_tasks("L", "Home", TEST_TASK_LIMIT)]);

    let result = store.create_task(&TasksListId::new("L"), "One more").await;

    assert_eq!(
        message(result),
        "Tasks list holds 3 tasks. Each task must be carried, removed or ticked"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tick_fails_for_unknown_tasks(api: InMemoryTasksApi) {
    let store = api.with_lists([list_with_tasks("L", "Home", 1)]);

    let result = store
        .tick_task(&TasksListId::new("L"), &TaskId::new("ghost"))
        .await;

    assert_eq!(message(result), "Task not found");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn carry_and_remove_wait_for_a_full_list(api: InMemoryTasksApi) {
    let store = api.with_lists([list_with_tasks("L", "Home", 1)]);
    let list_id = TasksListId::new("L");
    let task_id = TaskId::new("t0");

    assert_eq!(
        message(store.carry_task(&list_id, &task_id).await),
        "Tasks list is not yet full"
    );
    assert_eq!(
        message(store.remove_task(&list_id, &task_id).await),
        "Tasks list is not yet full"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ticked_tasks_cannot_be_carried_or_removed(api: InMemoryTasksApi) {
    let store = api.with_lists([list_with_tasks("L", "Home", TEST_TASK_LIMIT)]);
    let list_id = TasksListId::new("L");
    let task_id = TaskId::new("t0");
    store
        .tick_task(&list_id, &task_id)
        .await
        .expect("tick succeeds");

    assert_eq!(
        message(store.carry_task(&list_id, &task_id).await),
        "Ticked tasks cannot be carried"
    );
    assert_eq!(
        message(store.remove_task(&list_id, &task_id).await),
        "Ticked tasks cannot be marked for removal"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn carried_tasks_cannot_be_ticked_until_the_page_rolls_over(api: InMemoryTasksApi) {
    let store = api.with_lists([list_with_tasks("L", "Home", TEST_TASK_LIMIT)]);
    let list_id = TasksListId::new("L");
    let task_id = TaskId::new("t0");
    store
        .carry_task(&list_id, &task_id)
        .await
        .expect("carry succeeds");

    assert_eq!(
        message(store.tick_task(&list_id, &task_id).await),
        "Task has already been decided in this cycle"
    );
    let lists = store.lists().expect("store readable");
    let task = lists
        .first()
        .and_then(|list| list.task(&task_id))
        .expect("task stored");
    assert!(task.is_carried());
    assert!(!task.is_ticked());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn carrying_every_task_rolls_the_page_over(api: InMemoryTasksApi) {
    let store = api.with_lists([list_with_tasks("L", "Home", TEST_TASK_LIMIT)]);
    let list_id = TasksListId::new("L");

    for index in 0..TEST_TASK_LIMIT {
        store
            .carry_task(&list_id, &TaskId::new(format!("t{index}")))
            .await
            .expect("carry succeeds");
    }

    let lists = store.lists().expect("store readable");
    let list = lists.first().expect("list stored");
    assert_eq!(list.tasks().len(), TEST_TASK_LIMIT);
    assert!(
        list.tasks()
            .iter()
            .all(|task| task.page() == 1 && !task.is_carried())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_task_carried_twice_must_be_removed(api: InMemoryTasksApi) {
    let store = api.with_lists([list_with_tasks("L", "Home", TEST_TASK_LIMIT)]);
    let list_id = TasksListId::new("L");
    for _ in 0..2 {
        for index in 0..TEST_TASK_LIMIT {
            store
                .carry_task(&list_id, &TaskId::new(format!("t{index}")))
                .await
                .expect("carry succeeds");
        }
    }

    let result = store.carry_task(&list_id, &TaskId::new("t0")).await;

    assert_eq!(
        message(result),
        "Task has been carried twice and must be removed"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_lists_are_reported(api: InMemoryTasksApi) {
    let result = api.delete_list(&TasksListId::new("nowhere")).await;

    assert!(matches!(
        result,
        Err(TasksApiError::NotFound { what: "tasks list", .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn injected_failures_fire_once(api: InMemoryTasksApi) {
    api.fail_next(TasksApiCall::ListAll, "try again later")
        .expect("failure armed");

    assert_eq!(message(api.list_all().await), "try again later");
    assert!(api.list_all().await.is_ok());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unavailable_store_rejects_every_call(api: InMemoryTasksApi) {
    api.set_unavailable(Some("connection refused".to_owned()))
        .expect("outage set");

    assert!(matches!(
        api.create_list("Home").await,
        Err(TasksApiError::Unavailable(_))
    ));

    api.set_unavailable(None).expect("outage cleared");
    assert!(api.create_list("Home").await.is_ok());
}
