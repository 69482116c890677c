//! Task limit configuration read from the environment.

use crate::test_helpers::EnvVarGuard;
use carryover::workflow::domain::{
    DEFAULT_TASK_LIMIT, TASK_LIMIT_ENV, WorkflowConfig, WorkflowConfigError,
};
use rstest::rstest;

#[rstest]
fn unset_task_limit_uses_the_default() {
    let _guard = EnvVarGuard::set(TASK_LIMIT_ENV, None);

    let config = WorkflowConfig::from_env().expect("default config");

    assert_eq!(config.task_limit, DEFAULT_TASK_LIMIT);
}

#[rstest]
fn task_limit_can_be_overridden() {
    let _guard = EnvVarGuard::set(TASK_LIMIT_ENV, Some("10"));

    let config = WorkflowConfig::from_env().expect("override applies");

    assert_eq!(config, WorkflowConfig::with_task_limit(10));
}

#[rstest]
fn malformed_task_limit_is_rejected() {
    let _guard = EnvVarGuard::set(TASK_LIMIT_ENV, Some("-4"));

    let result = WorkflowConfig::from_env();

    assert_eq!(
        result,
        Err(WorkflowConfigError::InvalidTaskLimit("-4".to_owned()))
    );
}
