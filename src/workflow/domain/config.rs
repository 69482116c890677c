//! Workflow configuration.

use super::WorkflowConfigError;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the task limit.
pub const TASK_LIMIT_ENV: &str = "TASK_LIMIT";

/// Number of tasks a list holds before the carry cycle is forced.
pub const DEFAULT_TASK_LIMIT: usize = 22;

/// Tunables for the task workflow.
///
/// # Examples
///
/// ```
/// use carryover::workflow::domain::WorkflowConfig;
///
/// let config = WorkflowConfig::default();
/// assert_eq!(config.task_limit, 22);
///
/// let small = WorkflowConfig::with_task_limit(3);
/// assert_eq!(small.task_limit, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkflowConfig {
    /// Maximum number of tasks a list holds before tasks must be carried,
    /// removed or ticked.
    pub task_limit: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            task_limit: DEFAULT_TASK_LIMIT,
        }
    }
}

impl WorkflowConfig {
    /// Creates a configuration with a custom task limit.
    #[must_use]
    pub const fn with_task_limit(task_limit: usize) -> Self {
        Self { task_limit }
    }

    /// Loads configuration from the process environment.
    ///
    /// `TASK_LIMIT` overrides the default limit when set.
    ///
    /// The limit should not drop below the length of a list already stored.
    /// Such a list counts as full, but its page only rolls over when exactly
    /// `task_limit` tasks are resolved, so it stays in `choosingTasksToCarry`
    /// once every task has been decided.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowConfigError::InvalidTaskLimit`] when `TASK_LIMIT` is
    /// not a positive integer.
    pub fn from_env() -> Result<Self, WorkflowConfigError> {
        Self::from_task_limit_value(std::env::var(TASK_LIMIT_ENV).ok().as_deref())
    }

    /// Builds configuration from an optional raw task limit value.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowConfigError::InvalidTaskLimit`] when the value is
    /// present but not a positive integer.
    pub fn from_task_limit_value(raw: Option<&str>) -> Result<Self, WorkflowConfigError> {
        let Some(value) = raw else {
            return Ok(Self::default());
        };
        match value.trim().parse::<usize>() {
            Ok(limit) if limit > 0 => Ok(Self::with_task_limit(limit)),
            _ => Err(WorkflowConfigError::InvalidTaskLimit(value.to_owned())),
        }
    }
}
