//! Domain model for tasks lists and the carry-forward cycle.
//!
//! The domain holds the list and task records, the eligibility rules for
//! ticking, carrying and removing tasks, and the page rollover. It knows
//! nothing about the state machine or the persistence API.

mod config;
mod context;
mod error;
mod ids;
mod task;
mod tasks_list;

pub use config::{DEFAULT_TASK_LIMIT, TASK_LIMIT_ENV, WorkflowConfig};
pub use context::WorkflowContext;
pub use error::{WorkflowConfigError, WorkflowDomainError};
pub use ids::{TaskId, TasksListId};
pub use task::{FINAL_PAGE, LAST_CARRYABLE_PAGE, PersistedTaskData, Task};
pub use tasks_list::TasksList;
