//! Application services hosting the workflow machine.

mod runtime;

pub use runtime::{WorkflowHandle, WorkflowRuntime, WorkflowRuntimeError, perform};
