//! Port contracts for the task workflow.
//!
//! Ports define infrastructure-agnostic interfaces used by the workflow
//! runtime.

pub mod tasks_api;

pub use tasks_api::{
    CreatedTask, DeletedList, ListSummary, TaskAck, TasksApi, TasksApiCall, TasksApiError,
    TasksApiResult,
};
