//! Adapter implementations for the task workflow ports.

pub mod memory;

pub use memory::InMemoryTasksApi;
