//! Unit tests for the task workflow.
