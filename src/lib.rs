//! Carryover: bounded tasks lists with a carry-forward cycle.
//!
//! A tasks list holds a fixed number of tasks per page. When the page is
//! full, every task must be ticked, removed or carried onto the next page
//! before new tasks fit, and a task can only be carried twice. The workflow
//! is driven by a hierarchical state machine that talks to a remote
//! persistence API.
//!
//! # Architecture
//!
//! Carryover follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//! - **Machine**: The synchronous transition table and its interpreter
//! - **Services**: The async runtime performing remote calls for the machine
//!
//! # Modules
//!
//! - [`workflow`]: Tasks lists, the carry rules and the workflow machine

pub mod workflow;
