//! Task workflow: tasks lists, the carry-forward cycle and its machine.
//!
//! A tasks list holds a bounded page of tasks. Once the page is full every
//! task has to be ticked, removed or carried before new tasks fit; a task can
//! be carried at most twice. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The hierarchical state machine in [`machine`]
//! - The async runtime hosting the machine in [`services`]

pub mod adapters;
pub mod domain;
pub mod machine;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
