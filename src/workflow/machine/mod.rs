//! Hierarchical state machine driving the carry-forward cycle.
//!
//! The list-level machine hosts a nested task machine while lists exist.
//! [`WorkflowMachine`] interprets an explicit transition table: events and
//! call resolutions go in, new states, contexts and remote calls come out.
//! The machine never performs I/O itself.

mod event;
mod interpreter;
mod invocation;
mod snapshot;
mod state;
mod transitions;

pub use event::WorkflowEvent;
pub use interpreter::{Resolution, WorkflowMachine};
pub use invocation::{Invocation, InvocationToken, RemoteCall, RemoteReply};
pub use snapshot::{WorkflowNotification, WorkflowSnapshot};
pub use state::{TaskState, WorkflowState};
