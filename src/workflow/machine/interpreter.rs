//! Interpreter running events and call resolutions through the table.

use super::{
    Invocation, InvocationToken, RemoteCall, RemoteReply, WorkflowEvent, WorkflowNotification,
    WorkflowSnapshot, WorkflowState,
    transitions::{self, Action},
};
use crate::workflow::{
    domain::{WorkflowConfig, WorkflowContext},
    ports::TasksApiError,
};
use tracing::{debug, info, warn};

/// Outcome of handing a call resolution to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The call succeeded and its result was applied.
    Confirmed,
    /// The call failed; the context is unchanged.
    Failed(WorkflowNotification),
    /// The machine had left the invoking state; the result was dropped.
    Discarded,
}

/// Hierarchical task workflow machine.
///
/// The machine is synchronous: [`WorkflowMachine::send`] runs one event to
/// completion, including eventless transitions, and hands back the remote
/// call to start when an invoking state was entered. The caller performs
/// the call and reports back through [`WorkflowMachine::resolve`]. At most
/// one call is outstanding at a time.
///
/// # Examples
///
/// ```
/// use carryover::workflow::domain::WorkflowConfig;
/// use carryover::workflow::machine::{RemoteReply, Resolution, WorkflowMachine};
///
/// let mut machine = WorkflowMachine::new(WorkflowConfig::default());
/// let loading = machine.pending().cloned().expect("loading starts a call");
///
/// let resolution = machine.resolve(loading.token, Ok(RemoteReply::Lists(Vec::new())));
/// assert_eq!(resolution, Resolution::Confirmed);
/// assert_eq!(machine.state().to_string(), "empty");
/// ```
#[derive(Debug, Clone)]
pub struct WorkflowMachine {
    config: WorkflowConfig,
    state: WorkflowState,
    context: WorkflowContext,
    pending: Option<Invocation>,
    next_token: InvocationToken,
}

impl WorkflowMachine {
    /// Creates a machine in `loading` with the initial fetch outstanding.
    #[must_use]
    pub fn new(config: WorkflowConfig) -> Self {
        let mut machine = Self {
            config,
            state: WorkflowState::INITIAL,
            context: WorkflowContext::default(),
            pending: None,
            next_token: InvocationToken::first(),
        };
        machine.begin(RemoteCall::ListAll);
        machine
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> WorkflowState {
        self.state
    }

    /// Returns the current context.
    #[must_use]
    pub const fn context(&self) -> &WorkflowContext {
        &self.context
    }

    /// Returns the outstanding call, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&Invocation> {
        self.pending.as_ref()
    }

    /// Returns an owned copy of the state and context.
    #[must_use]
    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            state: self.state,
            context: self.context.clone(),
            task_limit: self.config.task_limit,
        }
    }

    /// Processes one event.
    ///
    /// Returns the call to start when the event entered an invoking state.
    /// Events without a handler in the current state, or whose guard fails,
    /// leave the machine untouched.
    pub fn send(&mut self, event: WorkflowEvent) -> Option<Invocation> {
        if event == WorkflowEvent::Reset {
            return Some(self.reset());
        }

        let Some(transition) = transitions::on_event(self.state, &event, &self.context) else {
            debug!(event = event.name(), state = %self.state, "event ignored");
            return None;
        };
        if let Some(guard) = &transition.guard
            && !guard.holds(&self.context, &self.config)
        {
            debug!(
                event = event.name(),
                state = %self.state,
                guard = guard.name(),
                "guard rejected event"
            );
            return None;
        }

        debug!(event = event.name(), from = %self.state, to = %transition.target, "transition");
        let call = match transition.action {
            Action::None => None,
            Action::SelectList(id) => {
                self.context = std::mem::take(&mut self.context).with_selected(&id);
                None
            }
            Action::Invoke(call) => Some(call),
        };
        self.move_to(transition.target);
        let invocation = call.map(|remote_call| self.begin(remote_call));
        self.settle();
        invocation
    }

    /// Applies the outcome of the call identified by `token`.
    ///
    /// Success applies the reply and follows the state's done transition.
    /// Failure leaves the context unchanged, follows the error transition
    /// and yields the notification to emit. Outcomes for calls that are no
    /// longer outstanding are discarded.
    pub fn resolve(
        &mut self,
        token: InvocationToken,
        outcome: Result<RemoteReply, TasksApiError>,
    ) -> Resolution {
        let Some(invocation) = self.pending.take_if(|pending| pending.token == token) else {
            warn!(%token, state = %self.state, "discarding stale call resolution");
            return Resolution::Discarded;
        };
        let call = invocation.call.call();

        match outcome {
            Ok(reply) => {
                if reply.call() == call {
                    let context = std::mem::take(&mut self.context);
                    self.context = transitions::on_done(&invocation.call, reply, context);
                    info!(%call, %token, "remote call confirmed");
                } else {
                    warn!(%call, reply = %reply.call(), %token, "reply does not answer call");
                }
                let target = transitions::done_target(self.state, &self.context);
                self.move_to(target);
                self.settle();
                Resolution::Confirmed
            }
            Err(err) => {
                warn!(%call, %token, error = %err, "remote call failed");
                self.move_to(transitions::error_target(self.state));
                self.settle();
                Resolution::Failed(WorkflowNotification::error(err.message()))
            }
        }
    }

    /// Drops everything and starts loading again.
    fn reset(&mut self) -> Invocation {
        if let Some(abandoned) = self.pending.take() {
            debug!(token = %abandoned.token, call = %abandoned.call.call(), "abandoning call");
        }
        self.move_to(WorkflowState::Loading);
        self.context = WorkflowContext::default();
        self.begin(RemoteCall::ListAll)
    }

    fn begin(&mut self, call: RemoteCall) -> Invocation {
        let invocation = Invocation {
            token: self.next_token,
            call,
        };
        self.next_token = self.next_token.next();
        self.pending = Some(invocation.clone());
        invocation
    }

    /// Runs the exit action of the current state and enters `target`.
    fn move_to(&mut self, target: WorkflowState) {
        let context = std::mem::take(&mut self.context);
        self.context = transitions::on_exit(self.state, context, &self.config);
        self.state = target;
    }

    /// Takes eventless transitions until the machine rests.
    ///
    /// A state reached twice in one pass stops the pass where it is.
    fn settle(&mut self) {
        let mut visited = vec![self.state];
        while let Some(next) = transitions::always(self.state, &self.context, &self.config) {
            if visited.contains(&next) {
                warn!(state = %self.state, next = %next, "eventless transitions cycle; resting");
                break;
            }
            debug!(from = %self.state, to = %next, "eventless transition");
            self.move_to(next);
            visited.push(next);
        }
    }
}
