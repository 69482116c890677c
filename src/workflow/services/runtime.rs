//! Async runtime hosting a workflow machine on a tokio task.
//!
//! The runtime owns the machine and performs the remote calls it asks for.
//! Callers talk to it through a cloneable [`WorkflowHandle`]: events go in
//! over a command channel, snapshots come out over a watch channel and error
//! notifications over a broadcast channel.

use crate::workflow::{
    domain::WorkflowConfig,
    machine::{
        Invocation, InvocationToken, RemoteCall, RemoteReply, Resolution, WorkflowEvent,
        WorkflowMachine, WorkflowNotification, WorkflowSnapshot,
    },
    ports::{TasksApi, TasksApiError, TasksApiResult},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const COMMAND_BUFFER: usize = 64;
const NOTIFICATION_BUFFER: usize = 32;

/// Errors returned by [`WorkflowHandle`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkflowRuntimeError {
    /// The runtime task has shut down.
    #[error("workflow runtime has stopped")]
    Stopped,
}

/// Performs `call` against `api` and wraps the payload for the machine.
///
/// # Errors
///
/// Returns the [`TasksApiError`] reported by `api`.
pub async fn perform<A>(api: &A, call: RemoteCall) -> TasksApiResult<RemoteReply>
where
    A: TasksApi + ?Sized,
{
    match call {
        RemoteCall::ListAll => api.list_all().await.map(RemoteReply::Lists),
        RemoteCall::CreateList { name } => {
            api.create_list(&name).await.map(RemoteReply::ListCreated)
        }
        RemoteCall::RenameList { id, name } => api
            .rename_list(&id, &name)
            .await
            .map(RemoteReply::ListRenamed),
        RemoteCall::DeleteList { id } => api.delete_list(&id).await.map(RemoteReply::ListDeleted),
        RemoteCall::CreateTask { list_id, content } => api
            .create_task(&list_id, &content)
            .await
            .map(RemoteReply::TaskCreated),
        RemoteCall::TickTask { list_id, task_id } => api
            .tick_task(&list_id, &task_id)
            .await
            .map(RemoteReply::TaskTicked),
        RemoteCall::CarryTask { list_id, task_id } => api
            .carry_task(&list_id, &task_id)
            .await
            .map(RemoteReply::TaskCarried),
        RemoteCall::RemoveTask { list_id, task_id } => api
            .remove_task(&list_id, &task_id)
            .await
            .map(RemoteReply::TaskRemoved),
    }
}

#[derive(Debug)]
enum Command {
    Dispatch {
        event: WorkflowEvent,
        ack: oneshot::Sender<()>,
    },
    Shutdown,
}

type ReplyMessage = (InvocationToken, Result<RemoteReply, TasksApiError>);

/// Entry point for starting workflow runtimes.
pub struct WorkflowRuntime<A: TasksApi + ?Sized> {
    api: Arc<A>,
    machine: WorkflowMachine,
    in_flight: Option<(InvocationToken, CancellationToken)>,
    replies: mpsc::UnboundedSender<ReplyMessage>,
    snapshots: watch::Sender<WorkflowSnapshot>,
    errors: broadcast::Sender<WorkflowNotification>,
}

impl<A> WorkflowRuntime<A>
where
    A: TasksApi + ?Sized + 'static,
{
    /// Starts a runtime on the current tokio runtime.
    ///
    /// The machine starts in `loading` and the initial fetch is performed
    /// straight away. The runtime stops once [`WorkflowHandle::shutdown`] is
    /// called or every handle has been dropped.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn spawn(api: Arc<A>, config: WorkflowConfig) -> WorkflowHandle {
        let machine = WorkflowMachine::new(config);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(machine.snapshot());
        let (error_tx, _) = broadcast::channel(NOTIFICATION_BUFFER);

        let handle = WorkflowHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            errors: error_tx.clone(),
        };
        let runtime = Self {
            api,
            machine,
            in_flight: None,
            replies: reply_tx,
            snapshots: snapshot_tx,
            errors: error_tx,
        };
        tokio::spawn(runtime.run(command_rx, reply_rx));
        handle
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut replies: mpsc::UnboundedReceiver<ReplyMessage>,
    ) {
        info!(
            task_limit = self.machine.config().task_limit,
            "workflow runtime started"
        );
        if let Some(invocation) = self.machine.pending().cloned() {
            self.start(invocation);
        }

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Dispatch { event, ack }) => {
                        self.dispatch(event);
                        if ack.send(()).is_err() {
                            debug!("dispatch caller went away before acknowledgement");
                        }
                    }
                    Some(Command::Shutdown) | None => break,
                },
                Some((token, outcome)) = replies.recv() => self.resolve(token, outcome),
            }
        }

        if let Some((token, cancel)) = self.in_flight.take() {
            debug!(%token, "cancelling outstanding call on shutdown");
            cancel.cancel();
        }
        info!("workflow runtime stopped");
    }

    fn dispatch(&mut self, event: WorkflowEvent) {
        if let Some(invocation) = self.machine.send(event) {
            self.start(invocation);
        }
        self.publish();
    }

    fn resolve(&mut self, token: InvocationToken, outcome: Result<RemoteReply, TasksApiError>) {
        match self.machine.resolve(token, outcome) {
            Resolution::Discarded => return,
            Resolution::Confirmed => {}
            Resolution::Failed(notification) => {
                if self.errors.send(notification).is_err() {
                    debug!(%token, "no subscriber for error notification");
                }
            }
        }
        if self
            .in_flight
            .as_ref()
            .is_some_and(|(in_flight, _)| *in_flight == token)
        {
            self.in_flight = None;
        }
        self.publish();
    }

    /// Spawns the call for `invocation`, cancelling any call still running.
    fn start(&mut self, invocation: Invocation) {
        let cancel = CancellationToken::new();
        let superseded = self
            .in_flight
            .replace((invocation.token, cancel.clone()));
        if let Some((previous, abandoned)) = superseded {
            debug!(token = %previous, "cancelling superseded call");
            abandoned.cancel();
        }

        let api = Arc::clone(&self.api);
        let replies = self.replies.clone();
        let Invocation { token, call } = invocation;
        debug!(%token, call = %call.call(), "starting remote call");
        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => debug!(%token, "remote call cancelled"),
                outcome = perform(api.as_ref(), call) => {
                    if replies.send((token, outcome)).is_err() {
                        debug!(%token, "runtime stopped before call resolved");
                    }
                }
            }
        });
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.machine.snapshot());
    }
}

/// Cloneable handle to a running workflow runtime.
#[derive(Debug, Clone)]
pub struct WorkflowHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<WorkflowSnapshot>,
    errors: broadcast::Sender<WorkflowNotification>,
}

impl WorkflowHandle {
    /// Sends an event and waits until the machine has processed it.
    ///
    /// Returning does not mean a started remote call has finished; use
    /// [`WorkflowHandle::settled`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRuntimeError::Stopped`] when the runtime is gone.
    pub async fn dispatch(&self, event: WorkflowEvent) -> Result<(), WorkflowRuntimeError> {
        let (ack, processed) = oneshot::channel();
        self.commands
            .send(Command::Dispatch { event, ack })
            .await
            .map_err(|_| WorkflowRuntimeError::Stopped)?;
        processed.await.map_err(|_| WorkflowRuntimeError::Stopped)
    }

    /// Returns the latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> WorkflowSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Waits until no remote call is outstanding and returns that snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRuntimeError::Stopped`] when the runtime is gone.
    pub async fn settled(&self) -> Result<WorkflowSnapshot, WorkflowRuntimeError> {
        let mut snapshots = self.snapshots.clone();
        snapshots
            .wait_for(|snapshot| !snapshot.is_busy())
            .await
            .map(|snapshot| snapshot.clone())
            .map_err(|_| WorkflowRuntimeError::Stopped)
    }

    /// Returns a watch receiver following every published snapshot.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<WorkflowSnapshot> {
        self.snapshots.clone()
    }

    /// Subscribes to error notifications emitted from now on.
    #[must_use]
    pub fn subscribe_errors(&self) -> broadcast::Receiver<WorkflowNotification> {
        self.errors.subscribe()
    }

    /// Stops the runtime and cancels any outstanding call.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRuntimeError::Stopped`] when the runtime is gone.
    pub async fn shutdown(&self) -> Result<(), WorkflowRuntimeError> {
        self.commands
            .send(Command::Shutdown)
            .await
            .map_err(|_| WorkflowRuntimeError::Stopped)
    }
}
