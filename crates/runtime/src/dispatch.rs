//! Asynchronous delivery of chosen requests.
//!
//! The driver decides synchronously and must never wait on the network, so
//! requests are pushed into an unbounded channel and a background task feeds
//! them to an [`ActionSink`] one at a time, in the order they were sent.
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use tower_core::{ActRequest, ActorId};

use crate::error::{Result, RuntimeError};

/// A request on its way to whoever applies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActDispatch {
    pub actor: ActorId,
    pub request: ActRequest,
}

/// Destination for dispatched requests.
///
/// Different implementations can handle:
/// - Sending to a connected client
/// - Applying to a local world
/// - Recording for tests
#[async_trait]
pub trait ActionSink: Send + 'static {
    async fn deliver(&mut self, dispatch: ActDispatch) -> Result<()>;
}

/// Sink that only logs what it receives.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

#[async_trait]
impl ActionSink for LogSink {
    async fn deliver(&mut self, dispatch: ActDispatch) -> Result<()> {
        tracing::info!(
            actor = %dispatch.actor,
            request = dispatch.request.as_ref(),
            "dispatched {:?}",
            dispatch.request
        );
        Ok(())
    }
}

/// Sink forwarding every request into another channel.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ActDispatch>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ActDispatch>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl ActionSink for ChannelSink {
    async fn deliver(&mut self, dispatch: ActDispatch) -> Result<()> {
        self.tx
            .send(dispatch)
            .map_err(|_| RuntimeError::SinkRejected {
                actor: dispatch.actor,
                reason: "downstream receiver dropped".to_owned(),
            })
    }
}

/// Sending half handed to the driver. Cheap to clone.
#[derive(Clone, Debug)]
pub struct DispatchHandle {
    tx: mpsc::UnboundedSender<ActDispatch>,
}

impl DispatchHandle {
    /// Queues a request without waiting.
    ///
    /// Fails only when the dispatch task has stopped.
    pub fn send(&self, dispatch: ActDispatch) -> Result<()> {
        self.tx
            .send(dispatch)
            .map_err(|_| RuntimeError::DispatchClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Totals reported by the dispatch task when it stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: u64,
    pub failed: u64,
}

/// Background task draining the dispatch channel into a sink.
pub struct Dispatcher {
    task: JoinHandle<DispatchStats>,
}

impl Dispatcher {
    /// Spawns the task on the current tokio runtime.
    ///
    /// The task ends once every [`DispatchHandle`] has been dropped and the
    /// queue is drained.
    pub fn spawn<S: ActionSink>(sink: S) -> (Self, DispatchHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(sink, rx));
        (Self { task }, DispatchHandle { tx })
    }

    /// Stops the task without draining; queued requests are dropped.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Waits for the task to drain and stop.
    pub async fn join(self) -> Result<DispatchStats> {
        self.task.await.map_err(RuntimeError::WorkerJoin)
    }
}

async fn run<S: ActionSink>(
    mut sink: S,
    mut rx: mpsc::UnboundedReceiver<ActDispatch>,
) -> DispatchStats {
    let mut stats = DispatchStats::default();
    while let Some(dispatch) = rx.recv().await {
        match sink.deliver(dispatch).await {
            Ok(()) => stats.delivered += 1,
            Err(e) => {
                warn!(actor = %dispatch.actor, error = %e, "dispatch failed");
                stats.failed += 1;
            }
        }
    }
    debug!(
        delivered = stats.delivered,
        failed = stats.failed,
        "dispatch channel drained"
    );
    stats
}
