//! Error types surfaced by the runtime.
//!
//! Wraps dispatch and configuration failures so the binary can bubble them
//! up with consistent context. Lifecycle rejections stay in the driver,
//! which logs them and carries on with the turn.
use std::path::PathBuf;

use thiserror::Error;

use tower_core::ActorId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("dispatch channel closed")]
    DispatchClosed,

    #[error("action sink rejected request for {actor}: {reason}")]
    SinkRejected { actor: ActorId, reason: String },

    #[error("dispatch worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("failed to load config from {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("environment variable {key} has invalid value {value:?}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("failed to install tracing subscriber: {0}")]
    Logging(String),
}
