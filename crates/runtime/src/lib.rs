//! Runtime orchestration around the tower actor rules.
//!
//! This crate drives `tower-core` actors turn by turn and delivers the
//! requests they choose. Consumers build a [`WorldSnapshot`] at turn start,
//! hand it to [`ActorDriver::run_turn`] together with their actors, and
//! receive chosen requests through an [`ActionSink`].
//!
//! Modules are organized by responsibility:
//! - [`driver`] visits policy-controlled actors on the authoritative side
//! - [`assist`] runs the same policy for a connected player's client
//! - [`snapshot`] holds the read-only world data decisions are built from
//! - [`dispatch`] moves chosen requests to a sink without blocking
//! - [`apply`] resolves bag-local requests against a [`tower_core::Bag`]
//! - [`config`], [`logging`] and [`error`] are the ambient plumbing
pub mod apply;
pub mod assist;
pub mod config;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod logging;
pub mod snapshot;

pub use apply::apply_bag_request;
pub use assist::{AssistLoop, AssistToggle};
pub use config::RuntimeConfig;
pub use dispatch::{
    ActDispatch, ActionSink, ChannelSink, DispatchHandle, DispatchStats, Dispatcher, LogSink,
};
pub use driver::{ActorDriver, TurnReport};
pub use error::{Result, RuntimeError};
pub use logging::setup_logging;
pub use snapshot::{ActorSighting, FloorSnapshot, Perception, WorldSnapshot};
