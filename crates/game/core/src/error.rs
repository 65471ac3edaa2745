//! Common error infrastructure for tower-core.
//!
//! The rules in this crate are total: decision functions express "nothing to
//! do" as `None`, never as an error. What remains are caller mistakes that can
//! be detected cheaply (lifecycle transitions from the wrong state, unusable
//! configuration values), classified here by severity so drivers can decide
//! whether to log and continue or stop.

use crate::actor::{ActorId, LifecycleOp, LifecycleState};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later or with another request.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    Validation,

    /// Internal error - the caller broke a documented precondition.
    Internal,

    /// Fatal error - state is unusable, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tower-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// A lifecycle operation was attempted from a state that does not allow it.
///
/// The actor is left untouched when this is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("actor {actor}: cannot {op} while {from}")]
    InvalidTransition {
        actor: ActorId,
        from: LifecycleState,
        op: LifecycleOp,
    },
}

impl GameError for LifecycleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidTransition { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "LIFECYCLE_INVALID_TRANSITION",
        }
    }
}

/// A [`GameConfig`](crate::GameConfig) value is unusable.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must lie in [0, 1], got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be a finite non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} range is empty: min {min} > max {max}")]
    EmptyRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RateOutOfRange { .. } => "CONFIG_RATE_OUT_OF_RANGE",
            Self::Negative { .. } => "CONFIG_NEGATIVE",
            Self::EmptyRange { .. } => "CONFIG_EMPTY_RANGE",
        }
    }
}
