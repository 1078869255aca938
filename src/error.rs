//! Crate-wide error classification.
//!
//! Each module reports failures through its own error enum. [`EngineError`]
//! wraps them for callers that drive several modules, and [`ErrorKind`] gives
//! every failure a stable category that survives the wrapping.

use crate::notification::domain::NotificationError;
use crate::planning::domain::PlanningError;
use crate::task::domain::TaskDomainError;
use crate::time_tracking::domain::TimeTrackingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable category of an engine failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// A status value or status transition was rejected.
    InvalidStatus,
    /// A referenced entity does not exist.
    NotFound,
    /// Two siblings would share an order value.
    DuplicateOrder,
    /// The user already has a running timer.
    TimerAlreadyActive,
    /// The project already has an active sprint.
    SprintAlreadyActive,
    /// Input failed validation.
    ValidationError,
}

impl ErrorKind {
    /// Returns the wire representation of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidStatus => "INVALID_STATUS",
            Self::NotFound => "NOT_FOUND",
            Self::DuplicateOrder => "DUPLICATE_ORDER",
            Self::TimerAlreadyActive => "TIMER_ALREADY_ACTIVE",
            Self::SprintAlreadyActive => "SPRINT_ALREADY_ACTIVE",
            Self::ValidationError => "VALIDATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any failure raised by the engine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    /// Task lifecycle failure.
    #[error(transparent)]
    Task(#[from] TaskDomainError),

    /// Timer or time entry failure.
    #[error(transparent)]
    TimeTracking(#[from] TimeTrackingError),

    /// Sprint or epic failure.
    #[error(transparent)]
    Planning(#[from] PlanningError),

    /// Notification failure.
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl EngineError {
    /// Returns the category of the wrapped failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Task(err) => err.kind(),
            Self::TimeTracking(err) => err.kind(),
            Self::Planning(err) => err.kind(),
            Self::Notification(err) => err.kind(),
        }
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
