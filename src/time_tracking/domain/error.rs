//! Error types for time tracking.

use super::TimeEntryId;
use crate::error::ErrorKind;
use crate::task::domain::{TaskId, UserId};
use thiserror::Error;

/// Errors returned by timer operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeTrackingError {
    /// The user already has a running timer.
    #[error("user {user_id} already has an active timer (entry {entry_id} on task {task_id})")]
    TimerAlreadyActive {
        /// User attempting to start a timer.
        user_id: UserId,
        /// The entry that is still running.
        entry_id: TimeEntryId,
        /// Task the running entry belongs to.
        task_id: TaskId,
    },

    /// The user has no running timer to stop.
    #[error("user {0} has no active timer")]
    NoActiveTimer(UserId),

    /// The hourly rate is negative or not a finite number.
    #[error("invalid hourly rate {0}, expected a finite non-negative amount")]
    InvalidHourlyRate(String),
}

impl TimeTrackingError {
    /// Classifies the error for callers mapping failures onto responses.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TimerAlreadyActive { .. } => ErrorKind::TimerAlreadyActive,
            Self::NoActiveTimer(_) => ErrorKind::NotFound,
            Self::InvalidHourlyRate(_) => ErrorKind::ValidationError,
        }
    }
}
