//! Error types for sprint and epic planning.

use super::{EpicStatus, SprintStatus};
use crate::error::ErrorKind;
use crate::task::domain::{EpicId, ProjectId, SprintId};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned by planning operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanningError {
    /// The sprint ends before it starts.
    #[error("sprint end date {end} is before start date {start}")]
    InvalidDateRange {
        /// First day of the sprint.
        start: NaiveDate,
        /// Last day of the sprint.
        end: NaiveDate,
    },

    /// A sprint status string was not recognised.
    #[error("unknown sprint status: {0}")]
    UnknownSprintStatus(String),

    /// An epic status string was not recognised.
    #[error("unknown epic status: {0}")]
    UnknownEpicStatus(String),

    /// The sprint lifecycle does not permit the requested change.
    #[error("sprint {sprint_id} cannot move from {from} to {to}")]
    InvalidSprintTransition {
        /// Sprint being changed.
        sprint_id: SprintId,
        /// Current status.
        from: SprintStatus,
        /// Requested status.
        to: SprintStatus,
    },

    /// The epic lifecycle does not permit the requested change.
    #[error("epic {epic_id} cannot move from {from} to {to}")]
    InvalidEpicTransition {
        /// Epic being changed.
        epic_id: EpicId,
        /// Current status.
        from: EpicStatus,
        /// Requested status.
        to: EpicStatus,
    },

    /// Another sprint of the project is already active.
    #[error("project {project_id} already has active sprint {active_sprint}")]
    SprintAlreadyActive {
        /// Project owning both sprints.
        project_id: ProjectId,
        /// The sprint that is currently active.
        active_sprint: SprintId,
    },

    /// The sprint is not part of the snapshot.
    #[error("sprint {0} not found")]
    SprintNotFound(SprintId),

    /// A capacity value was negative or out of range.
    #[error("invalid sprint capacity {0}, expected a non-negative story point count")]
    InvalidCapacity(i64),
}

impl PlanningError {
    /// Classifies the error for callers mapping failures onto responses.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDateRange { .. } | Self::InvalidCapacity(_) => {
                ErrorKind::ValidationError
            }
            Self::UnknownSprintStatus(_)
            | Self::UnknownEpicStatus(_)
            | Self::InvalidSprintTransition { .. }
            | Self::InvalidEpicTransition { .. } => ErrorKind::InvalidStatus,
            Self::SprintAlreadyActive { .. } => ErrorKind::SprintAlreadyActive,
            Self::SprintNotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Error returned while parsing sprint statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sprint status: {0}")]
pub struct ParseSprintStatusError(pub String);

impl From<ParseSprintStatusError> for PlanningError {
    fn from(err: ParseSprintStatusError) -> Self {
        Self::UnknownSprintStatus(err.0)
    }
}

/// Error returned while parsing epic statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown epic status: {0}")]
pub struct ParseEpicStatusError(pub String);

impl From<ParseEpicStatusError> for PlanningError {
    fn from(err: ParseEpicStatusError) -> Self {
        Self::UnknownEpicStatus(err.0)
    }
}
