//! Task workflow statuses and priorities.

use super::{ParsePriorityError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a task.
///
/// The permitted edges are:
///
/// ```text
/// CREATED         -> IN_PROGRESS
/// IN_PROGRESS     -> BLOCKED | TESTING
/// BLOCKED         -> IN_PROGRESS | READY_TO_FINISH
/// TESTING         -> IN_PROGRESS | READY_TO_FINISH
/// READY_TO_FINISH -> FINISHED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Created,
    /// Task is being worked on.
    InProgress,
    /// Work is blocked on an external dependency.
    Blocked,
    /// Work is under test.
    Testing,
    /// Work is done and awaiting sign-off.
    ReadyToFinish,
    /// Task has been finished.
    Finished,
}

impl TaskStatus {
    /// Every status in workflow order.
    pub const ALL: [Self; 6] = [
        Self::Created,
        Self::InProgress,
        Self::Blocked,
        Self::Testing,
        Self::ReadyToFinish,
        Self::Finished,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::InProgress => "IN_PROGRESS",
            Self::Blocked => "BLOCKED",
            Self::Testing => "TESTING",
            Self::ReadyToFinish => "READY_TO_FINISH",
            Self::Finished => "FINISHED",
        }
    }

    /// Returns whether the workflow permits moving to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Created | Self::Blocked | Self::Testing, Self::InProgress)
                | (Self::InProgress, Self::Blocked | Self::Testing)
                | (Self::Blocked | Self::Testing, Self::ReadyToFinish)
                | (Self::ReadyToFinish, Self::Finished)
        )
    }

    /// Returns `true` for the status with no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Returns `true` for the status tasks are created in.
    #[must_use]
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Created)
    }

    /// Returns the statuses reachable in one step.
    #[must_use]
    pub fn successors(self) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|target| self.can_transition_to(*target))
            .collect()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "CREATED" => Ok(Self::Created),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "BLOCKED" => Ok(Self::Blocked),
            "TESTING" => Ok(Self::Testing),
            "READY_TO_FINISH" => Ok(Self::ReadyToFinish),
            "FINISHED" => Ok(Self::Finished),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Should be handled first.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}
