//! Task mutations that trigger notifications.

use crate::task::domain::{TaskId, TaskStatus, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// What happened to the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutationKind {
    /// The task moved between workflow statuses.
    #[serde(rename_all = "camelCase")]
    StatusChanged {
        /// Previous status.
        from: TaskStatus,
        /// New status.
        to: TaskStatus,
    },
    /// Someone commented on the task.
    #[serde(rename_all = "camelCase")]
    CommentAdded {
        /// Comment author.
        author: UserId,
    },
    /// The task's assignee changed.
    #[serde(rename_all = "camelCase")]
    AssignmentChanged {
        /// Assignee before the change.
        previous: Option<UserId>,
        /// Assignee after the change; `None` when unassigned.
        new_assignee: Option<UserId>,
    },
    /// The task was deleted.
    Deleted,
}

impl MutationKind {
    /// Returns the canonical name of the mutation kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StatusChanged { .. } => "STATUS_CHANGED",
            Self::CommentAdded { .. } => "COMMENT_ADDED",
            Self::AssignmentChanged { .. } => "ASSIGNMENT_CHANGED",
            Self::Deleted => "DELETED",
        }
    }

    /// Returns a stable textual key covering the kind and its payload.
    pub(crate) fn fingerprint(&self) -> String {
        match self {
            Self::StatusChanged { from, to } => format!("{}:{from}:{to}", self.as_str()),
            Self::CommentAdded { author } => format!("{}:{author}", self.as_str()),
            Self::AssignmentChanged {
                previous,
                new_assignee,
            } => format!(
                "{}:{}:{}",
                self.as_str(),
                previous.as_ref().map_or("", UserId::as_str),
                new_assignee.as_ref().map_or("", UserId::as_str),
            ),
            Self::Deleted => self.as_str().to_owned(),
        }
    }
}

/// A change to a task, as reported by the caller after persisting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMutation {
    /// Changed task.
    pub task_id: TaskId,
    /// Task title at the time of the change, for message rendering.
    pub task_title: String,
    /// Kind of change.
    pub kind: MutationKind,
    /// User who made the change.
    pub actor: UserId,
    /// When the change happened.
    pub occurred_at: DateTime<Utc>,
}

impl TaskMutation {
    /// Describes a mutation made now.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        task_title: impl Into<String>,
        kind: MutationKind,
        actor: UserId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            task_id,
            task_title: task_title.into(),
            kind,
            actor,
            occurred_at: clock.utc(),
        }
    }
}
