//! Error types for task domain validation and parsing.

use super::{ChecklistItemId, TaskId, TaskStatus};
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned by task state machine, ordering, and tree operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The requested status is not a member of the workflow.
    #[error("unknown task status: {0}")]
    UnknownStatus(String),

    /// The workflow does not permit moving between the two statuses.
    #[error("task {task_id} cannot transition from {from} to {to}")]
    InvalidStatusTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status before the attempted transition.
        from: TaskStatus,
        /// Requested target status.
        to: TaskStatus,
    },

    /// The completion guard found unresolved checklist items.
    #[error("task {task_id} has {} unresolved checklist item(s)", .pending.len())]
    UnresolvedChecklistItems {
        /// Task that cannot be finished.
        task_id: TaskId,
        /// Items still blocking completion.
        pending: Vec<ChecklistItemId>,
    },

    /// The task is absent from the supplied snapshot.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The checklist item is absent from the task's checklist.
    #[error("checklist item {item_id} not found on task {task_id}")]
    ChecklistItemNotFound {
        /// Task the request was scoped to.
        task_id: TaskId,
        /// Unknown item.
        item_id: ChecklistItemId,
    },

    /// Two checklist items of a task would share an order value.
    #[error("checklist order {order} is used more than once on task {task_id}")]
    DuplicateOrder {
        /// Task whose checklist would contain a tie.
        task_id: TaskId,
        /// Order value that is not unique.
        order: i64,
    },

    /// A reorder request names the same task twice.
    #[error("task {0} appears more than once in a reorder request")]
    DuplicateTaskMove(TaskId),

    /// A checklist reorder request names the same item twice.
    #[error("checklist item {0} appears more than once in a reorder request")]
    DuplicateChecklistMove(ChecklistItemId),

    /// Story points are negative or out of range.
    #[error("invalid story points {0}, expected a non-negative integer")]
    InvalidStoryPoints(i64),

    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The parent chain of a task loops back on itself.
    #[error("parent chain of task {0} contains a cycle")]
    CycleDetected(TaskId),

    /// A task cannot be its own parent.
    #[error("task {0} cannot be its own parent")]
    SelfParent(TaskId),

    /// The batch needs more history sequence numbers than remain after
    /// the requested first sequence.
    #[error("history sequence numbers starting at {first_sequence} are exhausted")]
    SequenceExhausted {
        /// First sequence number supplied by the caller.
        first_sequence: u64,
    },
}

impl TaskDomainError {
    /// Classifies the error for callers mapping failures onto responses.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownStatus(_)
            | Self::InvalidStatusTransition { .. }
            | Self::UnresolvedChecklistItems { .. } => ErrorKind::InvalidStatus,
            Self::TaskNotFound(_) | Self::ChecklistItemNotFound { .. } => ErrorKind::NotFound,
            Self::DuplicateOrder { .. } => ErrorKind::DuplicateOrder,
            Self::DuplicateTaskMove(_)
            | Self::DuplicateChecklistMove(_)
            | Self::InvalidStoryPoints(_)
            | Self::EmptyUserId
            | Self::CycleDetected(_)
            | Self::SelfParent(_)
            | Self::SequenceExhausted { .. } => ErrorKind::ValidationError,
        }
    }
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

impl From<ParseTaskStatusError> for TaskDomainError {
    fn from(err: ParseTaskStatusError) -> Self {
        Self::UnknownStatus(err.0)
    }
}

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
