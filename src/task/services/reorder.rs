//! Board and checklist reordering.

use super::workflow::{TaskWorkflowService, apply_status};
use crate::task::domain::{
    ChecklistItem, HistoryChange, HistoryRecord, ReorderChecklistRequest, Task, TaskDomainError,
    TaskId, TaskStatus, UserId, reorder_checklist,
};
use mockable::Clock;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Target column and position for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    /// Task being moved.
    pub task_id: TaskId,
    /// Status of the destination column.
    pub new_status: String,
    /// Position within the destination column.
    pub new_order: i64,
}

impl TaskMove {
    /// Creates a move.
    #[must_use]
    pub fn new(task_id: TaskId, new_status: impl Into<String>, new_order: i64) -> Self {
        Self {
            task_id,
            new_status: new_status.into(),
            new_order,
        }
    }
}

/// Batch of board moves applied atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderTasksRequest {
    moves: Vec<TaskMove>,
    actor: UserId,
    first_sequence: u64,
}

impl ReorderTasksRequest {
    /// Creates a request. Sequence numbers start at 0 unless overridden.
    #[must_use]
    pub fn new(moves: impl IntoIterator<Item = TaskMove>, actor: UserId) -> Self {
        Self {
            moves: moves.into_iter().collect(),
            actor,
            first_sequence: 0,
        }
    }

    /// Sets the sequence number of the first emitted history record.
    #[must_use]
    pub const fn with_first_sequence(mut self, first_sequence: u64) -> Self {
        self.first_sequence = first_sequence;
        self
    }

    /// Returns the requested moves.
    #[must_use]
    pub fn moves(&self) -> &[TaskMove] {
        &self.moves
    }
}

/// Result of an accepted reorder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderOutcome {
    /// Updated copies of the moved tasks, in request order.
    pub tasks: Vec<Task>,
    /// History records in emission order.
    pub records: Vec<HistoryRecord>,
}

/// Hands out consecutive history sequence numbers without wrapping.
struct SequenceCounter {
    first: u64,
    next: Option<u64>,
}

impl SequenceCounter {
    const fn starting_at(first: u64) -> Self {
        Self {
            first,
            next: Some(first),
        }
    }

    fn next_sequence(&mut self) -> Result<u64, TaskDomainError> {
        let current = self.next.ok_or(TaskDomainError::SequenceExhausted {
            first_sequence: self.first,
        })?;
        self.next = current.checked_add(1);
        Ok(current)
    }
}

impl TaskWorkflowService {
    /// Applies a batch of board moves.
    ///
    /// Each move sets the task's order. When the destination status differs
    /// from the current one the move is also a status transition checked by
    /// the same rules as [`TaskWorkflowService::transition`]. Either every
    /// move is applied or none is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] for unknown tasks,
    /// [`TaskDomainError::DuplicateTaskMove`] when a task is moved twice,
    /// [`TaskDomainError::UnknownStatus`] for unrecognised statuses,
    /// [`TaskDomainError::SequenceExhausted`] when the records would run past
    /// `u64::MAX`, and any transition error raised by [`TaskWorkflowService::check_transition`].
    pub fn reorder_tasks(
        &self,
        tasks: &[Task],
        checklist: &[ChecklistItem],
        request: &ReorderTasksRequest,
        clock: &impl Clock,
    ) -> Result<ReorderOutcome, TaskDomainError> {
        let index: HashMap<TaskId, &Task> = tasks.iter().map(|task| (task.id, task)).collect();
        let timestamp = clock.utc();
        let mut seen = HashSet::new();
        let mut outcome = ReorderOutcome::default();
        let mut sequences = SequenceCounter::starting_at(request.first_sequence);

        for task_move in &request.moves {
            if !seen.insert(task_move.task_id) {
                return Err(TaskDomainError::DuplicateTaskMove(task_move.task_id));
            }
            let current = index
                .get(&task_move.task_id)
                .copied()
                .ok_or(TaskDomainError::TaskNotFound(task_move.task_id))?;
            let target = TaskStatus::try_from(task_move.new_status.as_str())?;

            let mut updated = current.clone();
            if target != current.status {
                if let Err(err) = self.check_transition(current, target, checklist) {
                    debug!(task_id = %current.id, to = %target, error = %err, "board move rejected");
                    return Err(err);
                }
                outcome.records.push(HistoryRecord {
                    task_id: current.id,
                    change: HistoryChange::Status {
                        from: current.status,
                        to: target,
                    },
                    actor: request.actor.clone(),
                    recorded_at: timestamp,
                    sequence: sequences.next_sequence()?,
                });
                updated = apply_status(updated, target, timestamp);
            }
            if task_move.new_order != current.order {
                outcome.records.push(HistoryRecord {
                    task_id: current.id,
                    change: HistoryChange::Order {
                        from: current.order,
                        to: task_move.new_order,
                    },
                    actor: request.actor.clone(),
                    recorded_at: timestamp,
                    sequence: sequences.next_sequence()?,
                });
                updated.order = task_move.new_order;
                updated.updated_at = timestamp;
            }
            outcome.tasks.push(updated);
        }

        info!(
            moved = outcome.tasks.len(),
            records = outcome.records.len(),
            actor = %request.actor,
            "board reorder accepted"
        );
        Ok(outcome)
    }

    /// Reorders a task's checklist.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`reorder_checklist`].
    pub fn reorder_checklist(
        &self,
        items: &[ChecklistItem],
        request: &ReorderChecklistRequest,
    ) -> Result<Vec<ChecklistItem>, TaskDomainError> {
        let result = reorder_checklist(items, request);
        match &result {
            Ok(reordered) => {
                debug!(task_id = %request.task_id, items = reordered.len(), "checklist reordered");
            }
            Err(err) => debug!(task_id = %request.task_id, error = %err, "checklist reorder rejected"),
        }
        result
    }
}
