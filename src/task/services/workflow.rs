//! Status transition validation for tasks.

use crate::task::domain::{
    ChecklistGuard, ChecklistItem, HistoryChange, HistoryRecord, Task, TaskDomainError, TaskId,
    TaskStatus, UserId,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Caller-configurable rules applied on top of the workflow graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TransitionPolicy {
    /// Which open checklist items prevent entering `FINISHED`.
    pub checklist_guard: ChecklistGuard,
}

impl TransitionPolicy {
    /// Creates a policy with the given checklist guard.
    #[must_use]
    pub const fn with_checklist_guard(checklist_guard: ChecklistGuard) -> Self {
        Self { checklist_guard }
    }
}

/// Request to move a task to another status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTaskRequest {
    task_id: TaskId,
    target_status: String,
    actor: UserId,
    sequence: u64,
}

impl TransitionTaskRequest {
    /// Creates a transition request. The sequence number defaults to 0.
    #[must_use]
    pub fn new(task_id: TaskId, target_status: impl Into<String>, actor: UserId) -> Self {
        Self {
            task_id,
            target_status: target_status.into(),
            actor,
            sequence: 0,
        }
    }

    /// Sets the insertion sequence number stamped on the history record.
    #[must_use]
    pub const fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the requested status as supplied by the caller.
    #[must_use]
    pub fn target_status(&self) -> &str {
        &self.target_status
    }
}

/// Accepted transition: the updated task and its audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// Task with the new status applied.
    pub task: Task,
    /// History record describing the change.
    pub record: HistoryRecord,
}

/// Validates status changes and reorderings of tasks.
///
/// The service is stateless apart from its policy and may be shared freely
/// between request handlers.
#[derive(Debug, Clone, Default)]
pub struct TaskWorkflowService {
    policy: TransitionPolicy,
}

impl TaskWorkflowService {
    /// Creates a service with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service with a custom policy.
    #[must_use]
    pub const fn with_policy(policy: TransitionPolicy) -> Self {
        Self { policy }
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> &TransitionPolicy {
        &self.policy
    }

    /// Checks whether `task` may move to `target` without applying anything.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the workflow
    /// has no such edge and [`TaskDomainError::UnresolvedChecklistItems`] when
    /// the checklist guard holds the task back from `FINISHED`.
    pub fn check_transition(
        &self,
        task: &Task,
        target: TaskStatus,
        checklist: &[ChecklistItem],
    ) -> Result<(), TaskDomainError> {
        if !task.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: task.id,
                from: task.status,
                to: target,
            });
        }
        if target == TaskStatus::Finished {
            let pending = self.policy.checklist_guard.pending_items(task.id, checklist);
            if !pending.is_empty() {
                return Err(TaskDomainError::UnresolvedChecklistItems {
                    task_id: task.id,
                    pending,
                });
            }
        }
        Ok(())
    }

    /// Validates and applies a status transition to a task snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] when the request targets a
    /// different task, [`TaskDomainError::UnknownStatus`] when the requested
    /// status is not part of the workflow, and the errors of
    /// [`TaskWorkflowService::check_transition`].
    pub fn transition(
        &self,
        task: &Task,
        checklist: &[ChecklistItem],
        request: &TransitionTaskRequest,
        clock: &impl Clock,
    ) -> Result<TransitionOutcome, TaskDomainError> {
        if request.task_id != task.id {
            return Err(TaskDomainError::TaskNotFound(request.task_id));
        }
        let target = TaskStatus::try_from(request.target_status.as_str())?;
        if let Err(err) = self.check_transition(task, target, checklist) {
            debug!(task_id = %task.id, from = %task.status, to = %target, error = %err, "task transition rejected");
            return Err(err);
        }

        let timestamp = clock.utc();
        let record = HistoryRecord {
            task_id: task.id,
            change: HistoryChange::Status {
                from: task.status,
                to: target,
            },
            actor: request.actor.clone(),
            recorded_at: timestamp,
            sequence: request.sequence,
        };
        let updated = apply_status(task.clone(), target, timestamp);
        info!(task_id = %task.id, from = %task.status, to = %target, actor = %request.actor, "task transition accepted");
        Ok(TransitionOutcome {
            task: updated,
            record,
        })
    }
}

/// Sets the status and the timestamps that follow from it.
pub(super) fn apply_status(
    mut task: Task,
    target: TaskStatus,
    timestamp: chrono::DateTime<chrono::Utc>,
) -> Task {
    task.status = target;
    task.updated_at = timestamp;
    if target == TaskStatus::Finished {
        task.finished_at = Some(timestamp);
    }
    task
}
