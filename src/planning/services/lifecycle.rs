//! Sprint and epic status changes.

use crate::planning::domain::{Epic, EpicStatus, PlanningError, Sprint, SprintStatus};
use crate::task::domain::{ProjectId, SprintId, Task};
use tracing::{debug, info};

/// Request to move a sprint to another status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintTransitionRequest {
    sprint_id: SprintId,
    target_status: String,
}

impl SprintTransitionRequest {
    /// Creates a request from a caller-supplied status string.
    #[must_use]
    pub fn new(sprint_id: SprintId, target_status: impl Into<String>) -> Self {
        Self {
            sprint_id,
            target_status: target_status.into(),
        }
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn sprint_id(&self) -> SprintId {
        self.sprint_id
    }
}

/// Validates sprint status changes against the project's other sprints.
#[derive(Debug, Clone, Copy, Default)]
pub struct SprintLifecycleService;

impl SprintLifecycleService {
    /// Creates the service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the project's active sprint, if any.
    #[must_use]
    pub fn active_sprint<'a>(
        &self,
        project_id: ProjectId,
        sprints: &'a [Sprint],
    ) -> Option<&'a Sprint> {
        sprints
            .iter()
            .find(|sprint| sprint.project_id == project_id && sprint.status == SprintStatus::Active)
    }

    /// Applies a status change to a sprint of the snapshot.
    ///
    /// `sprints` must contain the target sprint and every other sprint of
    /// its project so that the single-active-sprint rule can be checked.
    /// Completing a sprint leaves its tasks untouched; see
    /// [`Self::incomplete_tasks`] for carry-over candidates.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::SprintNotFound`] when the sprint is missing
    /// from the snapshot, [`PlanningError::UnknownSprintStatus`] for
    /// unparseable targets, [`PlanningError::InvalidSprintTransition`] for
    /// edges the lifecycle lacks, [`PlanningError::InvalidDateRange`] when
    /// activating a sprint with inverted dates, and
    /// [`PlanningError::SprintAlreadyActive`] when another sprint of the
    /// project is active.
    pub fn transition(
        &self,
        sprints: &[Sprint],
        request: &SprintTransitionRequest,
    ) -> Result<Sprint, PlanningError> {
        let sprint = sprints
            .iter()
            .find(|sprint| sprint.id == request.sprint_id)
            .ok_or(PlanningError::SprintNotFound(request.sprint_id))?;
        let target = SprintStatus::try_from(request.target_status.as_str())?;

        if !sprint.status.can_transition_to(target) {
            debug!(
                sprint_id = %sprint.id,
                from = %sprint.status,
                to = %target,
                "sprint transition rejected"
            );
            return Err(PlanningError::InvalidSprintTransition {
                sprint_id: sprint.id,
                from: sprint.status,
                to: target,
            });
        }

        if target == SprintStatus::Active {
            sprint.validate_dates()?;
            if let Some(active) = self.active_sprint(sprint.project_id, sprints) {
                debug!(
                    sprint_id = %sprint.id,
                    active_sprint = %active.id,
                    "sprint activation rejected"
                );
                return Err(PlanningError::SprintAlreadyActive {
                    project_id: sprint.project_id,
                    active_sprint: active.id,
                });
            }
        }

        info!(
            sprint_id = %sprint.id,
            project_id = %sprint.project_id,
            from = %sprint.status,
            to = %target,
            "sprint transition accepted"
        );
        Ok(sprint.clone().with_status(target))
    }

    /// Member tasks of the sprint that are not finished.
    #[must_use]
    pub fn incomplete_tasks<'a>(&self, sprint: &Sprint, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks
            .iter()
            .filter(|task| task.sprint_id == Some(sprint.id) && !task.is_finished())
            .collect()
    }
}

/// Validates epic status changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpicLifecycleService;

impl EpicLifecycleService {
    /// Creates the service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Moves the epic to `target_status`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::UnknownEpicStatus`] for unparseable targets
    /// and [`PlanningError::InvalidEpicTransition`] for edges the lifecycle
    /// lacks.
    pub fn transition(&self, epic: &Epic, target_status: &str) -> Result<Epic, PlanningError> {
        let target = EpicStatus::try_from(target_status)?;
        if !epic.status.can_transition_to(target) {
            debug!(epic_id = %epic.id, from = %epic.status, to = %target, "epic transition rejected");
            return Err(PlanningError::InvalidEpicTransition {
                epic_id: epic.id,
                from: epic.status,
                to: target,
            });
        }
        info!(epic_id = %epic.id, from = %epic.status, to = %target, "epic transition accepted");
        Ok(epic.clone().with_status(target))
    }
}
