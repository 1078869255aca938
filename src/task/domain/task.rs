//! Task snapshot entity.

use super::{EpicId, Priority, ProjectId, SprintId, StoryPoints, TaskId, TaskStatus, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Snapshot of a task as loaded by the persistence layer.
///
/// The engine never creates or deletes tasks; it validates proposed changes
/// and returns updated copies for the caller to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Short summary.
    pub title: String,
    /// Longer description, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Priority.
    #[serde(default)]
    pub priority: Priority,
    /// Epic the task belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic_id: Option<EpicId>,
    /// Sprint the task is planned into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<SprintId>,
    /// Parent task. Lookup-only; the raw data may contain cycles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<TaskId>,
    /// Effort estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<StoryPoints>,
    /// Position within the task's status column.
    #[serde(default)]
    pub order: i64,
    /// Assigned user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// When the task entered `FINISHED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a task snapshot in the `CREATED` status.
    #[must_use]
    pub fn new(id: TaskId, project_id: ProjectId, title: impl Into<String>, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            project_id,
            title: title.into(),
            description: None,
            status: TaskStatus::Created,
            priority: Priority::default(),
            epic_id: None,
            sprint_id: None,
            parent_task_id: None,
            story_points: None,
            order: 0,
            assignee: None,
            created_at: timestamp,
            updated_at: timestamp,
            finished_at: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status without validating the workflow.
    ///
    /// Intended for reconstructing persisted snapshots.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Places the task in an epic.
    #[must_use]
    pub const fn with_epic(mut self, epic_id: EpicId) -> Self {
        self.epic_id = Some(epic_id);
        self
    }

    /// Places the task in a sprint.
    #[must_use]
    pub const fn with_sprint(mut self, sprint_id: SprintId) -> Self {
        self.sprint_id = Some(sprint_id);
        self
    }

    /// Sets the parent task reference.
    #[must_use]
    pub const fn with_parent(mut self, parent_task_id: TaskId) -> Self {
        self.parent_task_id = Some(parent_task_id);
        self
    }

    /// Sets the story point estimate.
    #[must_use]
    pub const fn with_story_points(mut self, story_points: StoryPoints) -> Self {
        self.story_points = Some(story_points);
        self
    }

    /// Sets the column order.
    #[must_use]
    pub const fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the finish timestamp.
    #[must_use]
    pub const fn with_finished_at(mut self, finished_at: DateTime<Utc>) -> Self {
        self.finished_at = Some(finished_at);
        self
    }

    /// Story points, treating an absent estimate as zero.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.story_points.unwrap_or_default().value()
    }

    /// Returns `true` when the task is in `FINISHED`.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Calendar day (UTC) the task was finished on.
    ///
    /// Falls back to `updated_at` for finished snapshots that predate
    /// `finished_at` tracking. Returns `None` for unfinished tasks.
    #[must_use]
    pub fn finished_on(&self) -> Option<NaiveDate> {
        if !self.is_finished() {
            return None;
        }
        Some(self.finished_at.unwrap_or(self.updated_at).date_naive())
    }
}
