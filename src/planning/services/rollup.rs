//! Story point and task count aggregation.

use crate::percent::{count_u64, rounded_percent};
use crate::planning::domain::Sprint;
use crate::task::domain::{EpicId, SprintId, Task, TaskStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived totals over a set of tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRollup {
    /// Story points across all tasks.
    pub total_story_points: u64,
    /// Story points of finished tasks.
    pub completed_story_points: u64,
    /// Completed share of story points, rounded to a whole percent.
    pub progress: u8,
    /// Number of tasks.
    pub total_tasks: u64,
    /// Number of finished tasks.
    pub completed_tasks: u64,
}

impl TaskRollup {
    /// Aggregates the given tasks.
    ///
    /// Tasks without story points count as zero. Progress is 0 when no
    /// story points are committed, even if tasks are finished.
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut rollup = Self::default();
        for task in tasks {
            let points = u64::from(task.points());
            rollup.total_tasks += 1;
            rollup.total_story_points += points;
            if task.is_finished() {
                rollup.completed_tasks += 1;
                rollup.completed_story_points += points;
            }
        }
        rollup.progress = rounded_percent(rollup.completed_story_points, rollup.total_story_points);
        rollup
    }

    /// Story points not yet finished.
    #[must_use]
    pub const fn remaining_story_points(&self) -> u64 {
        self.total_story_points
            .saturating_sub(self.completed_story_points)
    }
}

/// Tasks of the snapshot that belong to the sprint.
pub fn sprint_tasks(sprint_id: SprintId, tasks: &[Task]) -> impl Iterator<Item = &Task> {
    tasks
        .iter()
        .filter(move |task| task.sprint_id == Some(sprint_id))
}

/// Tasks of the snapshot that belong to the epic.
pub fn epic_tasks(epic_id: EpicId, tasks: &[Task]) -> impl Iterator<Item = &Task> {
    tasks
        .iter()
        .filter(move |task| task.epic_id == Some(epic_id))
}

/// Rollup of the sprint's member tasks.
#[must_use]
pub fn sprint_rollup(sprint_id: SprintId, tasks: &[Task]) -> TaskRollup {
    TaskRollup::from_tasks(sprint_tasks(sprint_id, tasks))
}

/// Rollup of the epic's member tasks.
#[must_use]
pub fn epic_rollup(epic_id: EpicId, tasks: &[Task]) -> TaskRollup {
    TaskRollup::from_tasks(epic_tasks(epic_id, tasks))
}

/// Number of tasks in each status. Statuses without tasks map to 0.
#[must_use]
pub fn status_breakdown<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> BTreeMap<TaskStatus, u64> {
    let mut counts: BTreeMap<TaskStatus, u64> =
        TaskStatus::ALL.into_iter().map(|status| (status, 0)).collect();
    for task in tasks {
        *counts.entry(task.status).or_insert(0) += 1;
    }
    counts
}

/// Committed story points measured against a sprint's capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityUsage {
    /// Story points the sprint was planned for.
    pub capacity: u32,
    /// Story points of all member tasks.
    pub committed: u64,
    /// Committed share of capacity, capped at 100.
    pub percent: u8,
    /// Whether more was committed than planned.
    pub over_capacity: bool,
}

/// Capacity usage of a sprint, or `None` when it has no capacity set.
#[must_use]
pub fn capacity_usage(sprint: &Sprint, tasks: &[Task]) -> Option<CapacityUsage> {
    let capacity = sprint.capacity?;
    let committed = sprint_rollup(sprint.id, tasks).total_story_points;
    let planned = u64::from(capacity);
    Some(CapacityUsage {
        capacity,
        committed,
        percent: if planned == 0 && committed > 0 {
            100
        } else {
            rounded_percent(committed, planned)
        },
        over_capacity: committed > planned,
    })
}

/// Share of the given tasks that are finished, by count.
#[must_use]
pub fn completion_by_count(rollup: &TaskRollup) -> u8 {
    rounded_percent(rollup.completed_tasks, rollup.total_tasks)
}

/// Counts tasks without story points; useful when progress looks stalled.
#[must_use]
pub fn unestimated_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> u64 {
    count_u64(
        tasks
            .into_iter()
            .filter(|task| task.story_points.is_none())
            .count(),
    )
}
