//! Team velocity over recently completed sprints.

use super::rollup::sprint_rollup;
use crate::percent::count_u64;
use crate::planning::domain::{Sprint, SprintStatus};
use crate::task::domain::{SprintId, Task};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Delivered work of one completed sprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintVelocity {
    /// The sprint.
    pub sprint_id: SprintId,
    /// Sprint name.
    pub name: String,
    /// Last day of the sprint.
    pub end_date: NaiveDate,
    /// Story points committed to the sprint.
    pub committed_story_points: u64,
    /// Story points finished in the sprint.
    pub completed_story_points: u64,
}

/// Velocity across a window of completed sprints, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityReport {
    /// Per-sprint figures.
    pub sprints: Vec<SprintVelocity>,
    /// Mean completed story points per sprint in the window; 0 when empty.
    pub average_velocity: f64,
}

/// Computes velocity over the `window` most recently completed sprints.
///
/// Sprints are ranked by end date and then id, both descending. Only
/// `COMPLETED` sprints count. The average is taken over the sprints that
/// made it into the window, which may be fewer than `window`.
#[must_use]
pub fn velocity(sprints: &[Sprint], tasks: &[Task], window: usize) -> VelocityReport {
    let mut completed: Vec<&Sprint> = sprints
        .iter()
        .filter(|sprint| sprint.status == SprintStatus::Completed)
        .collect();
    completed.sort_by_key(|sprint| Reverse((sprint.end_date, sprint.id)));
    completed.truncate(window);

    let rows: Vec<SprintVelocity> = completed
        .into_iter()
        .map(|sprint| {
            let rollup = sprint_rollup(sprint.id, tasks);
            SprintVelocity {
                sprint_id: sprint.id,
                name: sprint.name.clone(),
                end_date: sprint.end_date,
                committed_story_points: rollup.total_story_points,
                completed_story_points: rollup.completed_story_points,
            }
        })
        .collect();

    let total: u64 = rows.iter().map(|row| row.completed_story_points).sum();
    VelocityReport {
        average_velocity: mean(total, count_u64(rows.len())),
        sprints: rows,
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "average velocity is reported with its fractional part"
)]
fn mean(total: u64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let to_f64 = |value: u64| f64::from(u32::try_from(value).unwrap_or(u32::MAX));
    to_f64(total) / to_f64(count)
}
