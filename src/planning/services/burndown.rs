//! Daily burndown series for a sprint.

use super::rollup::{TaskRollup, sprint_tasks};
use crate::planning::domain::{PlanningError, Sprint};
use crate::task::domain::Task;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Remaining work at the end of one sprint day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurndownPoint {
    /// Sprint day.
    pub date: NaiveDate,
    /// Story points not finished by the end of the day.
    pub remaining_story_points: u64,
    /// Linear target from the full commitment down to zero.
    pub ideal_remaining: f64,
}

/// Builds one point per day from the sprint's start to its end, inclusive.
///
/// A task counts as burnt down from the day it was finished. Tasks finished
/// before the sprint started are burnt down from the first point. The ideal
/// line starts at the total story points and reaches 0 on the last day; a
/// single-day sprint has an ideal of 0.
///
/// # Errors
///
/// Returns [`PlanningError::InvalidDateRange`] when the sprint ends before
/// it starts.
pub fn burndown(sprint: &Sprint, tasks: &[Task]) -> Result<Vec<BurndownPoint>, PlanningError> {
    let days = sprint.days()?;
    let members: Vec<&Task> = sprint_tasks(sprint.id, tasks).collect();
    let total = TaskRollup::from_tasks(members.iter().copied()).total_story_points;
    let last_index = days.len().saturating_sub(1);

    let points = days
        .into_iter()
        .enumerate()
        .map(|(index, date)| {
            let burnt: u64 = members
                .iter()
                .filter(|task| task.finished_on().is_some_and(|finished| finished <= date))
                .map(|task| u64::from(task.points()))
                .sum();
            BurndownPoint {
                date,
                remaining_story_points: total.saturating_sub(burnt),
                ideal_remaining: ideal_at(total, index, last_index),
            }
        })
        .collect::<Vec<_>>();

    debug!(
        sprint_id = %sprint.id,
        days = points.len(),
        total_story_points = total,
        "burndown computed"
    );
    Ok(points)
}

#[expect(
    clippy::float_arithmetic,
    reason = "the ideal line is a fractional interpolation"
)]
fn ideal_at(total: u64, index: usize, last_index: usize) -> f64 {
    if last_index == 0 {
        return 0.0;
    }
    let days_left = last_index.saturating_sub(index);
    lossy_f64(total) * lossy_f64(u64::try_from(days_left).unwrap_or(u64::MAX))
        / lossy_f64(u64::try_from(last_index).unwrap_or(u64::MAX))
}

/// Converts counts into floats; sprint-sized values are far below the
/// range where precision is lost.
fn lossy_f64(value: u64) -> f64 {
    f64::from(u32::try_from(value).unwrap_or(u32::MAX))
}
