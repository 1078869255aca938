//! Unit tests for the planning module.


use crate::task::domain::{ProjectId, SprintId, StoryPoints, Task, TaskId, TaskStatus};
use crate::test_support::{FixedClock, utc};

/// Task of project 1 planned into `sprint` with the given estimate.
fn sprint_task(id: i64, sprint: i64, points: u32, status: TaskStatus) -> Task {
    let clock = FixedClock::at(2024, 6, 1, 9, 0);
    Task::new(TaskId::new(id), ProjectId::new(1), format!("task {id}"), &clock)
        .with_sprint(SprintId::new(sprint))
        .with_story_points(StoryPoints::from(points))
        .with_status(status)
}

/// Finished sprint task stamped with its finishing day.
fn finished_on(id: i64, sprint: i64, points: u32, day: u32) -> Task {
    sprint_task(id, sprint, points, TaskStatus::Finished).with_finished_at(utc(2024, 6, day, 17, 0))
}
