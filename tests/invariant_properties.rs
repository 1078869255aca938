//! Property tests for the aggregation and workflow invariants.

mod test_helpers;

use proptest::prelude::*;
use sprintkit::planning::domain::Sprint;
use sprintkit::planning::services::{TaskRollup, burndown};
use sprintkit::task::domain::{
    ChecklistItem, ChecklistItemId, ProjectId, ReorderChecklistRequest, SprintId, StoryPoints,
    Task, TaskDomainError, TaskId, TaskStatus, TaskTree, reorder_checklist,
};
use sprintkit::time_tracking::domain::{
    DEFAULT_WEEK_START, TimeEntry, TimeEntryId, compute_stats,
};
use test_helpers::{FixedClock, date, user, utc};

fn status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop::sample::select(TaskStatus::ALL.to_vec())
}

fn entry_strategy() -> impl Strategy<Value = TimeEntry> {
    (
        1_i64..1_000,
        0_u32..600,
        any::<bool>(),
        prop::option::of(0_u32..500),
        0_u32..60,
    )
        .prop_map(|(id, minutes, billable, rate, day_offset)| {
            let created = utc(2024, 3, 1, 12, 0) + chrono::Duration::days(i64::from(day_offset));
            let mut entry = TimeEntry::new(TimeEntryId::new(id), TaskId::new(1), user("u1"), created)
                .with_duration(minutes);
            if billable {
                entry = entry.billable(rate.map(f64::from));
            }
            entry
        })
}

fn sprint_task(id: i64, points: u32, status: TaskStatus) -> Task {
    let clock = FixedClock::at(2024, 6, 1, 9, 0);
    Task::new(TaskId::new(id), ProjectId::new(1), format!("task {id}"), &clock)
        .with_sprint(SprintId::new(1))
        .with_story_points(StoryPoints::from(points))
        .with_status(status)
}

proptest! {
    #[test]
    fn prop_stats_bounds_hold(entries in prop::collection::vec(entry_strategy(), 0..20)) {
        let now = utc(2024, 4, 15, 12, 0);
        let stats = compute_stats(&entries, now, DEFAULT_WEEK_START);

        prop_assert!(stats.billable_time <= stats.total_time);
        prop_assert!(stats.total_earnings >= 0.0);
        prop_assert!(stats.this_month_time <= stats.total_time);
        prop_assert!(stats.this_week_time <= stats.total_time);
        prop_assert!(stats.today_time <= stats.this_week_time);
        let count = u64::try_from(entries.len()).unwrap_or(u64::MAX);
        prop_assert_eq!(stats.entry_count, count);
        prop_assert_eq!(stats.average_session_time, stats.total_time.checked_div(count).unwrap_or(0));
    }

    #[test]
    fn prop_stats_ignore_input_order(
        entries in prop::collection::vec(entry_strategy(), 0..20)
            .prop_flat_map(|entries| (Just(entries.clone()), Just(entries).prop_shuffle()))
    ) {
        let (original, shuffled) = entries;
        let now = utc(2024, 4, 15, 12, 0);

        let left = compute_stats(&original, now, DEFAULT_WEEK_START);
        let right = compute_stats(&shuffled, now, DEFAULT_WEEK_START);

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_progress_stays_in_range(
        tasks in prop::collection::vec((0_u32..40, status_strategy()), 0..30)
    ) {
        let tasks: Vec<Task> = (1_i64..)
            .zip(tasks)
            .map(|(id, (points, status))| sprint_task(id, points, status))
            .collect();

        let rollup = TaskRollup::from_tasks(&tasks);

        prop_assert!(rollup.progress <= 100);
        prop_assert!(rollup.completed_story_points <= rollup.total_story_points);
        if rollup.total_story_points == 0 {
            prop_assert_eq!(rollup.progress, 0);
        }
    }

    #[test]
    fn prop_burndown_spans_the_sprint(
        length in 0_u64..30,
        points in prop::collection::vec(0_u32..13, 0..10),
    ) {
        let start = date(2024, 6, 3);
        let end = start + chrono::Days::new(length);
        let sprint = Sprint::new(SprintId::new(1), ProjectId::new(1), "Sprint", start, end)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let tasks: Vec<Task> = (1_i64..)
            .zip(points)
            .map(|(id, estimate)| sprint_task(id, estimate, TaskStatus::InProgress))
            .collect();
        let total = TaskRollup::from_tasks(&tasks).total_story_points;

        let series = burndown(&sprint, &tasks).map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert_eq!(u64::try_from(series.len()).unwrap_or(u64::MAX), length + 1);
        let first = series.first().ok_or_else(|| TestCaseError::fail("empty series"))?;
        let last = series.last().ok_or_else(|| TestCaseError::fail("empty series"))?;
        prop_assert_eq!(last.ideal_remaining, 0.0);
        if length > 0 {
            prop_assert_eq!(first.ideal_remaining, f64::from(u32::try_from(total).unwrap_or(u32::MAX)));
        }
        prop_assert!(series.iter().all(|point| point.remaining_story_points == total));
    }

    #[test]
    fn prop_finished_is_terminal_and_created_is_initial(from in status_strategy(), to in status_strategy()) {
        prop_assert!(!TaskStatus::Finished.can_transition_to(to));
        prop_assert!(!from.can_transition_to(TaskStatus::Created));
        prop_assert!(!from.can_transition_to(from));
    }

    #[test]
    fn prop_duplicate_checklist_orders_change_nothing(
        count in 2_i64..8,
        order in -5_i64..5,
    ) {
        let items: Vec<ChecklistItem> = (1..=count)
            .map(|id| ChecklistItem::new(ChecklistItemId::new(id), TaskId::new(1), format!("item {id}"), id))
            .collect();
        let request = ReorderChecklistRequest::new(
            TaskId::new(1),
            [(ChecklistItemId::new(1), order), (ChecklistItemId::new(2), order)],
        );

        let result = reorder_checklist(&items, &request);

        prop_assert!(
            matches!(result, Err(TaskDomainError::DuplicateOrder { .. })),
            "expected DuplicateOrder error"
        );
    }

    #[test]
    fn prop_parent_chains_terminate(parents in prop::collection::vec(prop::option::of(1_i64..12), 1..12)) {
        let clock = FixedClock::at(2024, 6, 1, 9, 0);
        let tasks: Vec<Task> = (1_i64..)
            .zip(parents)
            .map(|(id, parent)| {
                let task = Task::new(TaskId::new(id), ProjectId::new(1), "node", &clock);
                match parent {
                    Some(parent_id) => task.with_parent(TaskId::new(parent_id)),
                    None => task,
                }
            })
            .collect();
        let tree = TaskTree::new(&tasks);

        for task in &tasks {
            match tree.ancestors(task.id) {
                Ok(chain) => prop_assert!(chain.len() <= tasks.len()),
                Err(err) => prop_assert!(matches!(err, TaskDomainError::CycleDetected(_))),
            }
            if let Err(err) = tree.subtask_rollup(task.id) {
                prop_assert!(matches!(err, TaskDomainError::CycleDetected(_)));
            }
        }
    }
}
