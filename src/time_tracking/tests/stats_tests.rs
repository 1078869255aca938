//! Unit tests for time entry aggregation.

use crate::task::domain::TaskId;
use crate::test_support::{FixedClock, user, utc};
use crate::time_tracking::{
    domain::{
        DEFAULT_WEEK_START, PeriodBounds, TimeEntry, TimeEntryFilter, TimeEntryId,
        TimeEntryStats, compute_stats, duration_between, totals_by_task, totals_by_user,
    },
    services::{TimeTrackingConfig, TimeTrackingService},
};
use chrono::{DateTime, Utc, Weekday};
use rstest::{fixture, rstest};

/// Wednesday 2024-05-15 15:00 UTC.
#[fixture]
fn clock() -> FixedClock {
    FixedClock::at(2024, 5, 15, 15, 0)
}

fn entry(id: i64, minutes: u32, created_at: DateTime<Utc>) -> TimeEntry {
    TimeEntry::new(TimeEntryId::new(id), TaskId::new(1), user("u1"), created_at)
        .with_duration(minutes)
}

#[rstest]
fn worked_example_from_billing(clock: FixedClock) {
    let at = utc(2024, 5, 15, 9, 0);
    let entries = [
        entry(1, 30, at).billable(Some(20.0)),
        entry(2, 90, at),
    ];

    let stats = TimeTrackingService::new().stats(&entries, &clock);

    assert_eq!(stats.total_time, 120);
    assert_eq!(stats.billable_time, 30);
    assert_eq!(stats.total_earnings, 10.0);
    assert_eq!(stats.average_session_time, 60);
    assert_eq!(stats.entry_count, 2);
}

#[rstest]
fn billable_entry_without_rate_counts_as_billable_time_only(clock: FixedClock) {
    let at = utc(2024, 5, 15, 9, 0);
    let entries = [
        entry(1, 45, at).billable(None),
        entry(2, 60, at).billable(Some(30.0)),
        entry(3, 60, at).with_duration(60),
    ];

    let stats = TimeTrackingService::new().stats(&entries, &clock);

    assert_eq!(stats.billable_time, 105);
    assert_eq!(stats.total_earnings, 30.0);
}

#[rstest]
fn non_billable_rate_is_ignored(clock: FixedClock) {
    let mut unbilled = entry(1, 60, utc(2024, 5, 15, 9, 0));
    unbilled.hourly_rate = Some(100.0);

    let stats = TimeTrackingService::new().stats(&[unbilled], &clock);

    assert_eq!(stats.total_earnings, 0.0);
}

#[rstest]
fn empty_input_yields_zeroes(clock: FixedClock) {
    let stats = TimeTrackingService::new().stats(&[], &clock);
    assert_eq!(stats, TimeEntryStats::default());
}

#[rstest]
fn periods_bucket_on_creation_time(clock: FixedClock) {
    let entries = [
        // today
        entry(1, 10, utc(2024, 5, 15, 0, 5)),
        // Sunday of the same week
        entry(2, 20, utc(2024, 5, 12, 8, 0)),
        // previous Saturday, same month
        entry(3, 40, utc(2024, 5, 11, 23, 59)),
        // previous month
        entry(4, 80, utc(2024, 4, 30, 12, 0)),
        // started long ago but recorded today
        TimeEntry::new(TimeEntryId::new(5), TaskId::new(1), user("u1"), utc(2024, 1, 1, 0, 0))
            .with_duration(160)
            .with_created_at(utc(2024, 5, 15, 14, 0)),
    ];

    let stats = TimeTrackingService::new().stats(&entries, &clock);

    assert_eq!(stats.today_time, 170);
    assert_eq!(stats.this_week_time, 190);
    assert_eq!(stats.this_month_time, 230);
    assert_eq!(stats.total_time, 310);
}

#[rstest]
fn week_start_is_configurable(clock: FixedClock) {
    let sunday_entry = [entry(1, 20, utc(2024, 5, 12, 8, 0))];
    let monday_weeks = TimeTrackingService::with_config(TimeTrackingConfig {
        week_start: Weekday::Mon,
    });

    assert_eq!(
        TimeTrackingService::new().stats(&sunday_entry, &clock).this_week_time,
        20
    );
    assert_eq!(monday_weeks.stats(&sunday_entry, &clock).this_week_time, 0);
}

#[rstest]
fn default_week_starts_on_sunday() {
    assert_eq!(DEFAULT_WEEK_START, Weekday::Sun);
    let bounds = PeriodBounds::around(utc(2024, 5, 18, 23, 0), DEFAULT_WEEK_START);
    assert_eq!(bounds.week.0.to_string(), "2024-05-12");
    assert_eq!(bounds.week.1.to_string(), "2024-05-19");
    assert_eq!(bounds.month.1.to_string(), "2024-06-01");
}

#[rstest]
#[case(utc(2024, 1, 1, 10, 0), utc(2024, 1, 1, 11, 30), 90)]
#[case(utc(2024, 1, 1, 10, 0), utc(2024, 1, 1, 10, 0), 0)]
#[case(utc(2024, 1, 1, 10, 0), utc(2024, 1, 1, 9, 0), 0)]
fn duration_between_clamps_negative_spans(
    #[case] start: DateTime<Utc>,
    #[case] end: DateTime<Utc>,
    #[case] expected: u32,
) {
    assert_eq!(duration_between(start, end), expected);
}

#[rstest]
fn average_truncates_to_whole_minutes() {
    let at = utc(2024, 5, 15, 9, 0);
    let entries = [entry(1, 10, at), entry(2, 15, at)];

    let stats = compute_stats(&entries, at, DEFAULT_WEEK_START);

    assert_eq!(stats.average_session_time, 12);
}

#[rstest]
fn filter_narrows_before_aggregation(clock: FixedClock) {
    let at = utc(2024, 5, 15, 9, 0);
    let other_user = TimeEntry::new(TimeEntryId::new(3), TaskId::new(2), user("u2"), at)
        .with_duration(100)
        .billable(Some(10.0));
    let entries = [
        entry(1, 30, at).billable(Some(20.0)),
        entry(2, 90, at),
        other_user,
    ];
    let filter = TimeEntryFilter::new().for_user(user("u2")).billable(true);

    let stats = TimeTrackingService::new().filtered_stats(&entries, &filter, &clock);

    assert_eq!(stats.total_time, 100);
    assert_eq!(filter.apply(&entries).len(), 1);
    assert_eq!(
        TimeEntryFilter::new()
            .for_task(TaskId::new(1))
            .created_between(utc(2024, 5, 15, 0, 0), utc(2024, 5, 15, 9, 0))
            .apply(&entries)
            .len(),
        0
    );
}

#[rstest]
fn totals_group_by_task_and_user() {
    let at = utc(2024, 5, 15, 9, 0);
    let entries = [
        entry(1, 30, at),
        entry(2, 15, at),
        TimeEntry::new(TimeEntryId::new(3), TaskId::new(2), user("u2"), at).with_duration(5),
    ];

    let by_task = totals_by_task(&entries);
    let by_user = totals_by_user(&entries);

    assert_eq!(by_task.get(&TaskId::new(1)), Some(&45));
    assert_eq!(by_task.get(&TaskId::new(2)), Some(&5));
    assert_eq!(by_user.get(&user("u1")), Some(&45));
    assert_eq!(by_user.get(&user("u2")), Some(&5));
}
