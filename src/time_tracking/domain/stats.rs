//! Aggregate statistics over time entries.

use super::TimeEntry;
use crate::task::domain::{TaskId, UserId};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// First day of the week used for `this_week` bucketing unless configured
/// otherwise. Fixed rather than taken from the system locale.
pub const DEFAULT_WEEK_START: Weekday = Weekday::Sun;

/// Half-open calendar ranges `[start, end)` around a reference instant.
///
/// Calendar days are evaluated in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodBounds {
    /// The reference day.
    pub today: (NaiveDate, NaiveDate),
    /// The week containing the reference day.
    pub week: (NaiveDate, NaiveDate),
    /// The month containing the reference day.
    pub month: (NaiveDate, NaiveDate),
}

impl PeriodBounds {
    /// Computes the day, week, and month around `now`.
    #[must_use]
    pub fn around(now: DateTime<Utc>, week_start: Weekday) -> Self {
        let today = now.date_naive();
        let offset = (today.weekday().num_days_from_monday() + 7)
            .checked_sub(week_start.num_days_from_monday())
            .and_then(|days| days.checked_rem(7))
            .unwrap_or(0);
        let week_first = today
            .checked_sub_days(Days::new(u64::from(offset)))
            .unwrap_or(today);
        let month_first = today.with_day(1).unwrap_or(today);
        Self {
            today: (today, next_day(today, 1)),
            week: (week_first, next_day(week_first, 7)),
            month: (
                month_first,
                month_first
                    .checked_add_months(Months::new(1))
                    .unwrap_or(NaiveDate::MAX),
            ),
        }
    }
}

fn next_day(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

fn within(date: NaiveDate, (start, end): (NaiveDate, NaiveDate)) -> bool {
    start <= date && date < end
}

/// Summary of a set of time entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryStats {
    /// Minutes across all entries.
    pub total_time: u64,
    /// Minutes across billable entries.
    pub billable_time: u64,
    /// Earnings across billable entries that carry a rate.
    pub total_earnings: f64,
    /// Minutes of entries recorded today.
    pub today_time: u64,
    /// Minutes of entries recorded this week.
    pub this_week_time: u64,
    /// Minutes of entries recorded this month.
    pub this_month_time: u64,
    /// Mean minutes per entry, truncated; 0 without entries.
    pub average_session_time: u64,
    /// Number of entries summarised.
    pub entry_count: u64,
}

/// Aggregates time entries relative to the reference instant `now`.
///
/// Period buckets use each entry's `created_at`, not its start or end time.
/// The result does not depend on the order of `entries`.
#[must_use]
pub fn compute_stats<'a>(
    entries: impl IntoIterator<Item = &'a TimeEntry>,
    now: DateTime<Utc>,
    week_start: Weekday,
) -> TimeEntryStats {
    let bounds = PeriodBounds::around(now, week_start);
    let mut stats = TimeEntryStats::default();
    let mut earnings = Vec::new();

    for entry in entries {
        let minutes = u64::from(entry.duration_minutes);
        let recorded_on = entry.created_at.date_naive();
        stats.entry_count += 1;
        stats.total_time += minutes;
        if entry.billable {
            stats.billable_time += minutes;
        }
        if let Some(amount) = entry.earnings() {
            earnings.push(amount);
        }
        if within(recorded_on, bounds.today) {
            stats.today_time += minutes;
        }
        if within(recorded_on, bounds.week) {
            stats.this_week_time += minutes;
        }
        if within(recorded_on, bounds.month) {
            stats.this_month_time += minutes;
        }
    }

    stats.total_earnings = sum_in_canonical_order(earnings);
    stats.average_session_time = stats
        .total_time
        .checked_div(stats.entry_count)
        .unwrap_or(0);
    stats
}

/// Sums amounts in ascending order so the total is the same for any input
/// permutation. An empty input sums to positive zero.
#[expect(clippy::float_arithmetic, reason = "earnings are fractional currency amounts")]
fn sum_in_canonical_order(mut amounts: Vec<f64>) -> f64 {
    amounts.sort_by(f64::total_cmp);
    amounts.into_iter().fold(0.0, |total, amount| total + amount)
}

/// Logged minutes per task.
#[must_use]
pub fn totals_by_task<'a>(entries: impl IntoIterator<Item = &'a TimeEntry>) -> BTreeMap<TaskId, u64> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        *totals.entry(entry.task_id).or_insert(0) += u64::from(entry.duration_minutes);
    }
    totals
}

/// Logged minutes per user.
#[must_use]
pub fn totals_by_user<'a>(entries: impl IntoIterator<Item = &'a TimeEntry>) -> BTreeMap<UserId, u64> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        *totals.entry(entry.user_id.clone()).or_insert(0) += u64::from(entry.duration_minutes);
    }
    totals
}

/// Criteria narrowing the entries fed into the aggregations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeEntryFilter {
    /// Only entries of this task.
    pub task_id: Option<TaskId>,
    /// Only entries of this user.
    pub user_id: Option<UserId>,
    /// Only billable (`true`) or non-billable (`false`) entries.
    pub billable: Option<bool>,
    /// Only entries recorded at or after this instant.
    pub created_from: Option<DateTime<Utc>>,
    /// Only entries recorded before this instant.
    pub created_until: Option<DateTime<Utc>>,
}

impl TimeEntryFilter {
    /// Creates a filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to a task.
    #[must_use]
    pub const fn for_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Restricts to a user.
    #[must_use]
    pub fn for_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Restricts by billable flag.
    #[must_use]
    pub const fn billable(mut self, billable: bool) -> Self {
        self.billable = Some(billable);
        self
    }

    /// Restricts to entries recorded in `[from, until)`.
    #[must_use]
    pub const fn created_between(mut self, from: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        self.created_from = Some(from);
        self.created_until = Some(until);
        self
    }

    /// Returns `true` when the entry satisfies every criterion.
    #[must_use]
    pub fn matches(&self, entry: &TimeEntry) -> bool {
        self.task_id.is_none_or(|task_id| entry.task_id == task_id)
            && self
                .user_id
                .as_ref()
                .is_none_or(|user_id| &entry.user_id == user_id)
            && self.billable.is_none_or(|billable| entry.billable == billable)
            && self.created_from.is_none_or(|from| entry.created_at >= from)
            && self.created_until.is_none_or(|until| entry.created_at < until)
    }

    /// Returns the matching entries in input order.
    #[must_use]
    pub fn apply<'a>(&self, entries: &'a [TimeEntry]) -> Vec<&'a TimeEntry> {
        entries.iter().filter(|entry| self.matches(entry)).collect()
    }
}
