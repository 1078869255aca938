//! Time entries and duration arithmetic.

use crate::task::domain::{TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a time entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeEntryId(i64);

impl TimeEntryId {
    /// Wraps a persisted time entry identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TimeEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whole minutes from `start` to `end`, clamped at zero.
///
/// An end before the start yields 0 rather than an error.
#[must_use]
pub fn duration_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    let minutes = end.signed_duration_since(start).num_minutes().max(0);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Work logged by one user against one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    /// Entry identifier.
    pub id: TimeEntryId,
    /// Task the time was spent on.
    pub task_id: TaskId,
    /// User who logged the time.
    pub user_id: UserId,
    /// Free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the work started.
    pub start_time: DateTime<Utc>,
    /// When the work stopped; absent while the timer runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Logged minutes.
    #[serde(rename = "duration", default)]
    pub duration_minutes: u32,
    /// Whether the timer is still running.
    #[serde(default)]
    pub is_active: bool,
    /// Whether the time can be billed.
    #[serde(default)]
    pub billable: bool,
    /// Rate per hour for billable time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    /// When the entry was recorded. Period statistics bucket on this value.
    pub created_at: DateTime<Utc>,
}

impl TimeEntry {
    /// Creates a stopped, non-billable entry with no logged minutes.
    ///
    /// `created_at` defaults to `start_time`.
    #[must_use]
    pub const fn new(
        id: TimeEntryId,
        task_id: TaskId,
        user_id: UserId,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            user_id,
            description: None,
            start_time,
            end_time: None,
            duration_minutes: 0,
            is_active: false,
            billable: false,
            hourly_rate: None,
            created_at: start_time,
        }
    }

    /// Sets the logged minutes directly.
    #[must_use]
    pub const fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Sets the end time and derives the duration from it.
    #[must_use]
    pub fn with_end_time(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = Some(end_time);
        self.duration_minutes = duration_between(self.start_time, end_time);
        self
    }

    /// Marks the entry billable, optionally at a rate.
    #[must_use]
    pub const fn billable(mut self, hourly_rate: Option<f64>) -> Self {
        self.billable = true;
        self.hourly_rate = hourly_rate;
        self
    }

    /// Marks the timer as running.
    #[must_use]
    pub const fn running(mut self) -> Self {
        self.is_active = true;
        self.end_time = None;
        self
    }

    /// Overrides the recording timestamp.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets the note.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Minutes spent so far: the running span for active timers, the logged
    /// duration otherwise.
    #[must_use]
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> u32 {
        if self.is_active {
            duration_between(self.start_time, now)
        } else {
            self.duration_minutes
        }
    }

    /// Earnings for this entry, if it is billable and has a rate.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "earnings are fractional currency amounts"
    )]
    pub fn earnings(&self) -> Option<f64> {
        if !self.billable {
            return None;
        }
        self.hourly_rate
            .map(|rate| f64::from(self.duration_minutes) / 60.0 * rate)
    }
}

/// Draft of a timer entry for the caller to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeEntry {
    /// Task the timer runs against.
    pub task_id: TaskId,
    /// User running the timer.
    pub user_id: UserId,
    /// Free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the timer started.
    pub start_time: DateTime<Utc>,
    /// Always `true` for a freshly started timer.
    pub is_active: bool,
    /// Whether the time can be billed.
    pub billable: bool,
    /// Rate per hour for billable time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    /// Recording timestamp, equal to the start time.
    pub created_at: DateTime<Utc>,
}

impl NewTimeEntry {
    /// Materialises the draft once storage has assigned an identifier.
    #[must_use]
    pub fn into_entry(self, id: TimeEntryId) -> TimeEntry {
        TimeEntry {
            id,
            task_id: self.task_id,
            user_id: self.user_id,
            description: self.description,
            start_time: self.start_time,
            end_time: None,
            duration_minutes: 0,
            is_active: self.is_active,
            billable: self.billable,
            hourly_rate: self.hourly_rate,
            created_at: self.created_at,
        }
    }
}
