//! Timer lifecycle and statistics service.

use crate::task::domain::{TaskId, UserId};
use crate::time_tracking::domain::{
    DEFAULT_WEEK_START, NewTimeEntry, TimeEntry, TimeEntryFilter, TimeEntryStats,
    TimeTrackingError, compute_stats, duration_between,
};
use chrono::Weekday;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Settings for time tracking calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TimeTrackingConfig {
    /// First day of the week for `this_week` statistics.
    pub week_start: Weekday,
}

impl Default for TimeTrackingConfig {
    fn default() -> Self {
        Self {
            week_start: DEFAULT_WEEK_START,
        }
    }
}

/// Request to start a timer for a user on a task.
#[derive(Debug, Clone, PartialEq)]
pub struct StartTimerRequest {
    task_id: TaskId,
    user_id: UserId,
    description: Option<String>,
    billable: bool,
    hourly_rate: Option<f64>,
}

impl StartTimerRequest {
    /// Creates a non-billable timer request.
    #[must_use]
    pub const fn new(task_id: TaskId, user_id: UserId) -> Self {
        Self {
            task_id,
            user_id,
            description: None,
            billable: false,
            hourly_rate: None,
        }
    }

    /// Marks the timed work billable, optionally at a rate.
    #[must_use]
    pub const fn billable(mut self, hourly_rate: Option<f64>) -> Self {
        self.billable = true;
        self.hourly_rate = hourly_rate;
        self
    }

    /// Sets the note.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the user starting the timer.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// Validates timer operations and aggregates time entries.
#[derive(Debug, Clone, Default)]
pub struct TimeTrackingService {
    config: TimeTrackingConfig,
}

impl TimeTrackingService {
    /// Creates a service with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service with a custom configuration.
    #[must_use]
    pub const fn with_config(config: TimeTrackingConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &TimeTrackingConfig {
        &self.config
    }

    /// Validates a timer start against the user's existing entries.
    ///
    /// `existing` may hold entries of any users and tasks; only the
    /// requesting user's active entries matter.
    ///
    /// # Errors
    ///
    /// Returns [`TimeTrackingError::TimerAlreadyActive`] when the user has a
    /// running entry on any task and [`TimeTrackingError::InvalidHourlyRate`]
    /// for negative or non-finite rates.
    pub fn start_timer(
        &self,
        existing: &[TimeEntry],
        request: StartTimerRequest,
        clock: &impl Clock,
    ) -> Result<NewTimeEntry, TimeTrackingError> {
        if let Some(rate) = request.hourly_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(TimeTrackingError::InvalidHourlyRate(rate.to_string()));
            }
        }
        if let Some(running) = existing
            .iter()
            .find(|entry| entry.is_active && entry.user_id == request.user_id)
        {
            debug!(user_id = %request.user_id, entry_id = %running.id, "timer start rejected");
            return Err(TimeTrackingError::TimerAlreadyActive {
                user_id: request.user_id,
                entry_id: running.id,
                task_id: running.task_id,
            });
        }

        let now = clock.utc();
        info!(user_id = %request.user_id, task_id = %request.task_id, "timer started");
        Ok(NewTimeEntry {
            task_id: request.task_id,
            user_id: request.user_id,
            description: request.description,
            start_time: now,
            is_active: true,
            billable: request.billable,
            hourly_rate: request.hourly_rate,
            created_at: now,
        })
    }

    /// Stops a running entry.
    ///
    /// Stopping an entry that is not active returns it unchanged.
    #[must_use]
    pub fn stop_timer(&self, entry: &TimeEntry, clock: &impl Clock) -> TimeEntry {
        if !entry.is_active {
            debug!(entry_id = %entry.id, "stop ignored for inactive entry");
            return entry.clone();
        }
        let now = clock.utc();
        let mut stopped = entry.clone();
        stopped.end_time = Some(now);
        stopped.duration_minutes = duration_between(entry.start_time, now);
        stopped.is_active = false;
        info!(
            entry_id = %entry.id,
            user_id = %entry.user_id,
            minutes = stopped.duration_minutes,
            "timer stopped"
        );
        stopped
    }

    /// Stops whichever entry the user has running.
    ///
    /// # Errors
    ///
    /// Returns [`TimeTrackingError::NoActiveTimer`] when the user has no
    /// running entry.
    pub fn stop_active_timer(
        &self,
        entries: &[TimeEntry],
        user_id: &UserId,
        clock: &impl Clock,
    ) -> Result<TimeEntry, TimeTrackingError> {
        entries
            .iter()
            .find(|entry| entry.is_active && &entry.user_id == user_id)
            .map(|entry| self.stop_timer(entry, clock))
            .ok_or_else(|| TimeTrackingError::NoActiveTimer(user_id.clone()))
    }

    /// The user's running entry, if any.
    #[must_use]
    pub fn active_timer<'a>(&self, entries: &'a [TimeEntry], user_id: &UserId) -> Option<&'a TimeEntry> {
        entries
            .iter()
            .find(|entry| entry.is_active && &entry.user_id == user_id)
    }

    /// Statistics over all entries relative to the clock's current time.
    #[must_use]
    pub fn stats(&self, entries: &[TimeEntry], clock: &impl Clock) -> TimeEntryStats {
        compute_stats(entries, clock.utc(), self.config.week_start)
    }

    /// Statistics over the entries matching `filter`.
    #[must_use]
    pub fn filtered_stats(
        &self,
        entries: &[TimeEntry],
        filter: &TimeEntryFilter,
        clock: &impl Clock,
    ) -> TimeEntryStats {
        compute_stats(filter.apply(entries), clock.utc(), self.config.week_start)
    }
}
