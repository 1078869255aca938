//! Domain model for time entries and their statistics.

mod entry;
mod error;
mod stats;

pub use entry::{NewTimeEntry, TimeEntry, TimeEntryId, duration_between};
pub use error::TimeTrackingError;
pub use stats::{
    DEFAULT_WEEK_START, PeriodBounds, TimeEntryFilter, TimeEntryStats, compute_stats,
    totals_by_task, totals_by_user,
};
