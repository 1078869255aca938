//! Sprints and their lifecycle.

use super::{ParseSprintStatusError, PlanningError};
use crate::task::domain::{ProjectId, SprintId};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a sprint.
///
/// ```text
/// PLANNED -> ACTIVE | CANCELLED
/// ACTIVE  -> COMPLETED | CANCELLED
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SprintStatus {
    /// Scheduled but not started.
    #[default]
    Planned,
    /// Currently running.
    Active,
    /// Finished as planned.
    Completed,
    /// Abandoned.
    Cancelled,
}

impl SprintStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "PLANNED",
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns whether the lifecycle permits moving to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Planned, Self::Active | Self::Cancelled)
                | (Self::Active, Self::Completed | Self::Cancelled)
        )
    }

    /// Returns `true` once the sprint can no longer change.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SprintStatus {
    type Error = ParseSprintStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PLANNED" => Ok(Self::Planned),
            "ACTIVE" => Ok(Self::Active),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" | "CANCELED" => Ok(Self::Cancelled),
            _ => Err(ParseSprintStatusError(value.to_owned())),
        }
    }
}

/// A time-boxed iteration of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    /// Sprint identifier.
    pub id: SprintId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Display name.
    pub name: String,
    /// What the sprint sets out to achieve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: SprintStatus,
    /// First day of the sprint.
    pub start_date: NaiveDate,
    /// Last day of the sprint, inclusive.
    pub end_date: NaiveDate,
    /// Story points the team expects to deliver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl Sprint {
    /// Creates a planned sprint without goal or capacity.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::InvalidDateRange`] when `end_date` precedes
    /// `start_date`.
    pub fn new(
        id: SprintId,
        project_id: ProjectId,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, PlanningError> {
        let sprint = Self {
            id,
            project_id,
            name: name.into(),
            goal: None,
            status: SprintStatus::Planned,
            start_date,
            end_date,
            capacity: None,
        };
        sprint.validate_dates()?;
        Ok(sprint)
    }

    /// Sets the goal.
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: SprintStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the capacity from an unchecked story point count.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::InvalidCapacity`] for negative or oversized
    /// values.
    pub fn with_capacity(mut self, capacity: i64) -> Result<Self, PlanningError> {
        let points = u32::try_from(capacity).map_err(|_| PlanningError::InvalidCapacity(capacity))?;
        self.capacity = Some(points);
        Ok(self)
    }

    /// Checks that the sprint does not end before it starts.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::InvalidDateRange`] when `end_date` precedes
    /// `start_date`.
    pub fn validate_dates(&self) -> Result<(), PlanningError> {
        if self.end_date < self.start_date {
            return Err(PlanningError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Every day of the sprint, start and end included.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::InvalidDateRange`] for inverted dates.
    pub fn days(&self) -> Result<Vec<NaiveDate>, PlanningError> {
        self.validate_dates()?;
        let mut days = Vec::new();
        let mut day = self.start_date;
        while day <= self.end_date {
            days.push(day);
            match day.checked_add_days(Days::new(1)) {
                Some(next) => day = next,
                None => break,
            }
        }
        Ok(days)
    }

    /// Returns `true` when `date` lies within the sprint.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
