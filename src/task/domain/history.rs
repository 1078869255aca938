//! Append-only audit trail of task changes.

use super::{TaskId, TaskStatus, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The value that changed, with its old and new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum HistoryChange {
    /// Workflow status change.
    Status {
        /// Status before the change.
        from: TaskStatus,
        /// Status after the change.
        to: TaskStatus,
    },
    /// Column position change.
    Order {
        /// Order before the change.
        from: i64,
        /// Order after the change.
        to: i64,
    },
}

/// A single accepted change to a task.
///
/// The engine does not generate timestamps of its own; `recorded_at` comes
/// from the injected clock and `sequence` from the caller, which breaks ties
/// between records sharing a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Task the change applies to.
    pub task_id: TaskId,
    /// What changed.
    pub change: HistoryChange,
    /// User who made the change.
    pub actor: UserId,
    /// When the change was accepted.
    pub recorded_at: DateTime<Utc>,
    /// Caller-supplied insertion sequence number.
    pub sequence: u64,
}

impl HistoryRecord {
    /// Key ordering records by time, then by insertion sequence.
    #[must_use]
    pub const fn ordering_key(&self) -> (DateTime<Utc>, u64) {
        (self.recorded_at, self.sequence)
    }
}

/// Append-only collection of history records for one or more tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskHistory {
    records: Vec<HistoryRecord>,
}

impl TaskHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends a record. Existing records are never modified or removed.
    pub fn append(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    /// Appends several records in order.
    pub fn extend(&mut self, records: impl IntoIterator<Item = HistoryRecord>) {
        self.records.extend(records);
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no records have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records ordered by timestamp, ties broken by sequence number.
    #[must_use]
    pub fn ordered(&self) -> Vec<&HistoryRecord> {
        let mut ordered: Vec<&HistoryRecord> = self.records.iter().collect();
        ordered.sort_by_key(|record| record.ordering_key());
        ordered
    }

    /// Ordered records of a single task.
    #[must_use]
    pub fn for_task(&self, task_id: TaskId) -> Vec<&HistoryRecord> {
        self.ordered()
            .into_iter()
            .filter(|record| record.task_id == task_id)
            .collect()
    }

    /// Most recent status reached by a task according to the trail.
    #[must_use]
    pub fn latest_status(&self, task_id: TaskId) -> Option<TaskStatus> {
        self.for_task(task_id)
            .into_iter()
            .rev()
            .find_map(|record| match record.change {
                HistoryChange::Status { to, .. } => Some(to),
                HistoryChange::Order { .. } => None,
            })
    }
}
