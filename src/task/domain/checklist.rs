//! Checklist items, ordering, and the completion guard.

use super::{ChecklistItemId, TaskDomainError, TaskId};
use crate::percent::{count_u64, rounded_percent};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Sub-item of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// Item identifier.
    pub id: ChecklistItemId,
    /// Owning task.
    pub task_id: TaskId,
    /// Item text.
    pub title: String,
    /// Whether the item has been ticked off.
    #[serde(default)]
    pub completed: bool,
    /// Position among the task's items.
    pub order: i64,
    /// Whether an open item should hold the task back from `FINISHED`.
    #[serde(default)]
    pub blocks_completion: bool,
}

impl ChecklistItem {
    /// Creates an open, non-blocking checklist item.
    #[must_use]
    pub fn new(id: ChecklistItemId, task_id: TaskId, title: impl Into<String>, order: i64) -> Self {
        Self {
            id,
            task_id,
            title: title.into(),
            completed: false,
            order,
            blocks_completion: false,
        }
    }

    /// Marks the item as completed.
    #[must_use]
    pub const fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Flags the item as blocking task completion.
    #[must_use]
    pub const fn blocking(mut self) -> Self {
        self.blocks_completion = true;
        self
    }
}

/// Which open checklist items prevent a task from entering `FINISHED`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistGuard {
    /// Checklists never block completion.
    #[default]
    Disabled,
    /// Only open items flagged with `blocks_completion` block completion.
    FlaggedItems,
    /// Every open item blocks completion.
    AllItems,
}

impl ChecklistGuard {
    /// Returns the ids of `task_id`'s items that block completion, in
    /// checklist order.
    #[must_use]
    pub fn pending_items(self, task_id: TaskId, items: &[ChecklistItem]) -> Vec<ChecklistItemId> {
        let mut pending: Vec<&ChecklistItem> = items
            .iter()
            .filter(|item| item.task_id == task_id && !item.completed)
            .filter(|item| match self {
                Self::Disabled => false,
                Self::FlaggedItems => item.blocks_completion,
                Self::AllItems => true,
            })
            .collect();
        pending.sort_by_key(|item| (item.order, item.id));
        pending.into_iter().map(|item| item.id).collect()
    }
}

/// Target position for a single checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistMove {
    /// Item being moved.
    pub item_id: ChecklistItemId,
    /// New order value.
    pub new_order: i64,
}

/// Full or partial reordering of one task's checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderChecklistRequest {
    /// Task whose checklist is reordered.
    pub task_id: TaskId,
    /// Requested positions.
    pub items: Vec<ChecklistMove>,
}

impl ReorderChecklistRequest {
    /// Creates a request from `(item, new_order)` pairs.
    #[must_use]
    pub fn new(task_id: TaskId, moves: impl IntoIterator<Item = (ChecklistItemId, i64)>) -> Self {
        Self {
            task_id,
            items: moves
                .into_iter()
                .map(|(item_id, new_order)| ChecklistMove { item_id, new_order })
                .collect(),
        }
    }
}

/// Applies a checklist reorder to a snapshot.
///
/// Items of other tasks in `items` are ignored. The returned list holds every
/// item of the request's task, sorted by order. Nothing is applied unless the
/// whole request is valid.
///
/// # Errors
///
/// Returns [`TaskDomainError::ChecklistItemNotFound`] for items that do not
/// belong to the task, [`TaskDomainError::DuplicateChecklistMove`] when an
/// item is named twice, and [`TaskDomainError::DuplicateOrder`] when two items
/// would end up with the same order.
pub fn reorder_checklist(
    items: &[ChecklistItem],
    request: &ReorderChecklistRequest,
) -> Result<Vec<ChecklistItem>, TaskDomainError> {
    let task_id = request.task_id;
    let mut reordered: BTreeMap<ChecklistItemId, ChecklistItem> = items
        .iter()
        .filter(|item| item.task_id == task_id)
        .map(|item| (item.id, item.clone()))
        .collect();

    let mut seen = HashSet::new();
    for checklist_move in &request.items {
        if !seen.insert(checklist_move.item_id) {
            return Err(TaskDomainError::DuplicateChecklistMove(checklist_move.item_id));
        }
        let item = reordered.get_mut(&checklist_move.item_id).ok_or(
            TaskDomainError::ChecklistItemNotFound {
                task_id,
                item_id: checklist_move.item_id,
            },
        )?;
        item.order = checklist_move.new_order;
    }

    let mut orders = HashSet::new();
    let mut result: Vec<ChecklistItem> = reordered.into_values().collect();
    result.sort_by_key(|item| (item.order, item.id));
    for item in &result {
        if !orders.insert(item.order) {
            return Err(TaskDomainError::DuplicateOrder {
                task_id,
                order: item.order,
            });
        }
    }
    Ok(result)
}

/// Completion summary of a task's checklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistProgress {
    /// Number of items.
    pub total: usize,
    /// Number of completed items.
    pub completed: usize,
    /// Completed share in percent, rounded half up; 0 for an empty checklist.
    pub percent: u8,
}

impl ChecklistProgress {
    /// Summarises `task_id`'s items.
    #[must_use]
    pub fn from_items(task_id: TaskId, items: &[ChecklistItem]) -> Self {
        let (total, completed) = items
            .iter()
            .filter(|item| item.task_id == task_id)
            .fold((0_usize, 0_usize), |(total, done), item| {
                (total + 1, done + usize::from(item.completed))
            });
        Self {
            total,
            completed,
            percent: rounded_percent(count_u64(completed), count_u64(total)),
        }
    }
}
