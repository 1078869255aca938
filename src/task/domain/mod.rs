//! Domain model for the task workflow.
//!
//! Tasks, checklists, and history records are plain snapshots supplied by
//! the caller. The domain validates proposed changes against the workflow
//! and ordering rules and never touches storage.

mod checklist;
mod error;
mod history;
mod ids;
mod status;
mod task;
mod tree;

pub use checklist::{
    ChecklistGuard, ChecklistItem, ChecklistMove, ChecklistProgress, ReorderChecklistRequest,
    reorder_checklist,
};
pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use history::{HistoryChange, HistoryRecord, TaskHistory};
pub use ids::{ChecklistItemId, EpicId, ProjectId, SprintId, StoryPoints, TaskId, UserId};
pub use status::{Priority, TaskStatus};
pub use task::Task;
pub use tree::{SubtaskRollup, TaskTree};
