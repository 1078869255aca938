//! Application services for the task workflow.

mod reorder;
mod workflow;

pub use reorder::{ReorderOutcome, ReorderTasksRequest, TaskMove};
pub use workflow::{TaskWorkflowService, TransitionOutcome, TransitionPolicy, TransitionTaskRequest};
