//! Shared world state for task workflow scenarios.

use crate::test_helpers::FixedClock;
use rstest::fixture;
use sprintkit::task::domain::{ChecklistItem, Task, TaskDomainError, TaskHistory};
use sprintkit::task::services::TaskWorkflowService;

/// Scenario world for task workflow behaviour tests.
pub struct TaskWorkflowWorld {
    pub service: TaskWorkflowService,
    pub clock: FixedClock,
    pub task: Option<Task>,
    pub checklist: Vec<ChecklistItem>,
    pub history: TaskHistory,
    pub last_error: Option<TaskDomainError>,
}

impl TaskWorkflowWorld {
    /// Creates a world with the default policy and no task.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: TaskWorkflowService::new(),
            clock: FixedClock::at(2024, 6, 4, 9, 0),
            task: None,
            checklist: Vec::new(),
            history: TaskHistory::new(),
            last_error: None,
        }
    }

    /// Returns the scenario task or an error when none was set up.
    pub fn task(&self) -> eyre::Result<&Task> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TaskWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorkflowWorld {
    TaskWorkflowWorld::default()
}
