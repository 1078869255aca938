//! Given steps for task workflow scenarios.

use super::world::TaskWorkflowWorld;
use rstest_bdd_macros::given;
use sprintkit::task::domain::{
    ChecklistGuard, ChecklistItem, ChecklistItemId, ProjectId, Task, TaskId, TaskStatus,
};
use sprintkit::task::services::{TaskWorkflowService, TransitionPolicy};

#[given(r#"a task in status "{status}""#)]
fn task_in_status(world: &mut TaskWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let parsed = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    world.task = Some(
        Task::new(TaskId::new(1), ProjectId::new(1), "Scenario task", &world.clock)
            .with_status(parsed),
    );
    Ok(())
}

#[given("the checklist guard requires all items")]
fn checklist_guard_all_items(world: &mut TaskWorkflowWorld) {
    world.service = TaskWorkflowService::with_policy(TransitionPolicy::with_checklist_guard(
        ChecklistGuard::AllItems,
    ));
}

#[given("the task has an open checklist item")]
fn open_checklist_item(world: &mut TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id;
    world.checklist.push(ChecklistItem::new(
        ChecklistItemId::new(1),
        task_id,
        "Update the changelog",
        0,
    ));
    Ok(())
}
