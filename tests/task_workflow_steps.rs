//! Behaviour tests for task workflow transitions.

mod test_helpers;

#[path = "task_workflow_steps/mod.rs"]
mod task_workflow_steps_defs;

use rstest_bdd_macros::scenario;
use task_workflow_steps_defs::world::{TaskWorkflowWorld, world};

#[scenario(
    path = "tests/features/task_workflow.feature",
    name = "Start work on a created task"
)]
fn start_work_on_created_task(world: TaskWorkflowWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_workflow.feature",
    name = "Reject skipping straight to finished"
)]
fn reject_skipping_to_finished(world: TaskWorkflowWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_workflow.feature",
    name = "Reject an unknown status name"
)]
fn reject_unknown_status(world: TaskWorkflowWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_workflow.feature",
    name = "Open checklist items hold a task back"
)]
fn open_checklist_blocks_finishing(world: TaskWorkflowWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_workflow.feature",
    name = "Finishing records the finishing time"
)]
fn finishing_records_time(world: TaskWorkflowWorld) {
    let _ = world;
}
