//! When steps for task workflow scenarios.

use super::world::TaskWorkflowWorld;
use crate::test_helpers::user;
use rstest_bdd_macros::when;
use sprintkit::task::services::TransitionTaskRequest;

#[when(r#"the task is moved to "{target}""#)]
fn move_task(world: &mut TaskWorkflowWorld, target: String) -> Result<(), eyre::Report> {
    let task = world.task()?.clone();
    let sequence = u64::try_from(world.history.len())?;
    let request = TransitionTaskRequest::new(task.id, target, user("scenario")).with_sequence(sequence);

    match world
        .service
        .transition(&task, &world.checklist, &request, &world.clock)
    {
        Ok(outcome) => {
            world.history.append(outcome.record);
            world.task = Some(outcome.task);
            world.last_error = None;
        }
        Err(error) => world.last_error = Some(error),
    }
    Ok(())
}
