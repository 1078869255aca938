//! Then steps for task workflow scenarios.

use super::world::TaskWorkflowWorld;
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let task = world.task()?;
    if task.status.as_str() != status {
        return Err(eyre::eyre!("expected status {status}, found {}", task.status));
    }
    Ok(())
}

#[then("the task history holds {count:usize} record")]
fn history_holds(world: &TaskWorkflowWorld, count: usize) -> Result<(), eyre::Report> {
    if world.history.len() != count {
        return Err(eyre::eyre!(
            "expected {count} history records, found {}",
            world.history.len()
        ));
    }
    Ok(())
}

#[then(r#"the transition fails with kind "{kind}""#)]
fn transition_fails_with_kind(world: &TaskWorkflowWorld, kind: String) -> Result<(), eyre::Report> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the transition to fail"))?;
    if error.kind().as_str() != kind {
        return Err(eyre::eyre!("expected kind {kind}, got {} ({error})", error.kind()));
    }
    Ok(())
}

#[then("the task has a finishing time")]
fn task_has_finishing_time(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    if task.finished_at != Some(world.clock.0) {
        return Err(eyre::eyre!("expected finished_at to be stamped by the clock"));
    }
    Ok(())
}
