//! Unit tests for task status transition validation.

use crate::task::{
    domain::{
        ChecklistGuard, ChecklistItem, ChecklistItemId, HistoryChange, ProjectId, Task,
        TaskDomainError, TaskId, TaskStatus,
    },
    services::{TaskWorkflowService, TransitionPolicy, TransitionTaskRequest},
};
use crate::test_support::{FixedClock, user};
use eyre::{bail, ensure};
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> FixedClock {
    FixedClock::at(2024, 3, 4, 9, 30)
}

#[fixture]
fn created_task() -> Task {
    task_in(TaskStatus::Created)
}

fn task_in(status: TaskStatus) -> Task {
    let earlier = FixedClock::at(2024, 3, 1, 8, 0);
    Task::new(TaskId::new(1), ProjectId::new(10), "Write release notes", &earlier)
        .with_status(status)
}

#[rstest]
#[case(TaskStatus::Created, TaskStatus::Created, false)]
#[case(TaskStatus::Created, TaskStatus::InProgress, true)]
#[case(TaskStatus::Created, TaskStatus::Blocked, false)]
#[case(TaskStatus::Created, TaskStatus::Testing, false)]
#[case(TaskStatus::Created, TaskStatus::ReadyToFinish, false)]
#[case(TaskStatus::Created, TaskStatus::Finished, false)]
#[case(TaskStatus::InProgress, TaskStatus::Created, false)]
#[case(TaskStatus::InProgress, TaskStatus::InProgress, false)]
#[case(TaskStatus::InProgress, TaskStatus::Blocked, true)]
#[case(TaskStatus::InProgress, TaskStatus::Testing, true)]
#[case(TaskStatus::InProgress, TaskStatus::ReadyToFinish, false)]
#[case(TaskStatus::InProgress, TaskStatus::Finished, false)]
#[case(TaskStatus::Blocked, TaskStatus::Created, false)]
#[case(TaskStatus::Blocked, TaskStatus::InProgress, true)]
#[case(TaskStatus::Blocked, TaskStatus::Blocked, false)]
#[case(TaskStatus::Blocked, TaskStatus::Testing, false)]
#[case(TaskStatus::Blocked, TaskStatus::ReadyToFinish, true)]
#[case(TaskStatus::Blocked, TaskStatus::Finished, false)]
#[case(TaskStatus::Testing, TaskStatus::Created, false)]
#[case(TaskStatus::Testing, TaskStatus::InProgress, true)]
#[case(TaskStatus::Testing, TaskStatus::Blocked, false)]
#[case(TaskStatus::Testing, TaskStatus::Testing, false)]
#[case(TaskStatus::Testing, TaskStatus::ReadyToFinish, true)]
#[case(TaskStatus::Testing, TaskStatus::Finished, false)]
#[case(TaskStatus::ReadyToFinish, TaskStatus::Created, false)]
#[case(TaskStatus::ReadyToFinish, TaskStatus::InProgress, false)]
#[case(TaskStatus::ReadyToFinish, TaskStatus::Blocked, false)]
#[case(TaskStatus::ReadyToFinish, TaskStatus::Testing, false)]
#[case(TaskStatus::ReadyToFinish, TaskStatus::ReadyToFinish, false)]
#[case(TaskStatus::ReadyToFinish, TaskStatus::Finished, true)]
fn can_transition_to_returns_expected(
    #[case] from: TaskStatus,
    #[case] to: TaskStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
fn finished_has_no_outgoing_transitions() {
    assert!(TaskStatus::Finished.successors().is_empty());
    assert!(TaskStatus::Finished.is_terminal());
}

#[rstest]
fn created_has_no_incoming_transitions() {
    for from in TaskStatus::ALL {
        assert!(
            !from.can_transition_to(TaskStatus::Created),
            "{from} must not lead back to CREATED"
        );
    }
    assert!(TaskStatus::Created.is_initial());
}

#[rstest]
#[case("IN_PROGRESS", TaskStatus::InProgress)]
#[case("in_progress", TaskStatus::InProgress)]
#[case(" ready-to-finish ", TaskStatus::ReadyToFinish)]
#[case("Finished", TaskStatus::Finished)]
fn status_parsing_normalises_input(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn transition_from_created_to_in_progress_succeeds(
    clock: FixedClock,
    created_task: Task,
) -> eyre::Result<()> {
    let service = TaskWorkflowService::new();
    let request = TransitionTaskRequest::new(created_task.id, "IN_PROGRESS", user("alice"))
        .with_sequence(4);

    let outcome = service.transition(&created_task, &[], &request, &clock)?;

    ensure!(outcome.task.status == TaskStatus::InProgress);
    ensure!(outcome.task.updated_at == clock.0);
    ensure!(outcome.task.finished_at.is_none());
    ensure!(
        outcome.record.change
            == HistoryChange::Status {
                from: TaskStatus::Created,
                to: TaskStatus::InProgress,
            }
    );
    ensure!(outcome.record.actor == user("alice"));
    ensure!(outcome.record.recorded_at == clock.0);
    ensure!(outcome.record.sequence == 4);
    Ok(())
}

#[rstest]
fn transition_into_finished_stamps_finish_time(clock: FixedClock) -> eyre::Result<()> {
    let task = task_in(TaskStatus::ReadyToFinish);
    let request = TransitionTaskRequest::new(task.id, "FINISHED", user("alice"));

    let outcome = TaskWorkflowService::new().transition(&task, &[], &request, &clock)?;

    ensure!(outcome.task.status == TaskStatus::Finished);
    ensure!(outcome.task.finished_at == Some(clock.0));
    Ok(())
}

#[rstest]
fn transition_from_created_to_finished_is_rejected(
    clock: FixedClock,
    created_task: Task,
) -> eyre::Result<()> {
    let request = TransitionTaskRequest::new(created_task.id, "FINISHED", user("alice"));

    let result = TaskWorkflowService::new().transition(&created_task, &[], &request, &clock);
    let expected = Err(TaskDomainError::InvalidStatusTransition {
        task_id: created_task.id,
        from: TaskStatus::Created,
        to: TaskStatus::Finished,
    });

    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    Ok(())
}

#[rstest]
fn unknown_status_is_rejected(clock: FixedClock, created_task: Task) {
    let request = TransitionTaskRequest::new(created_task.id, "ARCHIVED", user("alice"));

    let result = TaskWorkflowService::new().transition(&created_task, &[], &request, &clock);

    assert_eq!(
        result,
        Err(TaskDomainError::UnknownStatus("ARCHIVED".to_owned()))
    );
}

#[rstest]
fn request_for_another_task_is_not_found(clock: FixedClock, created_task: Task) {
    let request = TransitionTaskRequest::new(TaskId::new(99), "IN_PROGRESS", user("alice"));

    let result = TaskWorkflowService::new().transition(&created_task, &[], &request, &clock);

    assert_eq!(result, Err(TaskDomainError::TaskNotFound(TaskId::new(99))));
}

#[rstest]
fn terminal_status_rejects_all_transitions(clock: FixedClock) {
    let task = task_in(TaskStatus::Finished);
    let service = TaskWorkflowService::new();

    for target in TaskStatus::ALL {
        let request = TransitionTaskRequest::new(task.id, target.as_str(), user("alice"));
        let result = service.transition(&task, &[], &request, &clock);
        assert_eq!(
            result,
            Err(TaskDomainError::InvalidStatusTransition {
                task_id: task.id,
                from: TaskStatus::Finished,
                to: target,
            })
        );
    }
}

fn checklist(task_id: TaskId) -> Vec<ChecklistItem> {
    vec![
        ChecklistItem::new(ChecklistItemId::new(1), task_id, "Update changelog", 1).completed(),
        ChecklistItem::new(ChecklistItemId::new(2), task_id, "Tag release", 2).blocking(),
        ChecklistItem::new(ChecklistItemId::new(3), task_id, "Tweet about it", 3),
    ]
}

#[rstest]
#[case(ChecklistGuard::Disabled, vec![])]
#[case(ChecklistGuard::FlaggedItems, vec![2])]
#[case(ChecklistGuard::AllItems, vec![2, 3])]
fn checklist_guard_controls_finishing(
    clock: FixedClock,
    #[case] guard: ChecklistGuard,
    #[case] pending: Vec<i64>,
) {
    let task = task_in(TaskStatus::ReadyToFinish);
    let items = checklist(task.id);
    let service = TaskWorkflowService::with_policy(TransitionPolicy::with_checklist_guard(guard));
    let request = TransitionTaskRequest::new(task.id, "FINISHED", user("alice"));

    let result = service.transition(&task, &items, &request, &clock);

    if pending.is_empty() {
        assert!(result.is_ok(), "expected success, got {result:?}");
    } else {
        assert_eq!(
            result,
            Err(TaskDomainError::UnresolvedChecklistItems {
                task_id: task.id,
                pending: pending.into_iter().map(ChecklistItemId::new).collect(),
            })
        );
    }
}

#[rstest]
fn checklist_guard_ignores_other_transitions(clock: FixedClock) -> eyre::Result<()> {
    let task = task_in(TaskStatus::InProgress);
    let items = checklist(task.id);
    let service = TaskWorkflowService::with_policy(TransitionPolicy::with_checklist_guard(
        ChecklistGuard::AllItems,
    ));
    let request = TransitionTaskRequest::new(task.id, "TESTING", user("alice"));

    let outcome = service.transition(&task, &items, &request, &clock)?;

    ensure!(outcome.task.status == TaskStatus::Testing);
    Ok(())
}
