//! Unit tests for guarded status transitions and the subtask closure rule.

use super::support::{FixedClock, clock, logger};
use crate::task::{
    adapters::memory::RecordingLogger,
    domain::{
        NewTask, StateTransitionError, TaskDomainError, TaskHierarchy, TaskId, TaskStatus,
    },
};
use eyre::{OptionExt, bail, ensure};
use rstest::{fixture, rstest};

struct Family {
    hierarchy: TaskHierarchy,
    parent: TaskId,
    children: Vec<TaskId>,
}

#[fixture]
fn family(clock: FixedClock, logger: RecordingLogger) -> Result<Family, TaskDomainError> {
    let mut hierarchy = TaskHierarchy::new();
    let parent = hierarchy.create_task(NewTask::new("Release"), &clock, &logger)?;
    let children = ["Changelog", "Tag", "Publish"]
        .into_iter()
        .map(|description| {
            hierarchy.create_subtask(parent, NewTask::new(description), &clock, &logger)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Family {
        hierarchy,
        parent,
        children,
    })
}

fn status_of(hierarchy: &TaskHierarchy, id: TaskId) -> eyre::Result<TaskStatus> {
    Ok(hierarchy.get(id).ok_or_eyre("task should exist")?.status())
}

fn history_len(hierarchy: &TaskHierarchy, id: TaskId) -> eyre::Result<usize> {
    Ok(hierarchy.get(id).ok_or_eyre("task should exist")?.history().len())
}

#[rstest]
fn task_without_subtasks_finishes(
    clock: FixedClock,
    logger: RecordingLogger,
) -> eyre::Result<()> {
    let mut hierarchy = TaskHierarchy::new();
    let id = hierarchy.create_task(NewTask::new("Solo"), &clock, &logger)?;

    ensure!(hierarchy.can_close(id)?);
    hierarchy.change_status(id, TaskStatus::Finished, &clock, &logger)?;

    ensure!(status_of(&hierarchy, id)? == TaskStatus::Finished);
    ensure!(history_len(&hierarchy, id)? == 2);
    Ok(())
}

#[rstest]
fn finishing_with_an_open_subtask_is_rejected_atomically(
    clock: FixedClock,
    logger: RecordingLogger,
) -> eyre::Result<()> {
    let mut hierarchy = TaskHierarchy::new();
    let parent = hierarchy.create_task(NewTask::new("Parent"), &clock, &logger)?;
    let child = hierarchy.create_task(NewTask::new("Child").with_parent(parent), &clock, &logger)?;
    hierarchy.add_subtask(parent, child, &logger)?;

    let result = hierarchy.change_status(parent, TaskStatus::Finished, &clock, &logger);
    let expected = Err(TaskDomainError::StateTransition(StateTransitionError {
        task_id: parent,
        from: TaskStatus::Open,
        open_subtasks: 1,
    }));

    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(status_of(&hierarchy, parent)? == TaskStatus::Open);
    ensure!(history_len(&hierarchy, parent)? == 1);
    Ok(())
}

#[rstest]
fn finishing_children_first_unblocks_the_parent(
    clock: FixedClock,
    logger: RecordingLogger,
) -> eyre::Result<()> {
    let mut hierarchy = TaskHierarchy::new();
    let parent = hierarchy.create_task(NewTask::new("Parent"), &clock, &logger)?;
    let child = hierarchy.create_subtask(parent, NewTask::new("Child"), &clock, &logger)?;

    hierarchy.change_status(child, TaskStatus::Finished, &clock, &logger)?;
    hierarchy.change_status(parent, TaskStatus::Finished, &clock, &logger)?;

    ensure!(status_of(&hierarchy, child)? == TaskStatus::Finished);
    ensure!(status_of(&hierarchy, parent)? == TaskStatus::Finished);
    Ok(())
}

#[rstest]
fn open_subtask_count_reflects_partial_progress(
    family: Result<Family, TaskDomainError>,
    clock: FixedClock,
    logger: RecordingLogger,
) -> eyre::Result<()> {
    let Family {
        mut hierarchy,
        parent,
        children,
    } = family?;
    let first = *children.first().ok_or_eyre("first child")?;
    hierarchy.change_status(first, TaskStatus::Finished, &clock, &logger)?;

    let result = hierarchy.change_status(parent, TaskStatus::Finished, &clock, &logger);

    let Err(TaskDomainError::StateTransition(error)) = result else {
        bail!("expected a state transition error, got {result:?}");
    };
    ensure!(error.open_subtasks == 2);
    ensure!(!hierarchy.can_close(parent)?);
    Ok(())
}

#[rstest]
#[case(TaskStatus::Open)]
#[case(TaskStatus::InProgress)]
fn non_finishing_transitions_ignore_open_subtasks(
    #[case] target: TaskStatus,
    family: Result<Family, TaskDomainError>,
    clock: FixedClock,
    logger: RecordingLogger,
) -> eyre::Result<()> {
    let Family {
        mut hierarchy,
        parent,
        ..
    } = family?;

    hierarchy.change_status(parent, target, &clock, &logger)?;

    ensure!(status_of(&hierarchy, parent)? == target);
    ensure!(history_len(&hierarchy, parent)? == 2);
    Ok(())
}

#[rstest]
fn closure_only_considers_direct_subtasks(
    clock: FixedClock,
    logger: RecordingLogger,
) -> eyre::Result<()> {
    let mut hierarchy = TaskHierarchy::new();
    let root = hierarchy.create_task(NewTask::new("Root"), &clock, &logger)?;
    let middle = hierarchy.create_subtask(root, NewTask::new("Middle"), &clock, &logger)?;
    let leaf = hierarchy.create_subtask(middle, NewTask::new("Leaf"), &clock, &logger)?;

    ensure!(
        hierarchy
            .change_status(middle, TaskStatus::Finished, &clock, &logger)
            .is_err()
    );
    hierarchy.change_status(leaf, TaskStatus::Finished, &clock, &logger)?;
    hierarchy.change_status(middle, TaskStatus::Finished, &clock, &logger)?;
    hierarchy.change_status(root, TaskStatus::Finished, &clock, &logger)?;

    ensure!(status_of(&hierarchy, root)? == TaskStatus::Finished);
    Ok(())
}

#[rstest]
fn finished_task_may_be_reopened_and_refinished(
    clock: FixedClock,
    logger: RecordingLogger,
) -> eyre::Result<()> {
    let mut hierarchy = TaskHierarchy::new();
    let id = hierarchy.create_task(NewTask::new("Flaky"), &clock, &logger)?;

    hierarchy.change_status(id, TaskStatus::Finished, &clock, &logger)?;
    hierarchy.change_status(id, TaskStatus::Open, &clock, &logger)?;
    hierarchy.change_status(id, TaskStatus::Finished, &clock, &logger)?;
    hierarchy.change_status(id, TaskStatus::Finished, &clock, &logger)?;

    let task = hierarchy.get(id).ok_or_eyre("task should exist")?;
    let last = task.history().last().ok_or_eyre("history record")?;
    ensure!(task.status() == TaskStatus::Finished);
    ensure!(task.history().len() == 5);
    ensure!(last.detail() == "FINISHED → FINISHED");
    Ok(())
}

#[rstest]
fn refinishing_after_a_new_open_subtask_is_rejected(
    clock: FixedClock,
    logger: RecordingLogger,
) -> eyre::Result<()> {
    let mut hierarchy = TaskHierarchy::new();
    let parent = hierarchy.create_task(NewTask::new("Parent"), &clock, &logger)?;
    hierarchy.change_status(parent, TaskStatus::Finished, &clock, &logger)?;
    hierarchy.create_subtask(parent, NewTask::new("Late addition"), &clock, &logger)?;

    let result = hierarchy.change_status(parent, TaskStatus::Finished, &clock, &logger);

    ensure!(matches!(result, Err(TaskDomainError::StateTransition(_))));
    ensure!(status_of(&hierarchy, parent)? == TaskStatus::Finished);
    ensure!(history_len(&hierarchy, parent)? == 2);
    Ok(())
}
