//! Then steps for task closure BDD scenarios.

use super::world::TaskClosureWorld;
use rstest_bdd_macros::then;
use tasktree::task::{
    domain::{TaskDomainError, TaskStatus},
    services::TaskBoardError,
};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskClosureWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let id = world.task()?.id();
    let stored = world
        .board
        .find(id)?
        .ok_or_else(|| eyre::eyre!("task {id} missing from board"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then("the task history has {count:usize} records")]
fn task_history_has(world: &TaskClosureWorld, count: usize) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let history = world.board.history(id)?;

    if history.len() != count {
        return Err(eyre::eyre!(
            "expected {count} history records, found {}",
            history.len()
        ));
    }
    Ok(())
}

#[then(r#"the latest history detail is "{detail}""#)]
fn latest_history_detail(world: &TaskClosureWorld, detail: String) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let history = world.board.history(id)?;
    let latest = history
        .last()
        .ok_or_else(|| eyre::eyre!("history is empty"))?;

    if latest.detail() != detail {
        return Err(eyre::eyre!(
            "expected latest detail {detail:?}, found {:?}",
            latest.detail()
        ));
    }
    Ok(())
}

#[then("the transition fails with a state transition error")]
fn transition_fails_with_state_transition(
    world: &TaskClosureWorld,
) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(
        result,
        Err(TaskBoardError::Domain(TaskDomainError::StateTransition(_)))
    ) {
        return Err(eyre::eyre!(
            "expected StateTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the transition fails with an invalid status error")]
fn transition_fails_with_invalid_status(world: &TaskClosureWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(result, Err(TaskBoardError::InvalidStatus(_))) {
        return Err(eyre::eyre!("expected InvalidStatus error, got {result:?}"));
    }
    Ok(())
}
