//! When steps for task closure BDD scenarios.

use super::world::TaskClosureWorld;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tasktree::task::{domain::User, services::TransitionTaskRequest};

#[when(r#"the task is transitioned to "{target_status}""#)]
fn transition_task(
    world: &mut TaskClosureWorld,
    target_status: String,
) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let result = world
        .board
        .transition_task(TransitionTaskRequest::new(id, target_status));
    if let Ok(ref updated) = result {
        world.task = Some(updated.clone());
    }
    world.last_transition_result = Some(result);
    Ok(())
}

#[when(r#"the subtask is transitioned to "{target_status}""#)]
fn transition_subtask(
    world: &mut TaskClosureWorld,
    target_status: String,
) -> Result<(), eyre::Report> {
    let id = world.subtask()?.id();
    let updated = world
        .board
        .transition_task(TransitionTaskRequest::new(id, target_status))
        .wrap_err("transition subtask in closure scenario")?;
    world.subtask = Some(updated);
    Ok(())
}

#[when(r#"the task is assigned to "{name}""#)]
fn assign_task(world: &mut TaskClosureWorld, name: String) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let user = User::new(name).wrap_err("build scenario user")?;
    let updated = world
        .board
        .assign_user(id, Some(user))
        .wrap_err("assign task in closure scenario")?;
    world.task = Some(updated);
    Ok(())
}

#[when("the assignment is cleared")]
fn clear_assignment(world: &mut TaskClosureWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let updated = world
        .board
        .assign_user(id, None)
        .wrap_err("clear assignment in closure scenario")?;
    world.task = Some(updated);
    Ok(())
}
