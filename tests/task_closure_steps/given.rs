//! Given steps for task closure BDD scenarios.

use super::world::TaskClosureWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasktree::task::services::CreateTaskRequest;

#[given(r#"a task described as "{description}""#)]
fn a_task(world: &mut TaskClosureWorld, description: String) -> Result<(), eyre::Report> {
    let created = world
        .board
        .create_task(CreateTaskRequest::new(description))
        .wrap_err("create task for closure scenario")?;
    world.task = Some(created);
    Ok(())
}

#[given(r#"a subtask described as "{description}""#)]
fn a_subtask(world: &mut TaskClosureWorld, description: String) -> Result<(), eyre::Report> {
    let parent = world.task()?.id();
    let child = world
        .board
        .create_task(CreateTaskRequest::new(description).with_parent(parent))
        .wrap_err("create subtask for closure scenario")?;
    let updated_parent = world
        .board
        .add_subtask(parent, child.id())
        .wrap_err("attach subtask for closure scenario")?;
    world.task = Some(updated_parent);
    world.subtask = Some(child);
    Ok(())
}
