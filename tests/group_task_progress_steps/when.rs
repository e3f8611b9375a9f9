//! When steps for group task progress scenarios.

use super::world::{GroupTaskWorld, run_async, user_id};
use crate::test_helpers::FixedClock;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::task::domain::{Approval, TaskStage};

/// Moves one assignee to a stage and keeps the updated task.
///
/// # Errors
///
/// Returns an error when the stage is unknown or the update fails.
pub fn move_to_stage(
    world: &mut GroupTaskWorld,
    user: &str,
    stage: &str,
) -> Result<(), eyre::Report> {
    let target = TaskStage::try_from(stage)?;
    let id = world.task()?.id().clone();
    let updated = run_async(
        world
            .service
            .update_individual_stage(&id, &user_id(user)?, target),
    )
    .wrap_err("update individual stage")?;
    world.task = Some(updated);
    Ok(())
}

/// Records a verdict; a refusal is kept in the world instead of failing.
///
/// # Errors
///
/// Returns an error when the verdict is unknown or no task exists.
pub fn give_verdict(
    world: &mut GroupTaskWorld,
    user: &str,
    verdict: &str,
) -> Result<(), eyre::Report> {
    let approval = Approval::try_from(verdict)?;
    let task = world.task()?.clone();
    let result = run_async(world.service.update_individual_approval(
        &task,
        &user_id(user)?,
        approval,
    ));
    match result {
        Ok(updated) => world.task = Some(updated),
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when(r#""{user}" moves to stage "{stage}""#)]
fn moves_to_stage(
    world: &mut GroupTaskWorld,
    user: String,
    stage: String,
) -> Result<(), eyre::Report> {
    move_to_stage(world, &user, &stage)
}

#[when(r#""{user}" is given the verdict "{verdict}""#)]
fn is_given_verdict(
    world: &mut GroupTaskWorld,
    user: String,
    verdict: String,
) -> Result<(), eyre::Report> {
    give_verdict(world, &user, &verdict)
}

#[when(r#"the clock reads "{timestamp}""#)]
fn clock_reads(world: &mut GroupTaskWorld, timestamp: String) -> Result<(), eyre::Report> {
    world.clock = FixedClock::parse(&timestamp)?;
    Ok(())
}
