//! Given steps for group task progress scenarios.

use super::when::{give_verdict, move_to_stage};
use super::world::{GroupTaskWorld, run_async, user_id};
use crate::test_helpers::{profile, signed_in};
use chrono::{DateTime, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::{
    session::domain::Role,
    task::domain::{CreateTaskRequest, TaskStatus},
};

#[given("a head of department is signed in")]
fn hod_signed_in(world: &mut GroupTaskWorld) -> Result<(), eyre::Report> {
    let hod = profile("grace", "Grace Hopper", Role::Hod)?;
    let session = signed_in(hod)?
        .current()
        .ok_or_else(|| eyre::eyre!("helper returned an empty session"))?;
    world.handle.set(session);
    Ok(())
}

#[given(r#"a group task assigned to "{first}" and "{second}" due "{deadline}""#)]
fn group_task(
    world: &mut GroupTaskWorld,
    first: String,
    second: String,
    deadline: String,
) -> Result<(), eyre::Report> {
    for (id, name) in [(&first, "Ada Lovelace"), (&second, "Alan Turing")] {
        world.api.add_user(profile(id, name, Role::Employee)?.as_user_ref())?;
    }
    let due: DateTime<Utc> = deadline.parse().wrap_err("parse scenario deadline")?;
    let request = CreateTaskRequest::new("Quarterly audit", "Reconcile Q1 ledgers")
        .with_assignees([user_id(&first)?, user_id(&second)?])
        .with_deadline(due);
    let created =
        run_async(world.service.create(&request)).wrap_err("create group task for scenario")?;
    world.task = Some(created);
    Ok(())
}

#[given(r#""{user}" has moved to stage "{stage}""#)]
fn has_moved_to_stage(
    world: &mut GroupTaskWorld,
    user: String,
    stage: String,
) -> Result<(), eyre::Report> {
    move_to_stage(world, &user, &stage)
}

#[given(r#""{user}" has been given the verdict "{verdict}""#)]
fn has_been_given_verdict(
    world: &mut GroupTaskWorld,
    user: String,
    verdict: String,
) -> Result<(), eyre::Report> {
    give_verdict(world, &user, &verdict)?;
    match world.last_error.take() {
        Some(err) => Err(eyre::eyre!("verdict in scenario setup failed: {err}")),
        None => Ok(()),
    }
}

#[given(r#"the task status is "{status}""#)]
fn task_status_is(world: &mut GroupTaskWorld, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())?;
    let id = world.task()?.id().clone();
    let updated = run_async(world.service.update_status(&id, target))
        .wrap_err("update task status in scenario setup")?;
    world.task = Some(updated);
    Ok(())
}
