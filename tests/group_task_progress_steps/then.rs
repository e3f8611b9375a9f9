//! Then steps for group task progress scenarios.

use super::world::GroupTaskWorld;
use rstest_bdd_macros::then;
use taskboard::task::{domain::TaskDomainError, services::TaskServiceError};

#[then("the progress is {percent:u8} percent")]
fn progress_is(world: &GroupTaskWorld, percent: u8) -> Result<(), eyre::Report> {
    let progress = world.progress()?;
    eyre::ensure!(
        progress.percent == percent,
        "expected {percent}% progress, found {}%",
        progress.percent
    );
    Ok(())
}

#[then(r#"the approval label is "{label}""#)]
fn approval_label_is(world: &GroupTaskWorld, label: String) -> Result<(), eyre::Report> {
    let found = world.progress()?.approval.to_string();
    eyre::ensure!(
        found == label,
        "expected approval label {label:?}, found {found:?}"
    );
    Ok(())
}

#[then("the verdict is refused because the work is not done")]
fn verdict_refused(world: &GroupTaskWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the verdict to be refused"))?;
    eyre::ensure!(
        matches!(
            error,
            TaskServiceError::Domain(TaskDomainError::ApprovalBeforeCompletion { .. })
        ),
        "expected ApprovalBeforeCompletion, got {error:?}"
    );
    Ok(())
}

#[then("the task is overdue")]
fn task_is_overdue(world: &GroupTaskWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.progress()?.overdue, "expected the task to be overdue");
    Ok(())
}

#[then("the task is not overdue")]
fn task_is_not_overdue(world: &GroupTaskWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        !world.progress()?.overdue,
        "expected the task not to be overdue"
    );
    Ok(())
}
