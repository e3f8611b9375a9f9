//! Shared world state for group task progress scenarios.

use std::sync::Arc;

use crate::test_helpers::FixedClock;
use rstest::fixture;
use taskboard::{
    session::SessionHandle,
    task::{
        adapters::memory::InMemoryTaskApi,
        domain::{Task, TaskProgress, UserId},
        services::{TaskService, TaskServiceError},
    },
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskApi<FixedClock>, FixedClock>;

/// Scenario world for group task behaviour tests.
pub struct GroupTaskWorld {
    pub handle: SessionHandle,
    pub api: Arc<InMemoryTaskApi<FixedClock>>,
    pub service: TestTaskService,
    pub clock: FixedClock,
    pub task: Option<Task>,
    pub last_error: Option<TaskServiceError>,
}

impl GroupTaskWorld {
    /// Creates a world with nobody signed in and no task.
    #[must_use]
    pub fn new() -> Self {
        let handle = SessionHandle::new();
        let clock = FixedClock::reference();
        let api = Arc::new(InMemoryTaskApi::new(handle.clone(), Arc::new(clock)));
        let service = TaskService::new(Arc::clone(&api), Arc::new(clock));

        Self {
            handle,
            api,
            service,
            clock,
            task: None,
            last_error: None,
        }
    }

    /// Returns the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Derives the display aggregates at the world's clock.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn progress(&self) -> Result<TaskProgress, eyre::Report> {
        Ok(TaskProgress::of(self.task()?, &self.clock))
    }
}

impl Default for GroupTaskWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> GroupTaskWorld {
    GroupTaskWorld::default()
}

/// Parses a user id from step text.
///
/// # Errors
///
/// Returns an error when the id is blank.
pub fn user_id(raw: &str) -> Result<UserId, eyre::Report> {
    Ok(UserId::new(raw)?)
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
