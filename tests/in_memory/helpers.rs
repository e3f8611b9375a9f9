//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use crate::test_helpers::{FixedClock, profile};
use rstest::fixture;
use taskboard::{
    notification::{adapters::memory::InMemoryNotificationApi, services::NotificationService},
    report::{adapters::memory::InMemoryReportApi, services::ReportService},
    session::{
        SessionHandle,
        adapters::memory::{InMemoryAuthApi, InMemorySessionStore},
        domain::{Credentials, Role},
        services::AuthService,
    },
    task::{adapters::memory::InMemoryTaskApi, services::TaskService},
};

/// Password shared by every seeded account.
pub const PASSWORD: &str = "correct horse";

/// Every in-memory backend and service sharing one session handle.
pub struct Backend {
    pub handle: SessionHandle,
    pub store: Arc<InMemorySessionStore>,
    pub tasks_api: Arc<InMemoryTaskApi<FixedClock>>,
    pub notifications_api: Arc<InMemoryNotificationApi>,
    pub reports_api: Arc<InMemoryReportApi>,
    pub auth: AuthService<InMemoryAuthApi, InMemorySessionStore>,
    pub tasks: TaskService<InMemoryTaskApi<FixedClock>, FixedClock>,
    pub notifications: NotificationService<InMemoryNotificationApi>,
    pub reports: ReportService<InMemoryReportApi>,
}

impl Backend {
    /// Signs in one of the seeded accounts.
    ///
    /// # Errors
    ///
    /// Returns an error when the credentials are rejected.
    pub async fn sign_in(&self, email: &str) -> Result<(), eyre::Report> {
        self.auth
            .login(&Credentials::new(email, PASSWORD)?)
            .await?;
        Ok(())
    }
}

/// Seeds an HOD and two employees and wires every service together.
///
/// Nobody is signed in.
#[fixture]
pub fn backend() -> Backend {
    build().expect("in-memory backend wiring")
}

fn build() -> Result<Backend, eyre::Report> {
    let handle = SessionHandle::new();
    let clock = Arc::new(FixedClock::reference());
    let auth_api = Arc::new(InMemoryAuthApi::new(handle.clone()));
    let store = Arc::new(InMemorySessionStore::new());
    let tasks_api = Arc::new(InMemoryTaskApi::new(handle.clone(), Arc::clone(&clock)));
    let notifications_api = Arc::new(InMemoryNotificationApi::new(handle.clone()));
    let reports_api = Arc::new(InMemoryReportApi::new(handle.clone()));

    for (id, name, role) in [
        ("grace", "Grace Hopper", Role::Hod),
        ("ada", "Ada Lovelace", Role::Employee),
        ("alan", "Alan Turing", Role::Employee),
    ] {
        let user = profile(id, name, role)?;
        tasks_api.add_user(user.as_user_ref())?;
        auth_api.add_account(user, PASSWORD)?;
    }

    Ok(Backend {
        auth: AuthService::new(auth_api, Arc::clone(&store), handle.clone()),
        tasks: TaskService::new(Arc::clone(&tasks_api), clock),
        notifications: NotificationService::new(Arc::clone(&notifications_api)),
        reports: ReportService::new(Arc::clone(&reports_api)),
        handle,
        store,
        tasks_api,
        notifications_api,
        reports_api,
    })
}
