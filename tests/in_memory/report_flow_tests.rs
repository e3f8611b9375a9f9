//! Statistics and export for a signed-in head of department.

use super::helpers::{Backend, backend};
use crate::test_helpers::FixedClock;
use rstest::rstest;
use taskboard::{
    report::{
        domain::{DashboardStats, ReportScope},
        export::{EXPORT_COLUMNS, TaskExport},
    },
    task::domain::{CreateTaskRequest, TaskQuery, UserId},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hod_dashboard_follows_role(backend: Backend) {
    backend
        .reports_api
        .publish(
            ReportScope::HodDashboard,
            DashboardStats {
                total_tasks: 3,
                ..DashboardStats::default()
            },
        )
        .expect("figures are published");
    backend
        .sign_in("grace@example.com")
        .await
        .expect("hod signs in");

    let dashboard = backend
        .reports
        .fetch(ReportScope::HodDashboard)
        .await
        .expect("hod dashboard loads");
    let admin = backend.reports.fetch(ReportScope::AdminDashboard).await;

    assert_eq!(dashboard.total_tasks, 3);
    assert!(admin.is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listed_tasks_export_to_csv(backend: Backend) {
    backend
        .sign_in("grace@example.com")
        .await
        .expect("hod signs in");
    for title in ["Quarterly audit", "Update wiki"] {
        backend
            .tasks
            .create(
                &CreateTaskRequest::new(title, "Details")
                    .with_assignees([UserId::new("ada").expect("valid user id")]),
            )
            .await
            .expect("task is created");
    }
    let page = backend
        .tasks
        .list(&TaskQuery::new())
        .await
        .expect("tasks list");

    let clock = FixedClock::reference();
    let mut out = Vec::new();
    TaskExport::new(&page.tasks, &clock)
        .write_to(&mut out)
        .expect("export writes");

    let mut reader = csv::Reader::from_reader(out.as_slice());
    let headers = reader.headers().expect("header row").clone();
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows parse");
    assert_eq!(headers.len(), EXPORT_COLUMNS.len());
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.get(5) == Some("Grace Hopper")));
}
