//! Notification feed and polling against the in-memory backend.

use std::time::Duration;

use super::helpers::{Backend, backend};
use rstest::rstest;
use taskboard::{
    notification::{
        domain::{Notification, NotificationId, NotificationKind},
        services::NotificationPoller,
    },
    task::domain::TaskId,
};

fn assignment_notice(id: &str) -> Notification {
    Notification::new(NotificationId::new(id), "Task assigned", "Quarterly audit")
        .with_kind(NotificationKind::TaskAssigned)
        .with_related_task(TaskId::new("t-1").expect("valid task id"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_marks_read_on_backend_and_locally(backend: Backend) {
    backend
        .sign_in("ada@example.com")
        .await
        .expect("employee signs in");
    for id in ["n-1", "n-2"] {
        backend
            .notifications_api
            .push(assignment_notice(id))
            .expect("notification is delivered");
    }

    let mut feed = backend.notifications.list().await.expect("feed loads");
    backend
        .notifications
        .mark_read(&mut feed, &NotificationId::new("n-1"))
        .await
        .expect("mark read succeeds");

    assert_eq!(feed.unread(), 1);
    assert_eq!(
        backend
            .notifications
            .unread_count()
            .await
            .expect("count loads"),
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signed_out_feed_is_empty(backend: Backend) {
    backend
        .notifications_api
        .push(assignment_notice("n-1"))
        .expect("notification is delivered");

    let feed = backend.notifications.list().await.expect("feed loads");
    let unread = backend
        .notifications
        .unread_count()
        .await
        .expect("count loads");

    assert!(feed.is_empty());
    assert_eq!(unread, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn poller_reports_current_count(backend: Backend) {
    backend
        .sign_in("ada@example.com")
        .await
        .expect("employee signs in");
    backend
        .notifications_api
        .push(assignment_notice("n-1"))
        .expect("notification is delivered");

    let poller = NotificationPoller::spawn(backend.notifications.clone(), Duration::from_secs(30));
    let mut updates = poller.subscribe();
    updates.changed().await.expect("first poll publishes");

    assert_eq!(*updates.borrow_and_update(), 1);
    poller.stop().await;
}
