//! Sign-in, restore, and sign-out across services sharing one handle.

use super::helpers::{Backend, backend};
use rstest::rstest;
use taskboard::{
    session::ports::SessionStore,
    task::{
        domain::TaskQuery,
        services::TaskServiceError,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn services_require_a_session(backend: Backend) {
    let result = backend.tasks.list(&TaskQuery::new()).await;

    assert!(matches!(result, Err(TaskServiceError::Api(ref err)) if err.is_auth()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_authorises_every_service(backend: Backend) {
    backend
        .sign_in("grace@example.com")
        .await
        .expect("hod signs in");

    let page = backend
        .tasks
        .list(&TaskQuery::new())
        .await
        .expect("tasks list once signed in");
    let unread = backend
        .notifications
        .unread_count()
        .await
        .expect("count loads");

    assert!(page.tasks.is_empty());
    assert_eq!(unread, 0);
    assert!(backend.handle.is_authenticated());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn logout_signs_out_every_service(backend: Backend) {
    backend
        .sign_in("ada@example.com")
        .await
        .expect("employee signs in");

    backend.auth.logout().await.expect("logout succeeds");

    assert!(!backend.handle.is_authenticated());
    assert!(
        backend
            .store
            .load()
            .await
            .expect("store loads")
            .is_none()
    );
    assert!(backend.tasks.list(&TaskQuery::new()).await.is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn restore_picks_up_the_persisted_session(backend: Backend) {
    backend
        .sign_in("ada@example.com")
        .await
        .expect("employee signs in");
    backend.handle.clear();

    let restored = backend.auth.restore().await.expect("restore succeeds");

    assert_eq!(
        restored.map(|user| user.name),
        Some("Ada Lovelace".to_owned())
    );
    assert!(backend.tasks.list(&TaskQuery::new()).await.is_ok());
}
