//! Tests for the file-backed session store.

use crate::{
    session::{
        adapters::file::{FileSessionStore, SESSION_FILE},
        domain::{AuthToken, Role, Session, UserProfile},
        ports::{SessionStore, SessionStoreError},
    },
    task::domain::UserId,
};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct StoreFixture {
    dir: TempDir,
    store: FileSessionStore,
}

impl StoreFixture {
    fn path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().join("taskboard")).expect("utf-8 temp path")
    }

    fn write_raw(&self, contents: &str) {
        std::fs::write(self.path().join(SESSION_FILE), contents).expect("raw write succeeds");
    }
}

#[fixture]
fn fixture() -> StoreFixture {
    let dir = TempDir::new().expect("temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("taskboard")).expect("utf-8 temp path");
    let store = FileSessionStore::open(&path).expect("store opens");
    StoreFixture { dir, store }
}

fn session() -> Session {
    let user = UserProfile::new(
        UserId::new("u-7").expect("valid id"),
        "Grace Hopper",
        "grace@example.com",
        Role::Hod,
    );
    Session::new(user, AuthToken::new("tok-7").expect("valid token"), None)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_loads_nothing(fixture: StoreFixture) {
    let loaded = fixture.store.load().await.expect("load succeeds");
    assert!(loaded.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saved_session_is_loaded_back(fixture: StoreFixture) {
    fixture.store.save(&session()).await.expect("save succeeds");

    let loaded = fixture.store.load().await.expect("load succeeds");

    assert_eq!(loaded, Some(session()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn token_is_written_under_auth_token_key(fixture: StoreFixture) {
    fixture.store.save(&session()).await.expect("save succeeds");

    let raw = std::fs::read_to_string(fixture.path().join(SESSION_FILE)).expect("file exists");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");

    assert_eq!(json.pointer("/authToken"), Some(&serde_json::json!("tok-7")));
    assert_eq!(json.pointer("/user/_id"), Some(&serde_json::json!("u-7")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn legacy_token_key_is_accepted(fixture: StoreFixture) {
    fixture.write_raw(
        r#"{"token":"old-token","user":{"_id":"u-1","name":"Ada","email":"ada@example.com","role":"admin"}}"#,
    );

    let loaded = fixture
        .store
        .load()
        .await
        .expect("load succeeds")
        .expect("session present");

    assert_eq!(loaded.token().expose(), "old-token");
    assert_eq!(loaded.user().role, Role::Admin);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn auth_token_key_wins_over_stale_legacy_key(fixture: StoreFixture) {
    fixture.write_raw(
        r#"{"authToken":"tok-7","token":"stale","user":{"_id":"u-7","name":"Grace Hopper","email":"grace@example.com","role":"hod"}}"#,
    );

    let loaded = fixture
        .store
        .load()
        .await
        .expect("load succeeds")
        .expect("session present");

    assert_eq!(loaded.token().expose(), "tok-7");
    assert_eq!(loaded, session());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saving_over_legacy_document_drops_token_key(fixture: StoreFixture) {
    fixture.write_raw(
        r#"{"token":"old-token","user":{"_id":"u-7","name":"Grace Hopper","email":"grace@example.com","role":"hod"}}"#,
    );

    fixture.store.save(&session()).await.expect("save succeeds");

    let raw = std::fs::read_to_string(fixture.path().join(SESSION_FILE)).expect("file exists");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(json.pointer("/authToken"), Some(&serde_json::json!("tok-7")));
    assert!(json.pointer("/token").is_none());
}

#[rstest]
#[case("not json")]
#[case(r#"{"user":{"_id":"u-1","name":"Ada","email":"a@b.c","role":"admin"}}"#)]
#[case(r#"{"authToken":"   ","user":{"_id":"u-1","name":"Ada","email":"a@b.c","role":"admin"}}"#)]
#[tokio::test(flavor = "multi_thread")]
async fn unreadable_document_is_corrupt(fixture: StoreFixture, #[case] contents: &str) {
    fixture.write_raw(contents);

    let result = fixture.store.load().await;

    assert!(matches!(result, Err(SessionStoreError::Corrupt(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clear_removes_session_and_is_idempotent(fixture: StoreFixture) {
    fixture.store.save(&session()).await.expect("save succeeds");

    fixture.store.clear().await.expect("first clear succeeds");
    fixture.store.clear().await.expect("second clear succeeds");

    assert!(fixture.store.load().await.expect("load succeeds").is_none());
}
