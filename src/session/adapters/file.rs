//! File-backed session store.
//!
//! The session lives in a single JSON document inside a capability-scoped
//! directory. The token is written under `authToken`; documents written with
//! the older `token` key are still read.

use crate::session::{
    domain::{AuthToken, Session, UserProfile},
    ports::{SessionStore, SessionStoreError, SessionStoreResult},
};
use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde::{Deserialize, Serialize};
use std::{fmt, io::ErrorKind};

/// Name of the session document inside the store directory.
pub const SESSION_FILE: &str = "session.json";

/// Stored shape of a session.
///
/// Both token keys are read so a document carrying `authToken` next to a
/// stale `token` still loads; `authToken` wins.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<AuthToken>,
    #[serde(default, rename = "token", skip_serializing)]
    legacy_token: Option<AuthToken>,
    user: UserProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<AuthToken>,
}

impl PersistedSession {
    fn into_session(self) -> SessionStoreResult<Session> {
        let stored = self
            .auth_token
            .or(self.legacy_token)
            .ok_or_else(|| SessionStoreError::Corrupt("no token stored".to_owned()))?;
        let token = AuthToken::new(stored.expose())
            .map_err(|err| SessionStoreError::Corrupt(err.to_string()))?;
        Ok(Session::new(self.user, token, self.refresh_token))
    }
}

impl From<&Session> for PersistedSession {
    fn from(session: &Session) -> Self {
        Self {
            auth_token: Some(session.token().clone()),
            legacy_token: None,
            user: session.user().clone(),
            refresh_token: session.refresh_token().cloned(),
        }
    }
}

/// Session store writing `session.json` into a directory.
pub struct FileSessionStore {
    dir: Dir,
}

impl FileSessionStore {
    /// Opens the store at `path`, creating the directory when missing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Storage`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Utf8Path) -> SessionStoreResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(SessionStoreError::storage)?;
        let dir =
            Dir::open_ambient_dir(path, ambient_authority()).map_err(SessionStoreError::storage)?;
        Ok(Self::from_dir(dir))
    }

    /// Wraps an already opened directory.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

impl fmt::Debug for FileSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSessionStore")
            .field("file", &SESSION_FILE)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> SessionStoreResult<Option<Session>> {
        let contents = match self.dir.read_to_string(SESSION_FILE) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(SessionStoreError::storage(err)),
        };
        let persisted: PersistedSession = serde_json::from_str(&contents)
            .map_err(|err| SessionStoreError::Corrupt(err.to_string()))?;
        persisted.into_session().map(Some)
    }

    async fn save(&self, session: &Session) -> SessionStoreResult<()> {
        let document = serde_json::to_vec_pretty(&PersistedSession::from(session))
            .map_err(SessionStoreError::storage)?;
        self.dir
            .write(SESSION_FILE, document)
            .map_err(SessionStoreError::storage)
    }

    async fn clear(&self) -> SessionStoreResult<()> {
        match self.dir.remove_file(SESSION_FILE) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionStoreError::storage(err)),
        }
    }
}
