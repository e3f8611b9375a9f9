//! Port for persisting the session between runs.

use crate::session::domain::Session;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Session persistence contract.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the persisted session.
    ///
    /// Returns `None` when nothing has been stored.
    async fn load(&self) -> SessionStoreResult<Option<Session>>;

    /// Persists a session, replacing any previous one.
    async fn save(&self, session: &Session) -> SessionStoreResult<()>;

    /// Removes the persisted session. Clearing an empty store succeeds.
    async fn clear(&self) -> SessionStoreResult<()>;
}

/// Errors returned by session store implementations.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// The stored session could not be decoded.
    #[error("stored session is corrupt: {0}")]
    Corrupt(String),

    /// Storage-layer failure.
    #[error("session storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionStoreError {
    /// Wraps a storage error.
    #[must_use]
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
