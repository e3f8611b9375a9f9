//! In-memory session store.

use crate::session::{
    domain::Session,
    ports::{SessionStore, SessionStoreError, SessionStoreResult},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Session store keeping the session in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    state: Arc<RwLock<Option<Session>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> SessionStoreError {
    SessionStoreError::storage(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> SessionStoreResult<Option<Session>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.clone())
    }

    async fn save(&self, session: &Session) -> SessionStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        *state = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> SessionStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        *state = None;
        Ok(())
    }
}
