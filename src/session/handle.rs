//! Shared, explicitly injected session state.

use super::domain::{AuthToken, Session, UserProfile};
use std::sync::{Arc, PoisonError, RwLock};

/// Cloneable handle to the current session.
///
/// One handle is created at start-up and passed to the API client and the
/// services that need to know who is signed in. Clones share state. Writes
/// happen only on login, logout, restore, and profile refresh.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    /// Creates a handle with no session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle holding a session.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        let handle = Self::new();
        handle.set(session);
        handle
    }

    /// Replaces the current session.
    pub fn set(&self, session: Session) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    /// Removes the current session.
    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Returns a copy of the current session.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the current bearer token.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.token().clone())
    }

    /// Returns the signed-in user.
    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.user().clone())
    }

    /// Returns `true` when a session is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
