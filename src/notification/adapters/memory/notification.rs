//! In-memory notification backend.

use crate::{
    api::{ApiError, ApiResult},
    notification::{
        domain::{Notification, NotificationId},
        ports::NotificationApi,
    },
    session::SessionHandle,
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Notification backend emulated in memory.
///
/// Every call requires a session in the injected [`SessionHandle`]. A failure
/// can be injected to emulate an unreachable or misbehaving server.
#[derive(Debug, Clone)]
pub struct InMemoryNotificationApi {
    session: SessionHandle,
    state: Arc<RwLock<InMemoryNotificationState>>,
}

#[derive(Debug, Default)]
struct InMemoryNotificationState {
    items: Vec<Notification>,
    failure: Option<ApiError>,
}

fn poisoned(err: impl ToString) -> ApiError {
    ApiError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryNotificationApi {
    /// Creates an empty backend.
    #[must_use]
    pub fn new(session: SessionHandle) -> Self {
        Self {
            session,
            state: Arc::new(RwLock::new(InMemoryNotificationState::default())),
        }
    }

    /// Delivers a notification; the newest is listed first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when lock acquisition fails.
    pub fn push(&self, notification: Notification) -> ApiResult<()> {
        self.state
            .write()
            .map_err(poisoned)?
            .items
            .insert(0, notification);
        Ok(())
    }

    /// Makes every subsequent call fail with `failure`, or clears the
    /// injected failure with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when lock acquisition fails.
    pub fn fail_with(&self, failure: Option<ApiError>) -> ApiResult<()> {
        self.state.write().map_err(poisoned)?.failure = failure;
        Ok(())
    }

    fn check(&self) -> ApiResult<()> {
        if !self.session.is_authenticated() {
            return Err(ApiError::Unauthorized("No token provided".to_owned()));
        }
        let state = self.state.read().map_err(poisoned)?;
        state.failure.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl NotificationApi for InMemoryNotificationApi {
    async fn unread_count(&self) -> ApiResult<u64> {
        self.check()?;
        let state = self.state.read().map_err(poisoned)?;
        let unread = state.items.iter().filter(|item| !item.is_read).count();
        Ok(u64::try_from(unread).unwrap_or(u64::MAX))
    }

    async fn list(&self) -> ApiResult<Vec<Notification>> {
        self.check()?;
        Ok(self.state.read().map_err(poisoned)?.items.clone())
    }

    async fn mark_read(&self, id: &NotificationId) -> ApiResult<()> {
        self.check()?;
        let mut state = self.state.write().map_err(poisoned)?;
        let item = state
            .items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| ApiError::not_found("Notification not found"))?;
        item.is_read = true;
        Ok(())
    }

    async fn mark_all_read(&self) -> ApiResult<()> {
        self.check()?;
        let mut state = self.state.write().map_err(poisoned)?;
        for item in &mut state.items {
            item.is_read = true;
        }
        Ok(())
    }
}
