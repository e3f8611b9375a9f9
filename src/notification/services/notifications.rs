//! Unread count, listing, and read marking.

use crate::{
    api::ApiError,
    notification::{
        domain::{NotificationFeed, NotificationId},
        ports::NotificationApi,
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for notification operations.
#[derive(Debug, Error)]
pub enum NotificationServiceError {
    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for notification service operations.
pub type NotificationServiceResult<T> = Result<T, NotificationServiceError>;

/// Notification orchestration service.
///
/// Reads treat authentication failures as "nothing to show": a signed-out or
/// expired session yields a zero count and an empty feed instead of an error.
pub struct NotificationService<A>
where
    A: NotificationApi,
{
    api: Arc<A>,
}

impl<A> Clone for NotificationService<A>
where
    A: NotificationApi,
{
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A> NotificationService<A>
where
    A: NotificationApi,
{
    /// Creates a new notification service.
    #[must_use]
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Returns the unread count, or `0` when not authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Api`] for failures other than
    /// authentication.
    pub async fn unread_count(&self) -> NotificationServiceResult<u64> {
        match self.api.unread_count().await {
            Ok(count) => Ok(count),
            Err(err) if err.is_auth() => {
                debug!(error = %err, "unread count unavailable without a valid session");
                Ok(0)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the notification feed, or an empty feed when not
    /// authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Api`] for failures other than
    /// authentication.
    pub async fn list(&self) -> NotificationServiceResult<NotificationFeed> {
        match self.api.list().await {
            Ok(items) => Ok(NotificationFeed::new(items)),
            Err(err) if err.is_auth() => {
                debug!(error = %err, "notifications unavailable without a valid session");
                Ok(NotificationFeed::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Marks one notification read on the backend and in `feed`.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Api`] when the backend call fails;
    /// `feed` is left unchanged.
    pub async fn mark_read(
        &self,
        feed: &mut NotificationFeed,
        id: &NotificationId,
    ) -> NotificationServiceResult<()> {
        self.api.mark_read(id).await?;
        feed.mark_read_locally(id);
        Ok(())
    }

    /// Marks every notification read on the backend and in `feed`.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Api`] when the backend call fails;
    /// `feed` is left unchanged.
    pub async fn mark_all_read(&self, feed: &mut NotificationFeed) -> NotificationServiceResult<()> {
        self.api.mark_all_read().await?;
        feed.mark_all_read_locally();
        Ok(())
    }
}
