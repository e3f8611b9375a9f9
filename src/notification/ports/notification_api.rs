//! Port for the backend notification endpoints.

use crate::{
    api::ApiResult,
    notification::domain::{Notification, NotificationId},
};
use async_trait::async_trait;

/// Notification backend contract.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Returns the number of unread notifications of the caller.
    async fn unread_count(&self) -> ApiResult<u64>;

    /// Returns the caller's notifications, newest first.
    async fn list(&self) -> ApiResult<Vec<Notification>>;

    /// Marks one notification read.
    async fn mark_read(&self, id: &NotificationId) -> ApiResult<()>;

    /// Marks every notification of the caller read.
    async fn mark_all_read(&self) -> ApiResult<()>;
}
