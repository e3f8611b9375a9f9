//! HTTP adapter for the `/notifications` endpoints.

use crate::{
    api::{ApiClient, ApiResult, Method},
    notification::{
        domain::{Notification, NotificationId},
        ports::NotificationApi,
    },
};
use async_trait::async_trait;
use serde::Deserialize;

/// Notification backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpNotificationApi {
    client: ApiClient,
}

impl HttpNotificationApi {
    /// Creates the adapter on top of a shared client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnreadBody {
    #[serde(alias = "unreadCount")]
    count: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Bare(Vec<Notification>),
    Wrapped { notifications: Vec<Notification> },
}

#[async_trait]
impl NotificationApi for HttpNotificationApi {
    async fn unread_count(&self) -> ApiResult<u64> {
        let body: UnreadBody = self.client.get("notifications/unread-count", &[]).await?;
        Ok(body.count)
    }

    async fn list(&self) -> ApiResult<Vec<Notification>> {
        let body: ListBody = self.client.get("notifications", &[]).await?;
        Ok(match body {
            ListBody::Bare(items) | ListBody::Wrapped {
                notifications: items,
            } => items,
        })
    }

    async fn mark_read(&self, id: &NotificationId) -> ApiResult<()> {
        self.client
            .send_empty(Method::PUT, &format!("notifications/{id}/read"))
            .await
    }

    async fn mark_all_read(&self) -> ApiResult<()> {
        self.client
            .send_empty(Method::PUT, "notifications/mark-all-read")
            .await
    }
}
