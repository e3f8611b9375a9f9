//! A single notification as served by the backend.

use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Notification identifier assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    /// Wraps a backend identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a notification is about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The recipient was assigned to a task.
    TaskAssigned,
    /// A task the recipient follows changed.
    TaskUpdated,
    /// An assignee finished their part.
    TaskCompleted,
    /// Work was approved.
    TaskApproved,
    /// Work was rejected.
    TaskRejected,
    /// A remark was added.
    RemarkAdded,
    /// A deadline is close or has passed.
    DeadlineReminder,
    /// Anything else, including kinds this client does not know.
    #[default]
    #[serde(other)]
    General,
}

impl NotificationKind {
    /// Returns a short human label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TaskAssigned => "Assigned",
            Self::TaskUpdated => "Updated",
            Self::TaskCompleted => "Completed",
            Self::TaskApproved => "Approved",
            Self::TaskRejected => "Rejected",
            Self::RemarkAdded => "Remark",
            Self::DeadlineReminder => "Deadline",
            Self::General => "Notice",
        }
    }
}

/// A notification addressed to the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: NotificationId,
    /// Short heading.
    #[serde(default)]
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub message: String,
    /// Category.
    #[serde(rename = "type", alias = "kind", default)]
    pub kind: NotificationKind,
    /// Whether the recipient has read it.
    #[serde(alias = "read", default)]
    pub is_read: bool,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Task the notification refers to, if any.
    #[serde(
        alias = "taskId",
        default,
        deserialize_with = "related_task",
        skip_serializing_if = "Option::is_none"
    )]
    pub related_task: Option<TaskId>,
}

impl Notification {
    /// Creates an unread notification.
    #[must_use]
    pub fn new(id: NotificationId, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            message: message.into(),
            kind: NotificationKind::General,
            is_read: false,
            created_at: None,
            related_task: None,
        }
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_kind(mut self, kind: NotificationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the related task.
    #[must_use]
    pub fn with_related_task(mut self, task: TaskId) -> Self {
        self.related_task = Some(task);
        self
    }
}

/// The related task arrives as an id or as a populated task object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RelatedTask {
    Id(TaskId),
    Populated {
        #[serde(rename = "_id", alias = "id")]
        id: TaskId,
    },
}

fn related_task<'de, D>(deserializer: D) -> Result<Option<TaskId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<RelatedTask>::deserialize(deserializer)?.map(|related| match related {
            RelatedTask::Id(id) | RelatedTask::Populated { id } => id,
        }),
    )
}
