//! Domain model for user notifications.

mod feed;
mod notification;

pub use feed::NotificationFeed;
pub use notification::{Notification, NotificationId, NotificationKind};
