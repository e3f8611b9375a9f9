//! Port contracts for notifications.

pub mod notification_api;

pub use notification_api::NotificationApi;
