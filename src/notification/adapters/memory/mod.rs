//! In-memory notification backend for tests and offline use.

mod notification;

pub use notification::InMemoryNotificationApi;
