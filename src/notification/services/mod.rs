//! Application services for notifications.

mod notifications;
mod poller;

pub use notifications::{NotificationService, NotificationServiceError, NotificationServiceResult};
pub use poller::{NotificationPoller, PollerHandle};
