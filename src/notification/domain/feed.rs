//! Locally held list of notifications.

use super::{Notification, NotificationId};

/// The notifications shown in the bell dropdown.
///
/// Marking read here only changes the local copy; the service sends the
/// matching backend call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFeed {
    items: Vec<Notification>,
}

impl NotificationFeed {
    /// Wraps a list in server order.
    #[must_use]
    pub const fn new(items: Vec<Notification>) -> Self {
        Self { items }
    }

    /// Returns all notifications.
    #[must_use]
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Returns `true` when the feed is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of unread notifications.
    #[must_use]
    pub fn unread(&self) -> usize {
        self.items.iter().filter(|item| !item.is_read).count()
    }

    /// Marks one notification read. Returns `false` when it is not in the
    /// feed.
    pub fn mark_read_locally(&mut self, id: &NotificationId) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return false;
        };
        item.is_read = true;
        true
    }

    /// Marks every notification read.
    pub fn mark_all_read_locally(&mut self) {
        for item in &mut self.items {
            item.is_read = true;
        }
    }
}
