//! Background polling of the unread count.

use super::NotificationService;
use crate::notification::ports::NotificationApi;
use std::time::Duration;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, warn};

/// Spawns the unread-count poller.
#[derive(Debug, Clone, Copy)]
pub struct NotificationPoller;

impl NotificationPoller {
    /// Starts polling: once immediately, then every `interval`.
    ///
    /// Counts are published on a watch channel. Failed polls are logged and
    /// keep the last published value. Polling stops when the returned handle
    /// is dropped or [`PollerHandle::stop`] is called.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn<A>(service: NotificationService<A>, interval: Duration) -> PollerHandle
    where
        A: NotificationApi + 'static,
    {
        let (sender, receiver) = watch::channel(0);
        let task = tokio::spawn(run(service, interval, sender));
        PollerHandle { receiver, task }
    }
}

async fn run<A>(service: NotificationService<A>, interval: Duration, sender: watch::Sender<u64>)
where
    A: NotificationApi,
{
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            () = sender.closed() => break,
        }
        match service.unread_count().await {
            Ok(count) => {
                if sender.send(count).is_err() {
                    break;
                }
            }
            Err(err) => warn!(error = %err, "notification poll failed"),
        }
    }
    debug!("notification poller stopped");
}

/// Owner of a running poller.
///
/// Dropping the handle cancels the background task, so no update is
/// published after teardown.
#[derive(Debug)]
pub struct PollerHandle {
    receiver: watch::Receiver<u64>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Returns the most recently published count.
    #[must_use]
    pub fn latest(&self) -> u64 {
        *self.receiver.borrow()
    }

    /// Returns a receiver for count updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.receiver.clone()
    }

    /// Returns `true` once the background task has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancels polling and waits for the background task to end.
    pub async fn stop(self) {
        self.task.abort();
        let finished = &self.task;
        while !finished.is_finished() {
            tokio::task::yield_now().await;
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
