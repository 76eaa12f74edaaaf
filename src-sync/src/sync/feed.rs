//! Live creation feed.
//!
//! One dedicated task drains the subscription and hands each item to a single
//! handler. Releasing the feed waits for that task to stop, so nothing is
//! delivered afterwards.

use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::domain::Item;
use crate::error::SyncError;
use crate::remote::ItemSubscription;

pub(crate) struct LiveFeed {
    task: JoinHandle<()>,
}

impl LiveFeed {
    /// Spawn the handler task. `deliver` returns `false` to stop the feed.
    pub fn spawn<F>(mut subscription: ItemSubscription, mut deliver: F) -> Self
    where
        F: FnMut(Item) -> bool + Send + 'static,
    {
        let task = tokio::spawn(async move {
            while let Some(event) = subscription.next().await {
                match event {
                    Ok(item) => {
                        if !deliver(item) {
                            break;
                        }
                    }
                    Err(e) => {
                        let e = SyncError::Subscription(e);
                        tracing::warn!(error = %e, "Dropped creation feed event");
                    }
                }
            }
            tracing::info!("Creation feed ended");
            subscription.release();
        });
        Self { task }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the handler and wait until it has exited
    pub async fn release(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}
