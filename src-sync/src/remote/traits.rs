//! Remote Layer - Core Traits
//!
//! Defines the abstract interface of the remote data service.
//! Implementations can speak GraphQL over HTTP, live in memory, etc.

use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::stream::{BoxStream, Stream};

use crate::domain::{Item, ItemId, NewItem};
use crate::error::RemoteResult;

/// Query, mutation and subscription operations over Items.
///
/// All operations are async so the caller's logical task suspends for the
/// round trip without blocking the thread.
#[async_trait]
pub trait RemoteDataService: Send + Sync {
    /// Fetch up to `limit` items, in the service's order
    async fn list(&self, limit: usize) -> RemoteResult<Vec<Item>>;

    /// Create an item; the returned value carries the canonical id
    async fn create(&self, item: &NewItem) -> RemoteResult<Item>;

    /// Delete an item by id
    async fn delete(&self, id: &ItemId) -> RemoteResult<()>;

    /// Open the live feed of creation events from any client
    async fn subscribe_on_create(&self) -> RemoteResult<ItemSubscription>;
}

/// Live feed of created items.
///
/// Lazy and unbounded; once it ends or is released it cannot be restarted.
/// Call [`ItemSubscription::release`] (or drop it) to stop delivery.
pub struct ItemSubscription {
    events: BoxStream<'static, RemoteResult<Item>>,
}

impl ItemSubscription {
    pub fn new<S>(events: S) -> Self
    where
        S: Stream<Item = RemoteResult<Item>> + Send + 'static,
    {
        Self { events: Box::pin(events) }
    }

    /// Release the underlying connection
    pub fn release(self) {
        drop(self);
    }
}

impl Stream for ItemSubscription {
    type Item = RemoteResult<Item>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for ItemSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemSubscription").finish_non_exhaustive()
    }
}
