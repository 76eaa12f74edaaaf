//! In-memory Remote Data Service
//!
//! Holds items in process and fans creation events out to every open feed.
//! Doubles as the offline backend and as the service used by tests, which can
//! inject failures and hold calls open to control completion order.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::{Mutex, Notify};

use crate::domain::{Item, ItemId, NewItem};
use crate::error::{RemoteError, RemoteResult};
use super::traits::{ItemSubscription, RemoteDataService};

const FEED_CAPACITY: usize = 64;

/// Remote operation kinds, used for failure injection and holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Delete,
    Subscribe,
}

/// A recorded call, in issue order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(usize),
    Create(NewItem),
    Delete(ItemId),
    Subscribe,
}

#[derive(Debug, Default)]
struct MemoryState {
    items: Vec<Item>,
    next_id: u64,
    fail_next: Vec<Operation>,
    holds: HashMap<Operation, Arc<Notify>>,
    calls: Vec<Call>,
}

/// Handle to a held call; the call completes once this is released
#[derive(Debug, Clone)]
pub struct Hold(Arc<Notify>);

impl Hold {
    pub fn release(&self) {
        self.0.notify_one();
    }
}

pub struct InMemoryService {
    state: Mutex<MemoryState>,
    events: broadcast::Sender<Item>,
}

impl InMemoryService {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Seed the store; `list` returns items in this order
    pub fn with_items(items: Vec<Item>) -> Self {
        let (events, _) = broadcast::channel(FEED_CAPACITY);
        let next_id = items.len() as u64 + 1;
        Self {
            state: Mutex::new(MemoryState {
                items,
                next_id,
                ..Default::default()
            }),
            events,
        }
    }

    /// Make the next call of `op` fail
    pub async fn fail_next(&self, op: Operation) {
        self.state.lock().await.fail_next.push(op);
    }

    /// Keep the next call of `op` pending until the returned hold is released
    pub async fn hold_next(&self, op: Operation) -> Hold {
        let notify = Arc::new(Notify::new());
        self.state.lock().await.holds.insert(op, notify.clone());
        Hold(notify)
    }

    /// Simulate a creation by another client
    pub fn emit_remote_create(&self, item: Item) {
        // No open feed is not an error
        let _ = self.events.send(item);
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.state.lock().await.calls.clone()
    }

    pub async fn stored_items(&self) -> Vec<Item> {
        self.state.lock().await.items.clone()
    }

    pub fn open_feeds(&self) -> usize {
        self.events.receiver_count()
    }

    /// Record the call and pick up a pending hold for it
    async fn record(&self, op: Operation, call: Call) -> Option<Arc<Notify>> {
        let mut state = self.state.lock().await;
        state.calls.push(call);
        state.holds.remove(&op)
    }

    /// Wait out a hold, then consume a queued failure for `op`
    async fn settle(&self, op: Operation, hold: Option<Arc<Notify>>) -> RemoteResult<()> {
        if let Some(hold) = hold {
            hold.notified().await;
        }

        let mut state = self.state.lock().await;
        if let Some(pos) = state.fail_next.iter().position(|queued| *queued == op) {
            state.fail_next.remove(pos);
            return Err(RemoteError::Unavailable(format!("{:?} rejected", op)));
        }
        Ok(())
    }

    async fn begin(&self, op: Operation, call: Call) -> RemoteResult<()> {
        let hold = self.record(op, call).await;
        self.settle(op, hold).await
    }
}

impl Default for InMemoryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteDataService for InMemoryService {
    async fn list(&self, limit: usize) -> RemoteResult<Vec<Item>> {
        let hold = self.record(Operation::List, Call::List(limit)).await;
        // The page is read before a hold, like a response still on the wire
        let page: Vec<Item> = {
            let state = self.state.lock().await;
            state.items.iter().take(limit).cloned().collect()
        };
        self.settle(Operation::List, hold).await?;
        Ok(page)
    }

    async fn create(&self, item: &NewItem) -> RemoteResult<Item> {
        self.begin(Operation::Create, Call::Create(item.clone())).await?;
        let created = {
            let mut state = self.state.lock().await;
            let created = Item::new(
                state.next_id.to_string(),
                item.name.clone(),
                item.description.clone(),
            );
            state.next_id += 1;
            state.items.insert(0, created.clone());
            created
        };
        self.emit_remote_create(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: &ItemId) -> RemoteResult<()> {
        self.begin(Operation::Delete, Call::Delete(id.clone())).await?;
        self.state.lock().await.items.retain(|item| &item.id != id);
        Ok(())
    }

    async fn subscribe_on_create(&self) -> RemoteResult<ItemSubscription> {
        self.begin(Operation::Subscribe, Call::Subscribe).await?;
        let mut receiver = self.events.subscribe();
        let events = async_stream::stream! {
            loop {
                match receiver.recv().await {
                    Ok(item) => {
                        yield Ok(item);
                    }
                    Err(RecvError::Lagged(missed)) => {
                        let message = format!("feed lagged, {} events dropped", missed);
                        yield Err(RemoteError::Feed(message));
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        };
        Ok(ItemSubscription::new(events))
    }
}
