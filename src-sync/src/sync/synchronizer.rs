//! List Synchronizer
//!
//! Keeps three item lists roughly in step with the remote service:
//! - `items`: initial fetch, then local creates and deletes
//! - `created_here`: what this view created
//! - `observed`: what the creation feed reported, from any client
//!
//! Remote failures are logged and leave state untouched. Nothing is retried
//! and the lists are never reconciled against each other.

use std::sync::{Arc, Weak};

use tokio::sync::{watch, Mutex};

use crate::domain::{Item, ItemId, NewItem};
use crate::error::{SyncError, SyncResult};
use crate::remote::RemoteDataService;
use super::feed::LiveFeed;
use super::state::{Draft, SyncPhase, ViewState};

/// Page bound for the initial fetch
pub const LIST_PAGE_LIMIT: usize = 10;

struct Shared {
    service: Arc<dyn RemoteDataService>,
    views: watch::Sender<ViewState>,
    feed: Mutex<Option<LiveFeed>>,
}

/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct ListSynchronizer {
    shared: Arc<Shared>,
}

impl ListSynchronizer {
    pub fn new(service: Arc<dyn RemoteDataService>) -> Self {
        let (views, _) = watch::channel(ViewState::default());
        Self {
            shared: Arc::new(Shared {
                service,
                views,
                feed: Mutex::new(None),
            }),
        }
    }

    // ========================
    // Lifecycle
    // ========================

    /// Open the creation feed (once) and load the first page.
    pub async fn activate(&self) {
        self.open_feed().await;
        self.initialize().await;
    }

    /// Release the feed, wait for its handler to stop, then discard all lists.
    pub async fn teardown(&self) {
        let feed = self.shared.feed.lock().await.take();
        if let Some(feed) = feed {
            feed.release().await;
            tracing::info!("Creation feed released");
        }
        self.update(|state| {
            *state = ViewState {
                revision: state.revision,
                session: state.session + 1,
                ..ViewState::default()
            };
        });
    }

    pub async fn is_live(&self) -> bool {
        self.shared
            .feed
            .lock()
            .await
            .as_ref()
            .map(|feed| !feed.is_finished())
            .unwrap_or(false)
    }

    async fn open_feed(&self) {
        let mut feed = self.shared.feed.lock().await;
        if feed.is_some() {
            tracing::debug!("Creation feed already open");
            return;
        }
        match self.shared.service.subscribe_on_create().await {
            Ok(subscription) => {
                let weak = Arc::downgrade(&self.shared);
                *feed = Some(LiveFeed::spawn(subscription, move |item| deliver(&weak, item)));
                tracing::info!("Creation feed opened");
            }
            Err(e) => {
                let e = SyncError::Subscription(e);
                tracing::warn!(error = %e, "Continuing without creation feed");
            }
        }
    }

    // ========================
    // Operations
    // ========================

    /// Replace the main list with the first page from the service.
    pub async fn initialize(&self) {
        if let Err(e) = self.fetch().await {
            tracing::warn!(error = %e, "Keeping current items");
        }
    }

    /// Create an item. An empty name is ignored without a remote call.
    pub async fn submit_create(&self, name: impl Into<String>, description: impl Into<String>) {
        let new_item = NewItem::new(name, description);
        if !new_item.is_submittable() {
            tracing::debug!("Ignoring create with empty name");
            return;
        }
        if let Err(e) = self.create(&new_item).await {
            tracing::warn!(error = %e, name = %new_item.name, "Item not added");
        }
    }

    /// Delete an item; on success every entry with that id leaves the main list.
    pub async fn submit_delete(&self, id: impl Into<ItemId>) {
        let id = id.into();
        if let Err(e) = self.delete(&id).await {
            tracing::warn!(error = %e, item_id = %id, "Item not removed");
        }
    }

    /// Record an item reported by the creation feed.
    pub fn on_remote_create(&self, item: Item) {
        tracing::debug!(item_id = %item.id, "Observed remote create");
        self.update(|state| state.observed.prepend(item));
    }

    async fn fetch(&self) -> SyncResult<usize> {
        let session = self.session();
        let items = self
            .shared
            .service
            .list(LIST_PAGE_LIMIT)
            .await
            .map_err(SyncError::Fetch)?;
        let count = items.len().min(LIST_PAGE_LIMIT);

        // Overwrites unconditionally: a create that landed while this fetch
        // was in flight is dropped from the main list.
        self.update_in(session, |state| {
            state.items.replace_all(items);
            state.items.truncate(LIST_PAGE_LIMIT);
            state.phase = SyncPhase::Initialized;
        });
        tracing::info!(count, "Loaded items");
        Ok(count)
    }

    async fn create(&self, new_item: &NewItem) -> SyncResult<Item> {
        let session = self.session();
        let item = self
            .shared
            .service
            .create(new_item)
            .await
            .map_err(SyncError::Create)?;

        let created = item.clone();
        self.update_in(session, |state| {
            state.created_here.prepend(created.clone());
            state.items.prepend(created);
            state.draft = Draft::default();
        });
        tracing::info!(item_id = %item.id, "Created item");
        Ok(item)
    }

    async fn delete(&self, id: &ItemId) -> SyncResult<usize> {
        let session = self.session();
        self.shared
            .service
            .delete(id)
            .await
            .map_err(SyncError::Delete)?;

        let mut removed = 0;
        self.update_in(session, |state| removed = state.items.remove_by_id(id));
        tracing::info!(item_id = %id, removed, "Deleted item");
        Ok(removed)
    }

    // ========================
    // Draft + Views
    // ========================

    pub fn set_draft_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.update(|state| state.draft.name = name);
    }

    pub fn set_draft_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.update(|state| state.draft.description = description);
    }

    pub fn draft(&self) -> Draft {
        self.shared.views.borrow().draft.clone()
    }

    /// Snapshot of the current state
    pub fn views(&self) -> ViewState {
        self.shared.views.borrow().clone()
    }

    /// Receiver that is notified on every change
    pub fn watch(&self) -> watch::Receiver<ViewState> {
        self.shared.views.subscribe()
    }

    fn session(&self) -> u64 {
        self.shared.views.borrow().session
    }

    fn update<F>(&self, apply: F)
    where
        F: FnOnce(&mut ViewState),
    {
        self.shared.views.send_modify(|state| {
            apply(state);
            state.revision += 1;
        });
    }

    /// Apply only if no teardown happened since `session` was read.
    /// The check and the write happen under one borrow of the channel.
    fn update_in<F>(&self, session: u64, apply: F)
    where
        F: FnOnce(&mut ViewState),
    {
        self.shared.views.send_if_modified(|state| {
            if state.session != session {
                tracing::debug!(
                    session,
                    current = state.session,
                    "Dropping result from a torn-down session"
                );
                return false;
            }
            apply(state);
            state.revision += 1;
            true
        });
    }
}

/// Feed handler: stops once every synchronizer handle is gone.
fn deliver(shared: &Weak<Shared>, item: Item) -> bool {
    match shared.upgrade() {
        Some(shared) => {
            ListSynchronizer { shared }.on_remote_create(item);
            true
        }
        None => false,
    }
}
