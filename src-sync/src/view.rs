//! Presentation contract.
//!
//! What a UI needs from the synchronizer: three read-only lists to render and
//! one callback per user intent. Remote work started by a callback runs on the
//! tokio runtime and is fire-and-forget for the caller.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::{Item, ItemId};
use crate::remote::RemoteDataService;
use crate::sync::{Draft, ListSynchronizer, ViewState};

#[derive(Clone)]
pub struct TodoView {
    sync: ListSynchronizer,
}

impl TodoView {
    pub fn new(service: Arc<dyn RemoteDataService>) -> Self {
        Self::from_synchronizer(ListSynchronizer::new(service))
    }

    pub fn from_synchronizer(sync: ListSynchronizer) -> Self {
        Self { sync }
    }

    /// Open the feed and run the first fetch
    pub async fn mount(&self) {
        self.sync.activate().await;
    }

    // ========================
    // Read side
    // ========================

    pub fn main_list(&self) -> Vec<Item> {
        self.sync.views().items.to_vec()
    }

    pub fn mutation_list(&self) -> Vec<Item> {
        self.sync.views().created_here.to_vec()
    }

    pub fn subscription_list(&self) -> Vec<Item> {
        self.sync.views().observed.to_vec()
    }

    pub fn draft(&self) -> Draft {
        self.sync.draft()
    }

    pub fn snapshot(&self) -> ViewState {
        self.sync.views()
    }

    /// Notified whenever anything renderable changes
    pub fn changes(&self) -> watch::Receiver<ViewState> {
        self.sync.watch()
    }

    // ========================
    // Input callbacks
    // ========================

    pub fn on_name_change(&self, text: impl Into<String>) {
        self.sync.set_draft_name(text);
    }

    pub fn on_description_change(&self, text: impl Into<String>) {
        self.sync.set_draft_description(text);
    }

    /// Submit the current draft
    pub fn on_add_clicked(&self) -> JoinHandle<()> {
        let Draft { name, description } = self.sync.draft();
        let sync = self.sync.clone();
        tokio::spawn(async move { sync.submit_create(name, description).await })
    }

    pub fn on_delete_clicked(&self, id: impl Into<ItemId>) -> JoinHandle<()> {
        let id = id.into();
        let sync = self.sync.clone();
        tokio::spawn(async move { sync.submit_delete(id).await })
    }

    /// End the session: release the feed and drop every list
    pub async fn on_sign_out(&self) {
        self.sync.teardown().await;
    }
}
