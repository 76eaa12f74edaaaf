//! View State
//!
//! Everything a presenter renders, published as one value so each change is
//! observed atomically.

use serde::Serialize;

use crate::domain::{Item, ItemList};

/// Contents of the creation form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SyncPhase {
    #[default]
    Uninitialized,
    Initialized,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    /// Main list: initial fetch, plus local creates, minus local deletes
    pub items: ItemList<Item>,
    /// Items created from this view, newest first
    pub created_here: ItemList<Item>,
    /// Items seen on the creation feed, newest first
    pub observed: ItemList<Item>,
    pub draft: Draft,
    pub phase: SyncPhase,
    /// Bumped on every change
    pub revision: u64,
    /// Bumped on teardown; results issued in an older session are dropped
    pub session: u64,
}

