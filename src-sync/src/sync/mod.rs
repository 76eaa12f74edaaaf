//! Sync Layer
//!
//! Local projection of the remote item list.

mod feed;
mod state;
mod synchronizer;


pub use state::{Draft, SyncPhase, ViewState};
pub use synchronizer::{ListSynchronizer, LIST_PAGE_LIMIT};
