//! Todo Sync Core
//!
//! Layered architecture:
//! - domain: Item entity and the ordered list it lives in
//! - remote: Remote data service contract, GraphQL and in-memory implementations
//! - sync: List synchronizer and its view state
//! - view: Presentation contract (read-only lists + input callbacks)

pub mod config;
pub mod domain;
pub mod error;
pub mod remote;
pub mod sync;
pub mod view;

pub use config::{AuthMode, ServiceConfig};
pub use domain::{Entity, Item, ItemId, ItemList, NewItem};
pub use error::{ConfigError, RemoteError, RemoteResult, SyncError, SyncResult};
pub use remote::{GraphQlService, InMemoryService, ItemSubscription, RemoteDataService};
pub use sync::{Draft, ListSynchronizer, SyncPhase, ViewState, LIST_PAGE_LIMIT};
pub use view::TodoView;
