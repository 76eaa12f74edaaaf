//! Remote Layer
//!
//! The data service contract and its implementations.

mod traits;
mod documents;
mod sse;
mod graphql;
mod memory;

#[cfg(test)]
mod tests;

pub use traits::{ItemSubscription, RemoteDataService};
pub use graphql::GraphQlService;
pub use memory::{Call, Hold, InMemoryService, Operation};
