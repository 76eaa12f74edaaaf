//! Domain Layer - Core Entity Trait
//!
//! Every value that lives in an [`ItemList`](super::ItemList) is keyed by a
//! service-assigned identifier.

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}
