//! Domain Layer
//!
//! Contains the Item entity and the ordered list it is displayed in.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod item;
mod list;

pub use entity::Entity;
pub(crate) use item::null_as_default;
pub use item::{Item, ItemId, NewItem};
pub use list::ItemList;
