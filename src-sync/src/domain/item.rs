//! Item Entity
//!
//! A named, optionally described to-do entry. The identifier is assigned by the
//! remote service and only known locally once a create call has resolved.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use super::entity::Entity;

/// Service-assigned item identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A to-do item as returned by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Item name (never empty for items created from this client)
    pub name: String,
    /// Free-form description, empty when the service has none
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

impl Item {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Creation request sent to the remote service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewItem {
    pub name: String,
    pub description: String,
}

impl NewItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Only an empty name is rejected; whitespace counts as a name.
    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Decode an explicit `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
