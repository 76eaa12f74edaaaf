//! Ordered Entity List
//!
//! Insertion-order sequence where new entries go to the front. Entries are
//! never deduplicated; removal is by identifier and drops every match.

use serde::Serialize;
use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ItemList<T> {
    entries: Vec<T>,
}

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T: Entity> ItemList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list, keeping the given order
    pub fn replace_all(&mut self, entries: Vec<T>) {
        self.entries = entries;
    }

    pub fn prepend(&mut self, entry: T) {
        self.entries.insert(0, entry);
    }

    /// Remove every entry with the given id, returning how many were dropped
    pub fn remove_by_id(&mut self, id: &T::Id) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        before - self.entries.len()
    }

    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Entity> From<Vec<T>> for ItemList<T> {
    fn from(entries: Vec<T>) -> Self {
        Self { entries }
    }
}

impl<'a, T> IntoIterator for &'a ItemList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Item, ItemId};

    fn names(list: &ItemList<Item>) -> Vec<&str> {
        list.iter().map(|item| item.name.as_str()).collect()
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut list = ItemList::new();
        list.prepend(Item::new("1", "A", ""));
        list.prepend(Item::new("2", "B", ""));
        assert_eq!(names(&list), vec!["B", "A"]);
    }

    #[test]
    fn test_remove_by_id_drops_all_matches_only() {
        let mut list = ItemList::from(vec![
            Item::new("1", "A", ""),
            Item::new("2", "B", ""),
            Item::new("1", "A again", ""),
        ]);

        assert_eq!(list.remove_by_id(&ItemId::new("1")), 2);
        assert_eq!(names(&list), vec!["B"]);
        assert_eq!(list.remove_by_id(&ItemId::new("404")), 0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_replace_all_keeps_order() {
        let mut list = ItemList::from(vec![Item::new("9", "Old", "")]);
        list.replace_all(vec![Item::new("2", "B", ""), Item::new("1", "A", "")]);
        assert_eq!(names(&list), vec!["B", "A"]);
        assert!(list.iter().all(|item| item.id != ItemId::new("9")));
    }
}
