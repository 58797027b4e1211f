//! Ordered lists keyed by a stable identity
//!
//! Gardener treats a reordering of `spec.extensions` or of the worker list as a
//! change. [`KeyedList`] only ever replaces entries in place or appends new
//! ones, so existing entries keep their position.

use crds::{AccessRestrictionWithOptions, Extension, NamedResourceReference, Worker};

/// Item with a stable identity inside a list
pub trait Keyed {
    /// Identity of the item
    fn key(&self) -> &str;
}

impl Keyed for Extension {
    fn key(&self) -> &str {
        &self.extension_type
    }
}

impl Keyed for Worker {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Keyed for AccessRestrictionWithOptions {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Keyed for NamedResourceReference {
    fn key(&self) -> &str {
        &self.name
    }
}

/// Insertion-ordered list with at most one item per key
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedList<T> {
    items: Vec<T>,
}

impl<T> Default for KeyedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed> KeyedList<T> {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the item with `key`
    pub fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    /// Item with `key`
    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    /// Replace the item with the same key in place, or append it
    pub fn upsert(&mut self, item: T) {
        match self.position(item.key()) {
            Some(index) => self.items[index] = item,
            None => self.items.push(item),
        }
    }

    /// Append the item unless its key is already present; true when appended
    pub fn append_if_absent(&mut self, item: T) -> bool {
        if self.position(item.key()).is_some() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Keys in list order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(Keyed::key)
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the list is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in list order
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Keyed> From<Vec<T>> for KeyedList<T> {
    /// Later duplicates of a key are dropped
    fn from(items: Vec<T>) -> Self {
        let mut list = Self::new();
        for item in items {
            list.append_if_absent(item);
        }
        list
    }
}
