//! Ordered collection with an always-consistent name index
//!
//! Every name-addressable collection in the graph (packages, files, types,
//! fields, methods, functions, constants, variables) is a `NamedList`. The
//! vector is the source of truth for order; the map is patched on every
//! mutation so lookups never observe a stale position.
//!
//! Index rules:
//! - empty names (embedded fields) are never indexed
//! - with duplicate names the first occurrence is indexed; removing it
//!   re-targets the key to the next remaining occurrence
//! - mutable access goes through [`ItemMut`], which re-indexes the entry on
//!   drop if its name changed

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// Anything addressable by name inside a [`NamedList`]
pub trait Named {
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<T>", into = "Vec<T>")]
#[serde(bound(
    serialize = "T: Serialize + Clone",
    deserialize = "T: Deserialize<'de> + Named"
))]
pub struct NamedList<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for NamedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Named> From<Vec<T>> for NamedList<T> {
    fn from(items: Vec<T>) -> Self {
        let mut list = NamedList {
            items,
            index: HashMap::new(),
        };
        list.rebuild();
        list
    }
}

impl<T> From<NamedList<T>> for Vec<T> {
    fn from(list: NamedList<T>) -> Self {
        list.items
    }
}

impl<T: Named> NamedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.position(name).map(|idx| &self.items[idx])
    }

    pub fn at(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<ItemMut<'_, T>> {
        let position = self.position(name)?;
        self.at_mut(position)
    }

    pub fn at_mut(&mut self, position: usize) -> Option<ItemMut<'_, T>> {
        let original = self.items.get(position)?.name().to_string();
        Some(ItemMut {
            list: self,
            position,
            original,
        })
    }

    /// Append an item, returning its position
    pub fn push(&mut self, item: T) -> usize {
        let position = self.items.len();
        let name = item.name().to_string();
        self.items.push(item);
        if !name.is_empty() {
            self.index.entry(name).or_insert(position);
        }
        position
    }

    /// Insert at `position`, shifting later entries
    pub fn insert(&mut self, position: usize, item: T) {
        let position = position.min(self.items.len());
        for idx in self.index.values_mut() {
            if *idx >= position {
                *idx += 1;
            }
        }
        let name = item.name().to_string();
        self.items.insert(position, item);
        if !name.is_empty() {
            let slot = self.index.entry(name).or_insert(position);
            if *slot > position {
                *slot = position;
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<T> {
        let position = self.position(name)?;
        self.remove_at(position)
    }

    pub fn remove_at(&mut self, position: usize) -> Option<T> {
        if position >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(position);
        for idx in self.index.values_mut() {
            if *idx > position {
                *idx -= 1;
            }
        }
        let name = removed.name();
        if !name.is_empty() && self.index.get(name) == Some(&position) {
            self.retarget(name.to_string());
        }
        Some(removed)
    }

    /// Rename the first entry called `from`; false if absent
    pub fn rename(&mut self, from: &str, to: &str) -> bool
    where
        T: Rename,
    {
        match self.get_mut(from) {
            Some(mut item) => {
                item.set_name(to.to_string());
                true
            }
            None => false,
        }
    }

    /// Remove every entry rejected by `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.items.retain(|item| keep(item));
        self.rebuild();
    }

    /// Mutate every entry, then rebuild the index once
    pub fn update_all(&mut self, mut f: impl FnMut(&mut T)) {
        for item in &mut self.items {
            f(item);
        }
        self.rebuild();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    fn rebuild(&mut self) {
        self.index.clear();
        for (position, item) in self.items.iter().enumerate() {
            let name = item.name();
            if !name.is_empty() && !self.index.contains_key(name) {
                self.index.insert(name.to_string(), position);
            }
        }
    }

    /// Point `name` at its first remaining occurrence, or drop the key
    fn retarget(&mut self, name: String) {
        match self.items.iter().position(|item| item.name() == name) {
            Some(position) => {
                self.index.insert(name, position);
            }
            None => {
                self.index.remove(&name);
            }
        }
    }

    fn reindex_renamed(&mut self, position: usize, previous: &str) {
        if !previous.is_empty() && self.index.get(previous) == Some(&position) {
            self.retarget(previous.to_string());
        }
        let current = self.items[position].name().to_string();
        if !current.is_empty() {
            let slot = self.index.entry(current).or_insert(position);
            if *slot > position {
                *slot = position;
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a NamedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Entities whose name can be changed in place
pub trait Rename: Named {
    fn set_name(&mut self, name: String);
}

/// Mutable handle into a [`NamedList`] entry
///
/// Renaming the entry through this handle is allowed; the index is patched
/// when the handle is dropped.
pub struct ItemMut<'a, T: Named> {
    list: &'a mut NamedList<T>,
    position: usize,
    original: String,
}

impl<T: Named> ItemMut<'_, T> {
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<T: Named> Deref for ItemMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.list.items[self.position]
    }
}

impl<T: Named> DerefMut for ItemMut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.list.items[self.position]
    }
}

impl<T: Named> Drop for ItemMut<'_, T> {
    fn drop(&mut self) {
        if self.list.items[self.position].name() != self.original {
            let previous = std::mem::take(&mut self.original);
            self.list.reindex_renamed(self.position, &previous);
        }
    }
}
