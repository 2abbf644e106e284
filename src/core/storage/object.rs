// src/core/storage/object.rs

//! The object type exposed to callers: a thin handle over the AVL tree.

use super::tree::{Iter, Tree};
use crate::core::errors::DocResult;
use crate::core::value::Value;
use std::fmt;

/// A JSON object whose members are kept in ascending key order.
///
/// An empty object owns no nodes at all; every operation treats that as a
/// valid state. Inserts store a deep copy of the value they are given.
#[derive(Default)]
pub struct Object {
    tree: Tree,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of members in O(1).
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Inserts a member or overwrites the value of an existing one.
    /// Returns `true` if `key` was not present before.
    pub fn insert(&mut self, key: &str, value: &Value) -> DocResult<bool> {
        self.tree.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.tree.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.tree.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.tree.get(key).is_some()
    }

    /// Removes a member, returning its value. Fails with `NotFound` if `key` is absent.
    pub fn remove(&mut self, key: &str) -> DocResult<Value> {
        self.tree.remove(key)
    }

    pub fn try_clone(&self) -> DocResult<Object> {
        Ok(Object {
            tree: self.tree.try_clone()?,
        })
    }

    /// Releases every member. Calling it on an empty object does nothing.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn iter(&self) -> Iter<'_> {
        self.tree.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tree.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.tree.iter().map(|(_, value)| value)
    }

    /// Mutable access to every value, in no particular order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.tree.values_mut()
    }

    /// Height of the underlying tree.
    #[doc(hidden)]
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Describes the first broken tree invariant, if any.
    #[doc(hidden)]
    pub fn check_invariants(&self) -> Result<(), String> {
        self.tree.check_invariants()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.iter()
    }
}
