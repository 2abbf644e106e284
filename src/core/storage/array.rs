// src/core/storage/array.rs

//! The dynamic array backing `Value::Array`: an ordered, growable sequence of
//! owned values that may mix variants.

use crate::core::errors::{DocError, DocResult};
use crate::core::value::Value;
use crate::core::value::compare::{self, find_cmp};
use std::cmp::Ordering;
use std::fmt;
use std::slice;
use tracing::debug;

/// The capacity of a newly created array.
pub const DEFAULT_CAPACITY: usize = 8;

/// The largest element count whose backing storage still fits in `isize::MAX` bytes.
pub const MAX_ELEMENTS: usize = isize::MAX as usize / std::mem::size_of::<Value>();

/// An ordered sequence of owned values.
///
/// The logical capacity starts at `DEFAULT_CAPACITY`, doubles whenever a push
/// finds the array full, and never shrinks. Pushes take a deep copy of the
/// value they are given.
pub struct Array {
    values: Vec<Value>,
    capacity: usize,
}

impl Default for Array {
    fn default() -> Self {
        Self::new()
    }
}

impl Array {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty array with the given starting capacity (at least 1).
    /// Storage is reserved lazily on the first push.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::new(),
            capacity: capacity.clamp(1, MAX_ELEMENTS),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Value> {
        self.values.iter_mut()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Appends a deep copy of `value`.
    pub fn push_back(&mut self, value: &Value) -> DocResult<()> {
        self.insert_copy(self.values.len(), value, MAX_ELEMENTS)
    }

    /// Prepends a deep copy of `value`, shifting every element up by one.
    pub fn push_front(&mut self, value: &Value) -> DocResult<()> {
        self.insert_copy(0, value, MAX_ELEMENTS)
    }

    /// Removes the last element and hands its ownership to the caller.
    pub fn pop_back(&mut self) -> DocResult<Value> {
        self.values.pop().ok_or(DocError::NotFound)
    }

    /// Removes the first element and hands its ownership to the caller.
    pub fn pop_front(&mut self) -> DocResult<Value> {
        if self.values.is_empty() {
            return Err(DocError::NotFound);
        }
        Ok(self.values.remove(0))
    }

    /// Releases the element at `index` and shifts the rest down.
    pub fn remove_at(&mut self, index: usize) -> DocResult<()> {
        if index >= self.values.len() {
            return Err(DocError::NotFound);
        }
        drop(self.values.remove(index));
        Ok(())
    }

    pub fn get(&self, index: usize) -> DocResult<&Value> {
        self.values.get(index).ok_or(DocError::NotFound)
    }

    pub fn get_mut(&mut self, index: usize) -> DocResult<&mut Value> {
        self.values.get_mut(index).ok_or(DocError::NotFound)
    }

    /// Returns the first element equal to `value`. Elements of other variants never match.
    pub fn find_first(&self, value: &Value) -> Option<&Value> {
        self.values
            .iter()
            .find(|e| find_cmp(e, value, Ordering::Greater) == Ordering::Equal)
    }

    /// Returns the last element equal to `value`.
    pub fn find_last(&self, value: &Value) -> Option<&Value> {
        self.values
            .iter()
            .rev()
            .find(|e| find_cmp(e, value, Ordering::Greater) == Ordering::Equal)
    }

    /// Returns the first element of `value`'s variant that is not equal to it.
    /// Elements of other variants are skipped.
    pub fn find_first_not(&self, value: &Value) -> Option<&Value> {
        self.values
            .iter()
            .find(|e| find_cmp(e, value, Ordering::Equal) != Ordering::Equal)
    }

    /// Returns the last element of `value`'s variant that is not equal to it.
    pub fn find_last_not(&self, value: &Value) -> Option<&Value> {
        self.values
            .iter()
            .rev()
            .find(|e| find_cmp(e, value, Ordering::Equal) != Ordering::Equal)
    }

    /// Sorts the elements with their variant's comparator. Every element must
    /// share one variant; a mixed array is rejected and left as it was.
    /// The sort is not stable.
    pub fn sort(&mut self) -> DocResult<()> {
        let Some(first) = self.values.first() else {
            return Ok(());
        };
        let kind = first.kind();
        if self.values.iter().any(|v| v.kind() != kind) {
            return Err(DocError::Unsupported);
        }
        let cmp = compare::comparator(kind);
        self.values
            .sort_unstable_by(|a, b| cmp(a, b).then_with(|| compare::sort_tiebreak(a, b)));
        Ok(())
    }

    /// Deep-copies the array, keeping its capacity.
    pub fn try_clone(&self) -> DocResult<Array> {
        let mut values = Vec::new();
        values.try_reserve_exact(self.capacity.max(self.values.len()))?;
        for value in &self.values {
            values.push(value.try_clone()?);
        }
        Ok(Array {
            values,
            capacity: self.capacity,
        })
    }

    /// Releases every element. The capacity is kept.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Copies `value` in at `index`. Nothing changes if the copy or the growth fails.
    fn insert_copy(&mut self, index: usize, value: &Value, limit: usize) -> DocResult<()> {
        let copy = value.try_clone()?;
        self.reserve_slot(limit)?;
        self.values.insert(index, copy);
        Ok(())
    }

    /// Makes room for one more element, doubling the capacity when the array
    /// is full. `limit` caps the element count.
    fn reserve_slot(&mut self, limit: usize) -> DocResult<()> {
        let len = self.values.len();
        if len >= limit {
            return Err(DocError::TooLarge);
        }
        if len == self.capacity {
            let grown = self.capacity.saturating_mul(2).min(limit);
            self.values.try_reserve_exact(grown - len)?;
            debug!(from = self.capacity, to = grown, "array capacity doubled");
            self.capacity = grown;
        } else if self.values.capacity() < self.capacity {
            self.values.try_reserve_exact(self.capacity - len)?;
        }
        Ok(())
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
