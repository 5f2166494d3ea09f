// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An owned, mutable array source with an optional prefix filter.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::ops::Range;

use crate::DataSource;

/// Case-insensitive "starts with" filter over a caller-supplied text function.
struct PrefixFilter<T> {
    prefix: String,
    text: Box<dyn Fn(&T) -> String>,
}

impl<T> PrefixFilter<T> {
    fn matches(&self, item: &T) -> bool {
        (self.text)(item)
            .trim()
            .to_lowercase()
            .starts_with(&self.prefix)
    }
}

/// An owned list of items usable as a [`DataSource`].
///
/// Mutations address the *unfiltered* items. When a prefix filter is active,
/// the source exposes only the matching items (in order), and every mutation
/// re-runs the filter.
///
/// Each change bumps [`ArraySource::generation`], which hosts can compare to
/// decide when sections need rebuilding.
pub struct ArraySource<T> {
    items: Vec<T>,
    /// Indices into `items` that pass the filter, or `None` when unfiltered.
    visible: Option<Vec<usize>>,
    filter: Option<PrefixFilter<T>>,
    generation: u64,
}

impl<T: fmt::Debug> fmt::Debug for ArraySource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArraySource")
            .field("items", &self.items)
            .field("visible", &self.visible)
            .field("filter", &self.filter.as_ref().map(|filter| &filter.prefix))
            .field("generation", &self.generation)
            .finish()
    }
}

impl<T> Default for ArraySource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for ArraySource<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            visible: None,
            filter: None,
            generation: 0,
        }
    }
}

impl<T> ArraySource<T> {
    /// Creates an empty source.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            visible: None,
            filter: None,
            generation: 0,
        }
    }

    /// Change counter, bumped by every mutation and filter change.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of items ignoring any filter.
    #[must_use]
    pub fn unfiltered_len(&self) -> usize {
        self.items.len()
    }

    /// All items, ignoring any filter.
    #[must_use]
    pub fn unfiltered(&self) -> &[T] {
        &self.items
    }

    /// Visible item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        match &self.visible {
            Some(visible) => self.items.get(*visible.get(index)?),
            None => self.items.get(index),
        }
    }

    /// Iterates the visible items in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.visible_len()).filter_map(|index| self.get(index))
    }

    fn visible_len(&self) -> usize {
        self.visible
            .as_ref()
            .map_or(self.items.len(), |visible| visible.len())
    }

    /// Index of the first visible item equal to `item`.
    #[must_use]
    pub fn position_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|candidate| candidate == item)
    }

    /// Appends `item`.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.changed();
    }

    /// Appends every item of `items`.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.items.extend(items);
        self.changed();
    }

    /// Inserts `item` at unfiltered `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > unfiltered_len()`.
    pub fn insert(&mut self, index: usize, item: T) {
        self.items.insert(index, item);
        self.changed();
    }

    /// Inserts `items` starting at unfiltered `index`, keeping their order.
    ///
    /// # Panics
    ///
    /// Panics if `index > unfiltered_len()`.
    pub fn insert_all<I: IntoIterator<Item = T>>(&mut self, index: usize, items: I) {
        let tail = self.items.split_off(index);
        self.items.extend(items);
        self.items.extend(tail);
        self.changed();
    }

    /// Removes and returns the item at unfiltered `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.changed();
        Some(item)
    }

    /// Removes the unfiltered items in `range`, returning them in order.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn remove_range(&mut self, range: Range<usize>) -> Vec<T> {
        let removed = self.items.drain(range).collect();
        self.changed();
        removed
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.changed();
    }

    /// Sorts the unfiltered items with `compare` (stable).
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(compare);
        self.changed();
    }

    /// Shows only items whose text starts with `prefix`, ignoring case and
    /// surrounding whitespace.
    ///
    /// An empty (or all-whitespace) prefix clears the filter.
    pub fn set_filter(&mut self, prefix: &str, text: impl Fn(&T) -> String + 'static) {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            self.clear_filter();
            return;
        }
        self.filter = Some(PrefixFilter {
            prefix,
            text: Box::new(text),
        });
        self.changed();
    }

    /// Removes the filter, exposing every item again.
    pub fn clear_filter(&mut self) {
        if self.filter.take().is_some() {
            self.changed();
        }
    }

    /// Returns `true` while a filter is active.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }

    fn changed(&mut self) {
        self.visible = self.filter.as_ref().map(|filter| {
            self.items
                .iter()
                .enumerate()
                .filter(|(_, item)| filter.matches(item))
                .map(|(index, _)| index)
                .collect()
        });
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<T> DataSource for ArraySource<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.visible_len()
    }

    fn item_at(&mut self, index: usize) -> Option<&T> {
        self.get(index)
    }
}
