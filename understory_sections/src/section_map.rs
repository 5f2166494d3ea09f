// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered mapping from display position to section label.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::{SectionError, SectionResult};

/// An ordered mapping from display position to section label.
///
/// Positions are strictly increasing. Each one marks a header row in the
/// display list; every other display position is a data row. The map may be
/// empty, in which case the display list is the data list.
///
/// Positions and labels are stored as parallel vectors so that "how many
/// sections precede this position" is a binary search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionMap<L> {
    positions: Vec<usize>,
    labels: Vec<L>,
}

impl<L> Default for SectionMap<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> SectionMap<L> {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Builds a map from `(display position, label)` pairs in any order.
    ///
    /// Returns [`SectionError::DuplicatePosition`] if two entries share a position.
    pub fn from_entries<I>(entries: I) -> SectionResult<Self>
    where
        I: IntoIterator<Item = (usize, L)>,
    {
        let mut entries: Vec<(usize, L)> = entries.into_iter().collect();
        entries.sort_by_key(|(position, _)| *position);

        let mut map = Self {
            positions: Vec::with_capacity(entries.len()),
            labels: Vec::with_capacity(entries.len()),
        };
        for (position, label) in entries {
            if map.positions.last() == Some(&position) {
                return Err(SectionError::DuplicatePosition { position });
            }
            map.positions.push(position);
            map.labels.push(label);
        }
        Ok(map)
    }

    /// Builds a map from one label per data row.
    ///
    /// A new section opens every time a label differs from the label of the
    /// previous row. A label that comes back after a different one opens a
    /// second section with the same label.
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: PartialEq,
    {
        let mut map = Self::new();
        for (data_index, label) in labels.into_iter().enumerate() {
            map.push_adjacent(data_index, label);
        }
        map
    }

    /// Appends the label of data row `data_index`, opening a section only if
    /// it differs from the last section's label.
    ///
    /// Rows must be pushed in ascending order.
    pub(crate) fn push_adjacent(&mut self, data_index: usize, label: L)
    where
        L: PartialEq,
    {
        if self.labels.last() != Some(&label) {
            self.positions.push(data_index + self.positions.len());
            self.labels.push(label);
        }
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if there are no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Section display positions in ascending order.
    #[must_use]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Section labels in position order.
    #[must_use]
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Iterates `(display position, label)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &L)> {
        self.positions.iter().copied().zip(self.labels.iter())
    }

    /// Display position of the first section, if any.
    #[must_use]
    pub fn first_position(&self) -> Option<usize> {
        self.positions.first().copied()
    }

    /// Display position of the last section, if any.
    #[must_use]
    pub fn last_position(&self) -> Option<usize> {
        self.positions.last().copied()
    }

    /// Returns `true` if `position` is a section position.
    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        self.positions.binary_search(&position).is_ok()
    }

    /// Label of the section at display `position`, if that position is a section.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&L> {
        let index = self.positions.binary_search(&position).ok()?;
        self.labels.get(index)
    }

    /// Number of sections whose position is strictly less than `position`.
    #[must_use]
    pub fn count_before(&self, position: usize) -> usize {
        self.positions.partition_point(|&p| p < position)
    }

    /// Display position of the section at `index`.
    #[must_use]
    pub fn position_of(&self, index: usize) -> Option<usize> {
        self.positions.get(index).copied()
    }

    /// Label of the section at `index`.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&L> {
        self.labels.get(index)
    }
}

impl<L> From<BTreeMap<usize, L>> for SectionMap<L> {
    fn from(map: BTreeMap<usize, L>) -> Self {
        let (positions, labels) = map.into_iter().unzip();
        Self { positions, labels }
    }
}
