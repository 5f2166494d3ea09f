// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section builders: pre-built maps and per-row label functions.

use crate::{DataSource, SectionError, SectionMap, SectionResult};

/// Produces the [`SectionMap`] for a data source.
///
/// Builders come in two flavors:
/// - a pre-built [`SectionMap`], used as-is (it is cloned on every rebuild),
/// - [`LabelSections`], which labels each row and opens a section whenever
///   the label changes from the previous row.
///
/// Builders may return [`SectionError::SourceUnavailable`] if a row cannot be
/// read; the mapper treats that as an unusable source rather than a failure.
pub trait SectionBuilder<S: DataSource + ?Sized> {
    /// The section label type.
    type Label;

    /// Builds the sections for `source`.
    fn build_sections(&mut self, source: &mut S) -> SectionResult<SectionMap<Self::Label>>;
}

impl<S, L> SectionBuilder<S> for SectionMap<L>
where
    S: DataSource + ?Sized,
    L: Clone,
{
    type Label = L;

    fn build_sections(&mut self, _source: &mut S) -> SectionResult<Self> {
        Ok(self.clone())
    }
}

/// Builds sections by labeling every data row in order.
///
/// The label function borrows each row once, in index order. Consecutive rows
/// with equal labels share a section; a label that reappears after a
/// different one opens a new section.
///
/// For sources with a read position (see [`DataSource::read_position`]), the
/// label function must leave the position on the row it was given. Moving it
/// is reported as [`SectionError::ReadPositionMoved`], since every display
/// position after that row would otherwise be wrong.
///
/// ```rust
/// use understory_sections::{LabelSections, SectionBuilder};
///
/// let mut names = vec!["Ada", "Alan", "Barbara", "Claude"];
/// let mut by_initial = LabelSections::new(|name: &&str| name.chars().next());
/// let sections = by_initial.build_sections(&mut names).unwrap();
/// assert_eq!(sections.positions(), &[0, 3, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct LabelSections<F> {
    label_for: F,
}

impl<F> LabelSections<F> {
    /// Creates a builder from a per-row label function.
    #[must_use]
    pub const fn new(label_for: F) -> Self {
        Self { label_for }
    }
}

impl<S, L, F> SectionBuilder<S> for LabelSections<F>
where
    S: DataSource + ?Sized,
    L: PartialEq,
    F: FnMut(&S::Item) -> L,
{
    type Label = L;

    fn build_sections(&mut self, source: &mut S) -> SectionResult<SectionMap<L>> {
        let mut sections = SectionMap::new();
        for index in 0..source.len() {
            let Some(item) = source.item_at(index) else {
                return Err(SectionError::SourceUnavailable { index });
            };
            let label = (self.label_for)(item);
            let found = source.read_position();
            if found.is_some_and(|found| found != index) {
                return Err(SectionError::ReadPositionMoved {
                    expected: index,
                    found,
                });
            }
            sections.push_adjacent(index, label);
        }
        Ok(sections)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{LabelSections, SectionBuilder};
    use crate::testing::RowsCursor;
    use crate::{Cursor, CursorSource, SectionError, SectionMap};

    #[test]
    fn prebuilt_map_is_returned_unchanged() {
        let mut prebuilt = SectionMap::from_entries([(0, "A"), (3, "B")]).unwrap();
        let mut rows = vec![1, 2, 3];
        let built = prebuilt.build_sections(&mut rows).unwrap();
        assert_eq!(built, prebuilt);
    }

    #[test]
    fn labels_group_adjacent_rows() {
        let mut rows = vec!["apple", "avocado", "banana", "cherry", "cranberry"];
        let mut builder = LabelSections::new(|fruit: &&str| fruit.as_bytes()[0]);
        let sections = builder.build_sections(&mut rows).unwrap();
        assert_eq!(sections.positions(), &[0, 3, 5]);
        assert_eq!(sections.labels(), &[b'a', b'b', b'c']);
    }

    #[test]
    fn empty_source_yields_no_sections() {
        let mut rows: vec::Vec<&str> = vec![];
        let mut builder = LabelSections::new(|fruit: &&str| fruit.len());
        assert!(builder.build_sections(&mut rows).unwrap().is_empty());
    }

    #[test]
    fn borrowed_rows_can_be_labeled() {
        let owned: Vec<String> = ["kiwi", "kumquat", "lime"].map(String::from).into();
        let mut rows: Vec<&str> = owned.iter().map(String::as_str).collect();
        let mut builder = LabelSections::new(|fruit: &&str| fruit.chars().next());
        let sections = builder.build_sections(&mut rows).unwrap();
        assert_eq!(sections.positions(), &[0, 3]);
        assert_eq!(sections.labels(), &[Some('k'), Some('l')]);
    }

    #[test]
    fn cursor_over_borrowed_rows_can_be_labeled() {
        let owned: Vec<String> = ["Ada", "Bob"].map(String::from).into();
        let names: Vec<&str> = owned.iter().map(String::as_str).collect();
        let mut source = CursorSource::new(RowsCursor::new(&names));
        let mut builder = LabelSections::new(|row: &RowsCursor<'_>| row.position());
        let sections = builder.build_sections(&mut source).unwrap();
        assert_eq!(sections.labels(), &[Some(0), Some(1)]);
    }

    #[test]
    fn cursor_rows_are_labeled_in_place() {
        let mut source = CursorSource::new(RowsCursor::new(&["Ada", "Alan", "Bob"]));
        let mut builder = LabelSections::new(|row: &RowsCursor<'static>| {
            row.current().and_then(|name| name.chars().next())
        });
        let sections = builder.build_sections(&mut source).unwrap();
        assert_eq!(sections.positions(), &[0, 3]);
        assert_eq!(sections.labels(), &[Some('A'), Some('B')]);
    }

    #[test]
    fn moving_the_cursor_while_labeling_is_an_error() {
        let mut source = CursorSource::new(RowsCursor::new(&["Ada", "Alan", "Bob"]));
        let mut builder = LabelSections::new(|row: &RowsCursor<'static>| {
            let label = row.current();
            // Peeks at the next row and leaves the cursor there.
            let _ = row.seek(2);
            label
        });
        let err = builder.build_sections(&mut source).unwrap_err();
        assert_eq!(
            err,
            SectionError::ReadPositionMoved {
                expected: 0,
                found: Some(2),
            }
        );
    }

    #[test]
    fn cursor_closed_mid_build_reports_unavailable() {
        let mut source = CursorSource::new(RowsCursor::new(&["Ada", "Alan", "Bob"]));
        let mut builder = LabelSections::new(|row: &RowsCursor<'static>| {
            let label = row.current();
            if label == Some("Alan") {
                row.close();
            }
            label
        });
        let err = builder.build_sections(&mut source).unwrap_err();
        // Closing also drops the read position, which is not a move.
        assert_eq!(err, SectionError::SourceUnavailable { index: 2 });
    }
}
