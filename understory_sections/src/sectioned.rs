// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A data source, its section builder, and a mapper kept in step.

use core::fmt;

use tracing::warn;

use crate::{DataSource, SectionBuilder, SectionIndexMapper, SectionResult, SourceState};

/// What a display row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A section header row.
    Section,
    /// A data row.
    Item,
}

/// A display row resolved to either its section label or its data item.
#[derive(Debug, PartialEq, Eq)]
pub enum Row<'a, L, I> {
    /// A header row and the label of its section.
    Section(&'a L),
    /// A data row and the item read from the source.
    Item(I),
}

impl<L, I> Row<'_, L, I> {
    /// Whether this is a header or a data row.
    #[must_use]
    pub const fn kind(&self) -> RowKind {
        match self {
            Self::Section(_) => RowKind::Section,
            Self::Item(_) => RowKind::Item,
        }
    }
}

/// A sectioned view over a data source.
///
/// Owns the source, the [`SectionBuilder`] and a [`SectionIndexMapper`], and
/// exposes the combined list of header and data rows. Call
/// [`SectionedList::data_changed`] after mutating the source through
/// [`SectionedList::source_mut`].
///
/// A source that turns out to be unusable during a rebuild (such as a closed
/// cursor) is detached; the list is then empty until a new source is swapped
/// in.
///
/// ```rust
/// use understory_sections::{
///     ArraySource, LabelSections, Row, SectionIndexMapper, SectionedList,
/// };
///
/// let source = ArraySource::from(vec!["Ada", "Alan", "Barbara"]);
/// let builder = LabelSections::new(|name: &&str| name.chars().next().unwrap_or('#'));
/// let mut list =
///     SectionedList::with_source(source, builder, SectionIndexMapper::with_display()).unwrap();
///
/// assert_eq!(list.len(), 5);
/// assert_eq!(list.row(0), Some(Row::Section(&'A')));
/// assert_eq!(list.row(4), Some(Row::Item(&"Barbara")));
/// assert_eq!(list.mapper_mut().fast_scroll_labels(), &["A", "B"]);
/// ```
pub struct SectionedList<S, B>
where
    S: DataSource,
    B: SectionBuilder<S>,
{
    source: Option<S>,
    builder: B,
    mapper: SectionIndexMapper<B::Label>,
}

impl<S, B> fmt::Debug for SectionedList<S, B>
where
    S: DataSource + fmt::Debug,
    B: SectionBuilder<S>,
    B::Label: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionedList")
            .field("source", &self.source)
            .field("mapper", &self.mapper)
            .finish_non_exhaustive()
    }
}

impl<S, B> SectionedList<S, B>
where
    S: DataSource,
    B: SectionBuilder<S>,
{
    /// Creates a list with no source attached.
    #[must_use]
    pub fn new(builder: B, mut mapper: SectionIndexMapper<B::Label>) -> Self {
        mapper.reset(0);
        Self {
            source: None,
            builder,
            mapper,
        }
    }

    /// Creates a list over `source` and builds its sections.
    ///
    /// Fails only if the builder breaks its contract; see
    /// [`SectionIndexMapper::rebuild`].
    pub fn with_source(
        source: S,
        builder: B,
        mapper: SectionIndexMapper<B::Label>,
    ) -> SectionResult<Self> {
        let mut list = Self::new(builder, mapper);
        list.source = Some(source);
        list.data_changed()?;
        Ok(list)
    }

    /// Rebuilds the sections after the source changed.
    ///
    /// Returns [`SourceState::Unusable`] when there is no source or the
    /// source could not be read; in the latter case it is detached and
    /// dropped. Builder contract errors are returned with the source kept
    /// and the list left unsectioned.
    pub fn data_changed(&mut self) -> SectionResult<SourceState> {
        let Some(source) = self.source.as_mut() else {
            self.mapper.reset(0);
            return Ok(SourceState::Unusable);
        };
        let state = self.mapper.rebuild(source, &mut self.builder)?;
        if !state.is_usable() {
            warn!(target: "understory_sections::sectioned", "detaching unusable data source");
            self.source = None;
        }
        Ok(state)
    }

    /// Replaces the source, returning the previous one.
    ///
    /// The list shows the new source unsectioned until the next
    /// [`SectionedList::data_changed`].
    pub fn swap_source(&mut self, source: Option<S>) -> Option<S> {
        let previous = core::mem::replace(&mut self.source, source);
        let data_len = self
            .source
            .as_ref()
            .filter(|source| source.is_usable())
            .map_or(0, |source| source.len());
        self.mapper.reset(data_len);
        previous
    }

    /// The attached source, if any.
    #[must_use]
    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Mutable access to the attached source.
    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }

    /// Mutable access to the section builder.
    pub fn builder_mut(&mut self) -> &mut B {
        &mut self.builder
    }

    /// The position mapper.
    #[must_use]
    pub const fn mapper(&self) -> &SectionIndexMapper<B::Label> {
        &self.mapper
    }

    /// Mutable access to the mapper, for fast-scroll queries.
    pub fn mapper_mut(&mut self) -> &mut SectionIndexMapper<B::Label> {
        &mut self.mapper
    }

    /// Number of display rows: data rows plus headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mapper.total_display_count()
    }

    /// Returns `true` if there are no display rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether display `position` is a header or a data row.
    #[must_use]
    pub fn row_kind(&self, position: usize) -> Option<RowKind> {
        if position >= self.len() {
            None
        } else if self.mapper.is_section(position) {
            Some(RowKind::Section)
        } else {
            Some(RowKind::Item)
        }
    }

    /// Resolves display `position` to its section label or data item.
    ///
    /// Returns `None` past the end, or if the source cannot produce the item.
    pub fn row(&mut self, position: usize) -> Option<Row<'_, B::Label, &S::Item>> {
        if let Some(label) = self.mapper.section_at(position) {
            return Some(Row::Section(label));
        }
        let index = self.mapper.data_index_for_position(position)?;
        self.source.as_mut()?.item_at(index).map(Row::Item)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{Row, RowKind, SectionedList};
    use crate::testing::RowsCursor;
    use crate::{
        ArraySource, CursorSource, LabelSections, SectionError, SectionIndexMapper,
        SectionMap, SourceState,
    };

    fn initial(name: &&str) -> char {
        name.chars().next().unwrap_or('#')
    }

    fn names() -> ArraySource<&'static str> {
        ArraySource::from(vec!["Ada", "Alan", "Barbara", "Brian", "Claude"])
    }

    #[test]
    fn rows_resolve_to_labels_and_items() {
        let mut list = SectionedList::with_source(
            names(),
            LabelSections::new(initial),
            SectionIndexMapper::with_display(),
        )
        .unwrap();

        assert_eq!(list.len(), 8);
        assert_eq!(list.row(0), Some(Row::Section(&'A')));
        assert_eq!(list.row(1), Some(Row::Item(&"Ada")));
        assert_eq!(list.row(3), Some(Row::Section(&'B')));
        assert_eq!(list.row(7), Some(Row::Item(&"Claude")));
        assert_eq!(list.row(8), None);

        let kinds: Vec<_> = (0..list.len()).filter_map(|p| list.row_kind(p)).collect();
        assert_eq!(
            kinds,
            vec![
                RowKind::Section,
                RowKind::Item,
                RowKind::Item,
                RowKind::Section,
                RowKind::Item,
                RowKind::Item,
                RowKind::Section,
                RowKind::Item,
            ]
        );
        assert_eq!(list.row_kind(8), None);
        assert_eq!(list.row(6).map(|row| row.kind()), Some(RowKind::Section));
    }

    #[test]
    fn data_changed_picks_up_mutations_and_filters() {
        let mut list = SectionedList::with_source(
            names(),
            LabelSections::new(initial),
            SectionIndexMapper::with_display(),
        )
        .unwrap();

        list.source_mut().unwrap().push("Dennis");
        // Stale until told.
        assert_eq!(list.len(), 8);
        assert_eq!(list.data_changed(), Ok(SourceState::Usable));
        assert_eq!(list.len(), 10);
        assert_eq!(list.mapper_mut().fast_scroll_labels(), &["A", "B", "C", "D"]);

        list.source_mut()
            .unwrap()
            .set_filter("b", |name: &&str| name.to_string());
        list.data_changed().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.row(0), Some(Row::Section(&'B')));
        assert_eq!(list.row(2), Some(Row::Item(&"Brian")));
    }

    #[test]
    fn closed_cursor_is_detached() {
        let source = CursorSource::new(RowsCursor::new(&["Ada", "Bob"]));
        let builder = LabelSections::new(|row: &RowsCursor<'static>| row.current());
        let mapper = SectionIndexMapper::new(|label: &Option<&str>| label.unwrap_or("").to_string());
        let mut list = SectionedList::with_source(source, builder, mapper).unwrap();
        assert_eq!(list.len(), 4);

        match list.row(1) {
            Some(Row::Item(row)) => assert_eq!(row.current(), Some("Ada")),
            other => panic!("expected a data row, got {other:?}"),
        }

        list.source_mut().unwrap().cursor_mut().close();
        assert_eq!(list.data_changed(), Ok(SourceState::Unusable));
        assert!(list.source().is_none());
        assert!(list.is_empty());
        assert!(list.row(0).is_none());
    }

    #[test]
    fn closed_cursor_at_construction_is_detached() {
        let cursor = RowsCursor::new(&["Ada", "Bob"]);
        cursor.close();
        let builder = LabelSections::new(|row: &RowsCursor<'static>| row.current());
        let mapper = SectionIndexMapper::new(|label: &Option<&str>| label.unwrap_or("").to_string());
        let mut list = SectionedList::with_source(CursorSource::new(cursor), builder, mapper).unwrap();
        assert!(list.source().is_none());
        assert!(list.is_empty());
        assert_eq!(list.row_kind(0), None);
        assert!(list.row(0).is_none());
    }

    #[test]
    fn swap_source_shows_new_rows_unsectioned_until_rebuilt() {
        let mut list = SectionedList::with_source(
            names(),
            LabelSections::new(initial),
            SectionIndexMapper::with_display(),
        )
        .unwrap();

        let previous = list.swap_source(Some(ArraySource::from(vec!["Zed", "Zoe"])));
        assert_eq!(previous.map(|source| source.unfiltered_len()), Some(5));
        assert_eq!(list.len(), 2);
        assert_eq!(list.row(0), Some(Row::Item(&"Zed")));

        list.data_changed().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.row(0), Some(Row::Section(&'Z')));

        assert!(list.swap_source(None).is_some());
        assert!(list.is_empty());
        assert_eq!(list.data_changed(), Ok(SourceState::Unusable));
    }

    #[test]
    fn detached_list_is_empty() {
        let mut list: SectionedList<Vec<u8>, SectionMap<&str>> =
            SectionedList::new(SectionMap::new(), SectionIndexMapper::with_display());
        assert!(list.is_empty());
        assert_eq!(list.row(0), None);
        assert_eq!(list.data_changed(), Ok(SourceState::Unusable));
    }

    #[test]
    fn builder_errors_keep_the_source() {
        let source = CursorSource::new(RowsCursor::new(&["Ada", "Alan", "Bob"]));
        let builder = LabelSections::new(|row: &RowsCursor<'static>| {
            let label = row.current();
            let _ = row.seek(0);
            label
        });
        let mapper = SectionIndexMapper::new(|label: &Option<&str>| label.unwrap_or("").to_string());
        let mut list = SectionedList::new(builder, mapper);
        assert!(list.swap_source(Some(source)).is_none());
        assert_eq!(list.len(), 3);

        let err = list.data_changed().unwrap_err();
        assert!(matches!(err, SectionError::ReadPositionMoved { .. }));
        assert!(list.source().is_some());
        assert_eq!(list.len(), 3);
        assert_eq!(list.row_kind(0), Some(RowKind::Item));
    }
}
