// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position mapping between the display list and the unsectioned data.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt::Display;
use core::ops::Range;

use tracing::{debug, error, warn};

use crate::fast_scroll::FastScroll;
use crate::{
    DataSource, FastScrollConfig, SectionBuilder, SectionError, SectionMap, SectionResult,
};

/// Whether the data source could be read during the last rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    /// Sections were built from the source.
    Usable,
    /// The source could not be read. The mapper is empty and the caller
    /// should detach the source.
    Unusable,
}

impl SourceState {
    /// Returns `true` for [`SourceState::Usable`].
    #[must_use]
    pub const fn is_usable(self) -> bool {
        matches!(self, Self::Usable)
    }
}

/// Maps display positions (header rows interleaved with data rows) to data
/// indices and section indices, and back.
///
/// The mapper owns a [`SectionMap`] and the number of data rows it was built
/// against. It does not own the data source: callers hand one to
/// [`SectionIndexMapper::rebuild`] whenever the data changes, and every query
/// afterwards answers from the stored map alone.
///
/// Fast-scroll labels are computed from the map on first read and memoized.
/// Any call that replaces the map drops them in the same step, so a stale
/// label table is never visible.
///
/// Queries outside `0..total_display_count()` are not meaningful; they
/// return `None` or the end position rather than panicking.
#[derive(Debug)]
pub struct SectionIndexMapper<L> {
    sections: SectionMap<L>,
    data_len: usize,
    fast_scroll: FastScroll<L>,
}

impl<L: Display + 'static> Default for SectionIndexMapper<L> {
    fn default() -> Self {
        Self::with_display()
    }
}

impl<L: Display + 'static> SectionIndexMapper<L> {
    /// Creates an empty mapper that uses `L`'s [`Display`] text for fast-scroll labels.
    #[must_use]
    pub fn with_display() -> Self {
        Self::new(|label: &L| label.to_string())
    }
}

impl<L> SectionIndexMapper<L> {
    /// Creates an empty mapper.
    ///
    /// `label_text` turns a section label into the text shown by a
    /// fast-scroll index.
    #[must_use]
    pub fn new(label_text: impl Fn(&L) -> String + 'static) -> Self {
        Self::with_config(FastScrollConfig::default(), label_text)
    }

    /// Creates an empty mapper with an explicit fast-scroll configuration.
    #[must_use]
    pub fn with_config(config: FastScrollConfig, label_text: impl Fn(&L) -> String + 'static) -> Self {
        Self {
            sections: SectionMap::new(),
            data_len: 0,
            fast_scroll: FastScroll::new(config, Box::new(label_text)),
        }
    }

    /// Rebuilds the sections from `source` using `builder`.
    ///
    /// This is the "data changed" hook: call it after the source changes or
    /// is swapped. The previous sections and any derived labels are replaced
    /// as a whole.
    ///
    /// - If the source is unusable, or stops producing rows part way through,
    ///   the mapper becomes empty and [`SourceState::Unusable`] is returned.
    /// - If the builder breaks its contract (moves the read position,
    ///   produces duplicate or out-of-range positions), the error is returned
    ///   and the mapper is left with no sections over the current data.
    pub fn rebuild<S, B>(&mut self, source: &mut S, builder: &mut B) -> SectionResult<SourceState>
    where
        S: DataSource + ?Sized,
        B: SectionBuilder<S, Label = L> + ?Sized,
    {
        if !source.is_usable() {
            warn!(
                target: "understory_sections::mapper",
                "data source is not usable; clearing sections"
            );
            self.reset(0);
            return Ok(SourceState::Unusable);
        }

        let data_len = source.len();
        match builder.build_sections(source) {
            Ok(sections) => {
                self.set_sections(sections, data_len)?;
                Ok(SourceState::Usable)
            }
            Err(SectionError::SourceUnavailable { index }) => {
                warn!(
                    target: "understory_sections::mapper",
                    index, "data source became unusable while building sections"
                );
                self.reset(0);
                Ok(SourceState::Unusable)
            }
            Err(err) => {
                error!(target: "understory_sections::mapper", %err, "section builder failed");
                self.reset(data_len);
                Err(err)
            }
        }
    }

    /// Installs `sections` over `data_len` data rows.
    ///
    /// Fails with [`SectionError::PositionOutOfRange`] if a section lies past
    /// the end of the resulting display list; the mapper is then left with
    /// no sections over `data_len` rows.
    pub fn set_sections(&mut self, sections: SectionMap<L>, data_len: usize) -> SectionResult<()> {
        let display_len = data_len + sections.len();
        if let Some(position) = sections.last_position().filter(|&p| p >= display_len) {
            let err = SectionError::PositionOutOfRange {
                position,
                display_len,
            };
            error!(target: "understory_sections::mapper", %err, "rejected section map");
            self.reset(data_len);
            return Err(err);
        }

        debug!(
            target: "understory_sections::mapper",
            sections = sections.len(),
            data_len,
            "sections rebuilt"
        );
        self.sections = sections;
        self.data_len = data_len;
        self.fast_scroll.invalidate();
        Ok(())
    }

    /// Drops all sections, leaving an identity mapping over `data_len` rows.
    pub fn reset(&mut self, data_len: usize) {
        self.sections = SectionMap::new();
        self.data_len = data_len;
        self.fast_scroll.invalidate();
    }

    /// The current sections.
    #[must_use]
    pub const fn sections(&self) -> &SectionMap<L> {
        &self.sections
    }

    /// Number of sections.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of data rows the sections were built against.
    #[must_use]
    pub const fn data_len(&self) -> usize {
        self.data_len
    }

    /// Section display positions in ascending order.
    #[must_use]
    pub fn section_positions(&self) -> &[usize] {
        self.sections.positions()
    }

    /// Data rows plus section rows.
    #[must_use]
    pub fn total_display_count(&self) -> usize {
        self.data_len + self.sections.len()
    }

    /// Returns `true` if `position` is a section header row.
    #[must_use]
    pub fn is_section(&self, position: usize) -> bool {
        self.sections.contains(position)
    }

    /// Label of the header at display `position`, if it is a header row.
    #[must_use]
    pub fn section_at(&self, position: usize) -> Option<&L> {
        self.sections.get(position)
    }

    /// Label of the section at `index`.
    #[must_use]
    pub fn section(&self, index: usize) -> Option<&L> {
        self.sections.label(index)
    }

    /// Index of the section that owns display `position`.
    ///
    /// A header row owns itself; a data row belongs to the closest header
    /// above it. Rows above the first header, and every row when there are
    /// no sections, report section `0`.
    #[must_use]
    pub fn section_index_for_position(&self, position: usize) -> usize {
        let preceding = self.sections.count_before(position);
        if self.sections.contains(position) {
            preceding
        } else {
            preceding.saturating_sub(1)
        }
    }

    /// Data index shown at display `position`, or `None` for header rows.
    ///
    /// Rows above the first header are not shifted. Every other data row is
    /// shifted up by the number of headers above it.
    #[must_use]
    pub fn data_index_for_position(&self, position: usize) -> Option<usize> {
        if position >= self.total_display_count() {
            return None;
        }
        let Some(first) = self.sections.first_position() else {
            return Some(position);
        };
        if self.is_section(position) {
            return None;
        }
        if position < first {
            return Some(position);
        }
        let section = self.section_index_for_position(position);
        Some(position - (section + 1))
    }

    /// Display position of the header for section `index`.
    ///
    /// Indices past the last section map to [`total_display_count`](Self::total_display_count),
    /// so a fast-scroll jump past the end lands at the end of the list.
    #[must_use]
    pub fn position_for_section_index(&self, index: usize) -> usize {
        self.sections
            .position_of(index)
            .unwrap_or_else(|| self.total_display_count())
    }

    /// Number of data rows in section `index`, or `None` if there is no such section.
    ///
    /// That is the distance from the header to the next header (or to the
    /// end of the list), minus the header itself. Rows above the first
    /// header belong to no section.
    #[must_use]
    pub fn section_len(&self, index: usize) -> Option<usize> {
        let header = self.sections.position_of(index)?;
        let end = self.position_for_section_index(index + 1);
        Some(end - header - 1)
    }

    /// Data indices of the rows in section `index`.
    #[must_use]
    pub fn data_range_for_section(&self, index: usize) -> Option<Range<usize>> {
        let header = self.sections.position_of(index)?;
        let len = self.section_len(index)?;
        // Each of the `index` earlier headers shifted this one down by a row.
        let start = header - index;
        Some(start..start + len)
    }

    /// Data index of the row `offset` rows into section `section`.
    #[must_use]
    pub fn data_index_in_section(&self, section: usize, offset: usize) -> Option<usize> {
        let range = self.data_range_for_section(section)?;
        let index = range.start.checked_add(offset)?;
        range.contains(&index).then_some(index)
    }

    /// The fast-scroll configuration.
    #[must_use]
    pub const fn fast_scroll_config(&self) -> &FastScrollConfig {
        self.fast_scroll.config()
    }

    /// Replaces the fast-scroll configuration, dropping memoized labels if it changed.
    pub fn set_fast_scroll_config(&mut self, config: FastScrollConfig) {
        self.fast_scroll.set_config(config);
    }

    /// Fast-scroll text for every section, in position order.
    ///
    /// Computed on first call after a rebuild and reused until the next one.
    pub fn fast_scroll_labels(&mut self) -> &[String] {
        self.fast_scroll.labels(&self.sections)
    }

    /// Fast-scroll section for display `position`, clamped to the label table.
    ///
    /// Same as [`section_index_for_position`](Self::section_index_for_position),
    /// except that anything outside the label table reports section `0`.
    pub fn fast_scroll_section_for_position(&mut self, position: usize) -> usize {
        let count = self.fast_scroll_labels().len();
        let index = self.section_index_for_position(position);
        if index < count { index } else { 0 }
    }

    /// Display position of the first section whose fast-scroll text is `text`.
    pub fn fast_scroll_position_for_label(&mut self, text: &str) -> Option<usize> {
        let index = self.fast_scroll.section_for_text(&self.sections, text)?;
        Some(self.position_for_section_index(index))
    }
}
