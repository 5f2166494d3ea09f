// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sticky ("pinned") section header queries.

use crate::SectionIndexMapper;

/// Which section headers a sticky-header overlay should show.
///
/// Produced by [`SectionIndexMapper::sticky_headers`] from the display
/// position of the topmost visible row. Positioning the header views is up to
/// the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StickyHeaders {
    /// Display position of the header to pin at the top, if the top row
    /// belongs to a section.
    pub pinned: Option<usize>,
    /// Display position of the next header below the top row, if any.
    pub next: Option<usize>,
    /// `true` when the next header is directly below the top row, so the
    /// pinned header is about to be pushed out by it.
    pub handoff: bool,
}

impl<L> SectionIndexMapper<L> {
    /// Sticky headers for a list whose topmost visible row is `top_position`.
    ///
    /// Rows above the first header have nothing pinned; the first header is
    /// reported as `next` instead.
    #[must_use]
    pub fn sticky_headers(&self, top_position: usize) -> StickyHeaders {
        let total = self.total_display_count();
        if self.section_count() == 0 || top_position >= total {
            return StickyHeaders::default();
        }

        let index = self.section_index_for_position(top_position);
        let header = self.position_for_section_index(index);
        let (pinned, next) = if header <= top_position {
            (Some(header), self.position_for_section_index(index + 1))
        } else {
            (None, header)
        };
        let next = (next < total).then_some(next);

        StickyHeaders {
            pinned,
            next,
            handoff: next == Some(top_position + 1),
        }
    }
}
