// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sections --heading-base-level=0

//! Understory Sections: section headers for flat lists.
//!
//! This crate maps a flat, ordered data source onto a display list in which
//! section header rows are interleaved with the data rows, and answers the
//! position queries a list view and its fast-scroll index need. It is
//! renderer-agnostic: hosts own the views and call into this crate to decide
//! what each display position shows.
//!
//! The core concepts are:
//!
//! - [`DataSource`]: an ordered sequence of rows indexed `0..len`. Implemented
//!   for `Vec<T>`, slices, [`ArraySource`] (an owned, filterable list) and
//!   [`CursorSource`] (an adapter over database-style [`Cursor`]s).
//! - [`SectionMap`]: the ascending display positions of the headers and
//!   their labels.
//! - [`SectionBuilder`]: produces a [`SectionMap`] for a source. Either a
//!   pre-built map, or [`LabelSections`], which labels every row and opens a
//!   section whenever the label changes.
//! - [`SectionIndexMapper`]: converts between display positions, data
//!   indices and section indices, and memoizes the fast-scroll labels.
//! - [`SectionedList`]: a source, builder and mapper kept in step, resolving
//!   display positions to [`Row`]s.
//!
//! Headers are placed *before* the first row of each section, so a header at
//! display position `p` shifts every data row after it down by one. Rows
//! above the first header are shown unshifted.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_sections::{LabelSections, SectionIndexMapper};
//!
//! let mut fruits = vec!["apple", "avocado", "banana", "cherry", "cranberry"];
//! let mut by_initial = LabelSections::new(|fruit: &&str| {
//!     fruit.chars().next().map(|c| c.to_ascii_uppercase()).unwrap_or('#')
//! });
//!
//! let mut mapper = SectionIndexMapper::with_display();
//! mapper.rebuild(&mut fruits, &mut by_initial).unwrap();
//!
//! // A, apple, avocado, B, banana, C, cherry, cranberry
//! assert_eq!(mapper.total_display_count(), 8);
//! assert_eq!(mapper.section_positions(), &[0, 3, 5]);
//! assert!(mapper.is_section(3));
//! assert_eq!(mapper.data_index_for_position(4), Some(2));
//! assert_eq!(mapper.section_index_for_position(7), 2);
//! assert_eq!(mapper.position_for_section_index(1), 3);
//!
//! // Fast-scroll labels are built once per rebuild.
//! assert_eq!(mapper.fast_scroll_labels(), &["A", "B", "C"]);
//! assert_eq!(mapper.fast_scroll_position_for_label("C"), Some(5));
//! ```
//!
//! ## Cursors
//!
//! [`CursorSource`] hands the label function a cursor parked on the row being
//! labeled. The label function must not move it; doing so is reported as
//! [`SectionError::ReadPositionMoved`]. A cursor that is closed before or
//! during a rebuild makes the mapper empty and the rebuild report
//! [`SourceState::Unusable`].
//!
//! ## Logging
//!
//! Rebuilds and rejected section maps are logged through [`tracing`] under
//! the `understory_sections` targets. No subscriber is installed by this
//! crate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod array;
mod builder;
mod error;
mod fast_scroll;
mod mapper;
mod section_map;
mod sectioned;
mod source;
mod sticky;

#[cfg(test)]
mod testing;

pub use array::ArraySource;
pub use builder::{LabelSections, SectionBuilder};
pub use error::{SectionError, SectionResult};
pub use fast_scroll::FastScrollConfig;
pub use mapper::{SectionIndexMapper, SourceState};
pub use section_map::SectionMap;
pub use sectioned::{Row, RowKind, SectionedList};
pub use source::{Cursor, CursorSource, DataSource};
pub use sticky::StickyHeaders;
