// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for section building.

use thiserror::Error;

/// Errors that can occur while building or installing a [`SectionMap`](crate::SectionMap).
///
/// All variants except [`SectionError::SourceUnavailable`] describe a broken
/// contract on the caller's side and are returned to the caller as-is.
/// `SourceUnavailable` is recoverable: [`SectionIndexMapper::rebuild`](crate::SectionIndexMapper::rebuild)
/// absorbs it and reports [`SourceState::Unusable`](crate::SourceState::Unusable) instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    /// Two sections were placed at the same display position.
    #[error("duplicate section at display position {position}")]
    DuplicatePosition {
        /// The repeated display position.
        position: usize,
    },

    /// A section was placed past the end of the display list.
    #[error("section at display position {position} is outside a display list of {display_len} rows")]
    PositionOutOfRange {
        /// The offending display position.
        position: usize,
        /// Data rows plus section rows.
        display_len: usize,
    },

    /// A label function moved the source's read position while labeling a row.
    #[error("read position moved while labeling row {expected} (now at {found:?})")]
    ReadPositionMoved {
        /// The row that was being labeled.
        expected: usize,
        /// Where the read position was found afterwards.
        found: Option<usize>,
    },

    /// The data source stopped producing rows part way through a build.
    #[error("data source became unusable at row {index}")]
    SourceUnavailable {
        /// The first row that could not be read.
        index: usize,
    },
}

/// Result type for section operations.
pub type SectionResult<T> = Result<T, SectionError>;
