// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data source capability and the cursor adapter.

use alloc::vec::Vec;

/// An ordered, randomly accessible sequence of data rows, indexed `0..len`.
///
/// This is the only thing section building needs from the host's data. The
/// mapper never changes the rows; `item_at` takes `&mut self` so that
/// cursor-like sources can move a read position to the requested row.
pub trait DataSource {
    /// The row type handed out by [`DataSource::item_at`].
    type Item: ?Sized;

    /// Number of data rows.
    fn len(&self) -> usize;

    /// Returns `true` if there are no data rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `false` once the source can no longer be read (for example, a
    /// closed database cursor).
    fn is_usable(&self) -> bool {
        true
    }

    /// Returns the row at `index`, or `None` if it cannot be read.
    fn item_at(&mut self, index: usize) -> Option<&Self::Item>;

    /// Current read position for sources that have one.
    ///
    /// Sources without a read position return `None`, which disables the
    /// "label function moved the cursor" check during section building.
    fn read_position(&self) -> Option<usize> {
        None
    }
}

impl<T> DataSource for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn item_at(&mut self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> DataSource for [T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn item_at(&mut self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

/// A forward-and-back cursor over query results, in the style of a database cursor.
///
/// A cursor is always parked on at most one row. Reading column values is up to
/// the implementation; section building only moves and inspects the position.
pub trait Cursor {
    /// Number of rows in the result set.
    fn count(&self) -> usize;

    /// Returns `true` once the cursor has been closed.
    fn is_closed(&self) -> bool;

    /// The row the cursor is parked on, or `None` if it is before the first
    /// row or otherwise not on a row.
    fn position(&self) -> Option<usize>;

    /// Moves to `position`. Returns `false` if the move failed.
    fn move_to_position(&mut self, position: usize) -> bool;
}

/// Adapts a [`Cursor`] into a [`DataSource`].
///
/// Rows are handed out as `&C` parked on the requested row. Label functions
/// must read from that row without moving the cursor (cursors that share a
/// connection can still move through interior mutability); section building
/// checks [`Cursor::position`] after each label and fails with
/// [`SectionError::ReadPositionMoved`](crate::SectionError::ReadPositionMoved)
/// if it changed.
#[derive(Debug, Clone)]
pub struct CursorSource<C> {
    cursor: C,
}

impl<C: Cursor> CursorSource<C> {
    /// Wraps `cursor`.
    #[must_use]
    pub const fn new(cursor: C) -> Self {
        Self { cursor }
    }

    /// Returns a shared reference to the wrapped cursor.
    #[must_use]
    pub const fn cursor(&self) -> &C {
        &self.cursor
    }

    /// Returns a mutable reference to the wrapped cursor.
    pub fn cursor_mut(&mut self) -> &mut C {
        &mut self.cursor
    }

    /// Unwraps the cursor.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.cursor
    }
}

impl<C: Cursor> DataSource for CursorSource<C> {
    type Item = C;

    fn len(&self) -> usize {
        if self.cursor.is_closed() {
            0
        } else {
            self.cursor.count()
        }
    }

    fn is_usable(&self) -> bool {
        !self.cursor.is_closed()
    }

    fn item_at(&mut self, index: usize) -> Option<&C> {
        if self.cursor.is_closed() || !self.cursor.move_to_position(index) {
            return None;
        }
        Some(&self.cursor)
    }

    fn read_position(&self) -> Option<usize> {
        self.cursor.position()
    }
}
