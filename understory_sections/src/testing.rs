// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test helpers shared by the unit tests.

use alloc::vec::Vec;
use core::cell::Cell;

use crate::Cursor;

/// An in-memory [`Cursor`] over string rows.
///
/// Position and open state live in cells, like a cursor sharing a database
/// connection, so a label function holding `&RowsCursor` can still move or
/// close it.
#[derive(Debug, Clone)]
pub(crate) struct RowsCursor<'r> {
    rows: Vec<&'r str>,
    position: Cell<Option<usize>>,
    closed: Cell<bool>,
}

impl<'r> RowsCursor<'r> {
    pub(crate) fn new(rows: &[&'r str]) -> Self {
        Self {
            rows: rows.to_vec(),
            position: Cell::new(None),
            closed: Cell::new(false),
        }
    }

    /// The row the cursor is parked on.
    pub(crate) fn current(&self) -> Option<&'r str> {
        self.rows.get(self.position.get()?).copied()
    }

    /// Moves through a shared reference.
    pub(crate) fn seek(&self, position: usize) -> bool {
        if self.closed.get() || position >= self.rows.len() {
            return false;
        }
        self.position.set(Some(position));
        true
    }

    pub(crate) fn close(&self) {
        self.closed.set(true);
        self.position.set(None);
    }
}

impl Cursor for RowsCursor<'_> {
    fn count(&self) -> usize {
        self.rows.len()
    }

    fn is_closed(&self) -> bool {
        self.closed.get()
    }

    fn position(&self) -> Option<usize> {
        self.position.get()
    }

    fn move_to_position(&mut self, position: usize) -> bool {
        self.seek(position)
    }
}
