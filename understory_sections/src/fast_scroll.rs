// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fast-scroll label configuration and the memoized label table.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use tracing::trace;

use crate::SectionMap;

/// Configuration for the labels shown by a fast-scroll index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FastScrollConfig {
    /// Maximum number of characters per label, or `None` for no limit.
    ///
    /// Some older fast-scroll overlays can only fit a few characters; longer
    /// labels are cut to this many characters.
    pub max_label_len: Option<usize>,
}

impl FastScrollConfig {
    /// Label length limit used by legacy fast-scroll overlays.
    pub const LEGACY_MAX_LABEL_LEN: usize = 3;

    /// Creates a configuration with no label length limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_label_len: None,
        }
    }

    /// Creates a configuration that cuts labels to [`Self::LEGACY_MAX_LABEL_LEN`] characters.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            max_label_len: Some(Self::LEGACY_MAX_LABEL_LEN),
        }
    }

    /// Returns a copy with the given label length limit.
    #[must_use]
    pub const fn with_max_label_len(mut self, max_label_len: Option<usize>) -> Self {
        self.max_label_len = max_label_len;
        self
    }

    /// Applies the label length limit to `text`.
    #[must_use]
    pub fn apply(&self, mut text: String) -> String {
        if let Some(max) = self.max_label_len {
            if let Some((byte, _)) = text.char_indices().nth(max) {
                text.truncate(byte);
            }
        }
        text
    }
}

/// Display text for every section plus a text → section index lookup.
#[derive(Debug, Default)]
struct LabelTable {
    labels: Vec<String>,
    by_text: HashMap<String, usize>,
}

impl LabelTable {
    fn build<L>(
        sections: &SectionMap<L>,
        label_text: &dyn Fn(&L) -> String,
        config: &FastScrollConfig,
    ) -> Self {
        let mut table = Self {
            labels: Vec::with_capacity(sections.len()),
            by_text: HashMap::with_capacity(sections.len()),
        };
        for (index, label) in sections.labels().iter().enumerate() {
            let text = config.apply(label_text(label));
            table.by_text.entry(text.clone()).or_insert(index);
            table.labels.push(text);
        }
        table
    }
}

/// Memoized fast-scroll labels for one [`SectionMap`].
///
/// The table is dropped by [`FastScroll::invalidate`] whenever the owning
/// mapper replaces its sections, and rebuilt on the next read.
pub(crate) struct FastScroll<L> {
    config: FastScrollConfig,
    label_text: Box<dyn Fn(&L) -> String>,
    table: Option<LabelTable>,
}

impl<L> fmt::Debug for FastScroll<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastScroll")
            .field("config", &self.config)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl<L> FastScroll<L> {
    pub(crate) fn new(config: FastScrollConfig, label_text: Box<dyn Fn(&L) -> String>) -> Self {
        Self {
            config,
            label_text,
            table: None,
        }
    }

    pub(crate) const fn config(&self) -> &FastScrollConfig {
        &self.config
    }

    pub(crate) fn set_config(&mut self, config: FastScrollConfig) {
        if config != self.config {
            self.config = config;
            self.invalidate();
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.table = None;
    }

    #[cfg(test)]
    pub(crate) const fn is_cached(&self) -> bool {
        self.table.is_some()
    }

    fn table(&mut self, sections: &SectionMap<L>) -> &LabelTable {
        let label_text = &*self.label_text;
        let config = &self.config;
        self.table.get_or_insert_with(|| {
            trace!(
                target: "understory_sections::fast_scroll",
                sections = sections.len(),
                "building fast-scroll labels"
            );
            LabelTable::build(sections, label_text, config)
        })
    }

    pub(crate) fn labels(&mut self, sections: &SectionMap<L>) -> &[String] {
        &self.table(sections).labels
    }

    pub(crate) fn section_for_text(&mut self, sections: &SectionMap<L>, text: &str) -> Option<usize> {
        self.table(sections).by_text.get(text).copied()
    }
}
