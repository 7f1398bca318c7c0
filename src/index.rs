//! Immutable document lookup table.
//!
//! [`DocIndex`] is built once from the manifest and passed by reference to
//! anything that needs document lookups — there is no module-level registry
//! and no mutation after construction. An index built from an empty manifest
//! is well-formed: every lookup simply misses, so consumers only ever need
//! to check individual results, never the index itself.
//!
//! ## Two orderings
//!
//! `adjacent` walks the record list sorted by `(section, order)`, which is
//! deliberately a different ordering than the sidebar's per-section
//! `(order, title)` sort. The two are independently specified; neither is
//! derived from the other.

use crate::types::DocumentRecord;
use std::collections::HashMap;

/// Previous/next neighbors of a document in reading order.
#[derive(Debug, PartialEq)]
pub struct Adjacent<'a> {
    pub prev: Option<&'a DocumentRecord>,
    pub next: Option<&'a DocumentRecord>,
}

/// Lookup table over the manifest's records.
#[derive(Debug)]
pub struct DocIndex {
    docs: Vec<DocumentRecord>,
    by_slug: HashMap<String, usize>,
    /// Record positions sorted by `(section, order)`, precomputed because
    /// every `adjacent` call walks this ordering.
    reading_order: Vec<usize>,
}

impl DocIndex {
    pub fn new(docs: Vec<DocumentRecord>) -> Self {
        let by_slug = docs
            .iter()
            .enumerate()
            .map(|(i, d)| (d.slug.clone(), i))
            .collect();

        let mut reading_order: Vec<usize> = (0..docs.len()).collect();
        reading_order.sort_by(|&a, &b| {
            docs[a]
                .section
                .cmp(&docs[b].section)
                .then_with(|| docs[a].order.cmp(&docs[b].order))
        });

        Self {
            docs,
            by_slug,
            reading_order,
        }
    }

    /// All records, in manifest order.
    pub fn docs(&self) -> &[DocumentRecord] {
        &self.docs
    }

    /// Look up a record by slug.
    pub fn get(&self, slug: &str) -> Option<&DocumentRecord> {
        self.by_slug.get(slug).map(|&i| &self.docs[i])
    }

    /// All records in a section, sorted by `order` ascending.
    pub fn in_section(&self, section: &str) -> Vec<&DocumentRecord> {
        let mut docs: Vec<&DocumentRecord> = self
            .docs
            .iter()
            .filter(|d| d.section == section)
            .collect();
        docs.sort_by_key(|d| d.order);
        docs
    }

    /// The records immediately before and after `slug` in `(section, order)`
    /// reading order. Both are `None` when the slug is unknown; either is
    /// `None` at the corresponding boundary of the list.
    pub fn adjacent(&self, slug: &str) -> Adjacent<'_> {
        let pos = self
            .reading_order
            .iter()
            .position(|&i| self.docs[i].slug == slug);

        match pos {
            None => Adjacent {
                prev: None,
                next: None,
            },
            Some(pos) => Adjacent {
                prev: pos
                    .checked_sub(1)
                    .map(|p| &self.docs[self.reading_order[p]]),
                next: self
                    .reading_order
                    .get(pos + 1)
                    .map(|&i| &self.docs[i]),
            },
        }
    }
}
