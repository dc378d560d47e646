//! Working collection for closure expansion
//!
//! `ChainSet` is an append-only, ordered collection of intervals. Ids of the
//! visible intervals are unique: a candidate whose id is already present is
//! kept only as a shadowed entry. Shadowed entries are still chained further
//! but never appear in the result, so a colliding id cannot cut off the
//! chains that pass through it.
//!
//! Every entry also carries its provenance, the ordered list of source
//! positions it was chained from. Sources have a single-element provenance.
//! A provenance is explored at most once.

#[cfg(feature = "hashmap-search")]
use rustc_hash::FxHashSet as KeySet;
#[cfg(not(feature = "hashmap-search"))]
use std::collections::HashSet as KeySet;

use crate::domain::interval::Interval;

/// Interval plus the source positions it was built from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainEntry {
    /// The interval itself
    pub interval: Interval,
    /// Source positions, in chaining order
    pub provenance: Vec<usize>,
    /// Id collided with an earlier entry; explored but not part of the result
    pub shadowed: bool,
}

impl ChainEntry {
    /// Check whether two entries were built from at least one common source
    pub fn shares_source(&self, other: &ChainEntry) -> bool {
        self.provenance
            .iter()
            .any(|source| other.provenance.contains(source))
    }

    /// Provenance of the composite `self` joined with `right`
    pub fn joined_provenance(&self, right: &ChainEntry) -> Vec<usize> {
        let mut provenance = Vec::with_capacity(self.provenance.len() + right.provenance.len());
        provenance.extend_from_slice(&self.provenance);
        provenance.extend_from_slice(&right.provenance);
        provenance
    }
}

/// Outcome of `ChainSet::try_append`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Append {
    /// New id, appended as a visible entry
    Appended,
    /// Id already present, appended as a shadowed entry
    Shadowed,
    /// Provenance already explored, nothing appended
    Known,
}

impl Append {
    /// Whether an entry was added (visible or shadowed)
    pub fn is_added(self) -> bool {
        !matches!(self, Append::Known)
    }
}

/// Append-only interval collection with unique visible ids
#[derive(Clone, Debug, Default)]
pub struct ChainSet {
    entries: Vec<ChainEntry>,
    ids: KeySet<String>,
    paths: KeySet<Vec<usize>>,
    sources: usize,
}

impl ChainSet {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with source intervals, preserving order
    ///
    /// A source whose id was already seeded is dropped without notice. The
    /// remaining sources occupy positions `0..source_count()`.
    pub fn seeded<'a, I>(sources: I) -> Self
    where
        I: IntoIterator<Item = &'a Interval>,
    {
        let mut set = Self::new();
        for interval in sources {
            if set.contains_id(interval.id()) {
                continue;
            }
            let position = set.len();
            set.try_append(interval.clone(), vec![position]);
        }
        set.sources = set.len();
        set
    }

    /// Append `interval` built from `provenance`
    ///
    /// A new id is appended as a visible entry. An id that is already present
    /// is appended as a shadowed entry, kept only so that longer chains can
    /// be built through it. A provenance that was already explored is
    /// dropped. None of these outcomes is an error.
    pub fn try_append(&mut self, interval: Interval, provenance: Vec<usize>) -> Append {
        if self.paths.contains(&provenance) {
            return Append::Known;
        }

        let shadowed = self.contains_id(interval.id());
        if shadowed {
            log::trace!("shadowed duplicate id {}", interval.id());
        } else {
            self.ids.insert(interval.id().to_owned());
        }

        self.paths.insert(provenance.clone());
        self.entries.push(ChainEntry {
            interval,
            provenance,
            shadowed,
        });

        if shadowed {
            Append::Shadowed
        } else {
            Append::Appended
        }
    }

    /// Number of entries, shadowed ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of seeded source intervals
    pub fn source_count(&self) -> usize {
        self.sources
    }

    /// Get the entry at `index`
    pub fn get(&self, index: usize) -> Option<&ChainEntry> {
        self.entries.get(index)
    }

    /// Check whether a visible interval with `id` is present
    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Iterate visible intervals in append order
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.entries
            .iter()
            .filter(|entry| !entry.shadowed)
            .map(|entry| &entry.interval)
    }

    /// All entries (visible and shadowed) in append order
    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    /// Consume the collection, returning visible intervals in append order
    pub fn into_intervals(self) -> Vec<Interval> {
        self.into_parts().0
    }

    /// Consume the collection, returning visible intervals and their provenance
    pub fn into_parts(self) -> (Vec<Interval>, Vec<Vec<usize>>) {
        self.entries
            .into_iter()
            .filter(|entry| !entry.shadowed)
            .map(|entry| (entry.interval, entry.provenance))
            .unzip()
    }
}
