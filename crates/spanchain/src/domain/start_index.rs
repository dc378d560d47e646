//! Start-coordinate index
//!
//! Groups source intervals by their start coordinate so that the intervals
//! a given interval can chain into are found by a single lookup on its end.

#[cfg(feature = "hashmap-search")]
use rustc_hash::FxHashMap as StartMap;
#[cfg(not(feature = "hashmap-search"))]
use std::collections::HashMap as StartMap;

use crate::domain::chain_set::ChainSet;

/// Mapping from start coordinate to source positions beginning there
#[derive(Clone, Debug, Default)]
pub struct StartIndex {
    by_start: StartMap<i64, Vec<usize>>,
}

impl StartIndex {
    /// Build the index over the seeded sources of `set`
    ///
    /// Positions within each group keep the seeding order.
    pub fn from_sources(set: &ChainSet) -> Self {
        let mut by_start: StartMap<i64, Vec<usize>> = StartMap::default();

        for (position, entry) in set.entries()[..set.source_count()].iter().enumerate() {
            by_start
                .entry(entry.interval.start())
                .or_default()
                .push(position);
        }

        Self { by_start }
    }

    /// Source positions whose start equals `coordinate`
    pub fn starting_at(&self, coordinate: i64) -> &[usize] {
        self.by_start
            .get(&coordinate)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct start coordinates
    pub fn len(&self) -> usize {
        self.by_start.len()
    }

    /// Check whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.by_start.is_empty()
    }
}
