//! Interval entity
//!
//! An interval is an identified `(start, end)` pair. Composite intervals are
//! created by joining two adjacent intervals end-to-start; the composite id
//! records which intervals were joined, in order.

use std::fmt;

/// Labeled interval
///
/// Immutable once created. Only `end == start` adjacency is ever inspected,
/// never interior overlap.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    id: String,
    start: i64,
    end: i64,
}

impl Interval {
    /// Create a new interval
    pub fn new(id: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            id: id.into(),
            start,
            end,
        }
    }

    /// Identifier (a provenance trail for composites)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Start coordinate
    pub fn start(&self) -> i64 {
        self.start
    }

    /// End coordinate
    pub fn end(&self) -> i64 {
        self.end
    }

    /// `(start, end)` pair
    pub fn span(&self) -> (i64, i64) {
        (self.start, self.end)
    }

    /// Check whether `right` starts exactly where this interval ends
    #[inline]
    pub fn is_adjacent_to(&self, right: &Interval) -> bool {
        self.end == right.start
    }

    /// Join this interval with `right` into a composite
    ///
    /// The composite spans from this interval's start to `right`'s end, and
    /// its id is `self.id + separator + right.id`. Adjacency is not checked
    /// here; callers pair intervals through `is_adjacent_to` first.
    pub fn join(&self, right: &Interval, separator: &str) -> Interval {
        let mut id = String::with_capacity(self.id.len() + separator.len() + right.id.len());
        id.push_str(&self.id);
        id.push_str(separator);
        id.push_str(&right.id);

        Interval {
            id,
            start: self.start,
            end: right.end,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {}]", self.id, self.start, self.end)
    }
}

impl From<(&str, i64, i64)> for Interval {
    fn from((id, start, end): (&str, i64, i64)) -> Self {
        Self::new(id, start, end)
    }
}
