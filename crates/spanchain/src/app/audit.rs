//! Closure audit
//!
//! Checks an expansion result against the properties every closure must
//! hold, without reusing the expansion's own collections:
//!
//! 1. Every id appears exactly once
//! 2. Every source interval is present unchanged
//! 3. Every span is reachable in the adjacency graph rebuilt from the sources
//! 4. Every composite is justified by a chain of real end-to-start matches
//!    between the sources named in its provenance
//! 5. Every adjacent pair built from disjoint sources has its composite

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use thiserror::Error;

use crate::app::expander::Expansion;
use crate::domain::interval::Interval;

/// Closure property violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    /// Id appears more than once
    #[error("duplicate id in closure: {id}")]
    DuplicateId { id: String },
    /// Source interval absent or altered
    #[error("source interval missing or altered: {id}")]
    MissingSource { id: String },
    /// Provenance does not describe a valid chain producing the interval
    #[error("interval {id} is not justified by its provenance {provenance:?}")]
    UnjustifiedInterval { id: String, provenance: Vec<usize> },
    /// Adjacent pair whose composite is absent
    #[error("closure incomplete: {left} chains into {right} but {expected} is missing")]
    MissingComposite {
        left: String,
        right: String,
        expected: String,
    },
    /// Span not reachable from the sources
    #[error("spurious span for {id}: [{start}, {end}] is not reachable from the sources")]
    SpuriousSpan { id: String, start: i64, end: i64 },
    /// Provenance list length differs from interval count
    #[error("provenance covers {found} intervals, expected {expected}")]
    ProvenanceLength { expected: usize, found: usize },
}

/// Summary of a passing audit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuditSummary {
    /// Intervals in the closure
    pub intervals: usize,
    /// Distinct source intervals
    pub sources: usize,
    /// Composite intervals
    pub composites: usize,
    /// Distinct `(start, end)` spans in the closure
    pub spans: usize,
}

/// Audit an expansion of `sources` built with `separator`
pub fn audit(
    sources: &[Interval],
    expansion: &Expansion,
    separator: &str,
) -> Result<AuditSummary, AuditError> {
    let intervals = &expansion.intervals;
    let provenance = &expansion.provenance;

    if provenance.len() != intervals.len() {
        return Err(AuditError::ProvenanceLength {
            expected: intervals.len(),
            found: provenance.len(),
        });
    }

    // Step 1: unique ids
    let mut ids: HashSet<&str> = HashSet::with_capacity(intervals.len());
    for interval in intervals {
        if !ids.insert(interval.id()) {
            return Err(AuditError::DuplicateId {
                id: interval.id().to_owned(),
            });
        }
    }

    // Step 2: sources present unchanged (first occurrence of an id wins)
    let distinct = distinct_sources(sources);
    let by_id: HashMap<&str, &Interval> = intervals.iter().map(|i| (i.id(), i)).collect();
    for source in &distinct {
        if by_id.get(source.id()).copied() != Some(source) {
            return Err(AuditError::MissingSource {
                id: source.id().to_owned(),
            });
        }
    }

    // Step 3: no spurious spans
    let reachable = reachable_spans(&distinct);
    for interval in intervals {
        if !reachable.contains(&interval.span()) {
            return Err(AuditError::SpuriousSpan {
                id: interval.id().to_owned(),
                start: interval.start(),
                end: interval.end(),
            });
        }
    }

    // Step 4: provenance justifies every interval
    for (interval, chain) in intervals.iter().zip(provenance) {
        if !is_justified(interval, chain, &distinct, separator) {
            return Err(AuditError::UnjustifiedInterval {
                id: interval.id().to_owned(),
                provenance: chain.clone(),
            });
        }
    }

    // Step 5: completeness over disjoint adjacent pairs
    for (left, left_chain) in intervals.iter().zip(provenance) {
        for (right, right_chain) in intervals.iter().zip(provenance) {
            if !left.is_adjacent_to(right) || left_chain.iter().any(|s| right_chain.contains(s)) {
                continue;
            }

            let expected = left.join(right, separator);
            if !ids.contains(expected.id()) {
                return Err(AuditError::MissingComposite {
                    left: left.id().to_owned(),
                    right: right.id().to_owned(),
                    expected: expected.id().to_owned(),
                });
            }
        }
    }

    let spans: BTreeSet<(i64, i64)> = intervals.iter().map(Interval::span).collect();
    Ok(AuditSummary {
        intervals: intervals.len(),
        sources: distinct.len(),
        composites: intervals.len() - distinct.len(),
        spans: spans.len(),
    })
}

/// Sources with later duplicate ids removed, order preserved
fn distinct_sources(sources: &[Interval]) -> Vec<Interval> {
    let mut seen: HashSet<&str> = HashSet::new();
    sources
        .iter()
        .filter(|source| seen.insert(source.id()))
        .cloned()
        .collect()
}

/// Rebuild `interval` from the sources named by `chain`
fn is_justified(interval: &Interval, chain: &[usize], sources: &[Interval], separator: &str) -> bool {
    let Some((&first, rest)) = chain.split_first() else {
        return false;
    };
    let Some(mut rebuilt) = sources.get(first).cloned() else {
        return false;
    };

    let mut used: HashSet<usize> = HashSet::from([first]);
    for &position in rest {
        let Some(next) = sources.get(position) else {
            return false;
        };
        if !used.insert(position) || !rebuilt.is_adjacent_to(next) {
            return false;
        }
        rebuilt = rebuilt.join(next, separator);
    }

    rebuilt == *interval
}

/// All `(start, end)` spans reachable by following end-to-start edges
///
/// A source reaches itself with zero edges.
fn reachable_spans(sources: &[Interval]) -> HashSet<(i64, i64)> {
    let mut successors: HashMap<i64, Vec<usize>> = HashMap::new();
    for (position, source) in sources.iter().enumerate() {
        successors.entry(source.start()).or_default().push(position);
    }

    let mut spans = HashSet::new();
    for origin in sources {
        let mut visited: HashSet<usize> = HashSet::new();
        let mut queue: VecDeque<&Interval> = VecDeque::from([origin]);

        while let Some(current) = queue.pop_front() {
            spans.insert((origin.start(), current.end()));
            for &next in successors.get(&current.end()).into_iter().flatten() {
                if visited.insert(next) {
                    queue.push_back(&sources[next]);
                }
            }
        }
    }

    spans
}
