//! Closure expansion workflow
//!
//! This module expands a set of source intervals into the closure of all
//! end-to-start chains. Two strategies reach the same set of intervals:
//!
//! - `Strategy::Grouped` indexes sources by start coordinate once and drains
//!   an explicit worklist, extending each interval by every source that
//!   starts where it ends.
//! - `Strategy::Scan` pairs every interval with every other over a
//!   collection whose bounds grow while it is being scanned.
//!
//! Two intervals are only joined when they were built from disjoint sources,
//! so an interval never chains to itself and cyclic data still terminates.
//! A composite whose id is already taken is left out of the result but still
//! extended, so chains through it are found regardless of input order.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::constants::COMPOSITE_SEPARATOR;
use crate::domain::chain_set::{Append, ChainSet};
use crate::domain::interval::Interval;
use crate::domain::start_index::StartIndex;

/// Closure expansion strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Start-coordinate index plus worklist (recommended)
    #[default]
    Grouped,
    /// Double-index scan over the growing collection
    Scan,
}

/// Expansion options
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Expansion strategy
    pub strategy: Strategy,
    /// Separator placed between constituent ids of a composite
    pub separator: String,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            separator: COMPOSITE_SEPARATOR.to_owned(),
        }
    }
}

impl ExpandOptions {
    /// Default options with the given strategy
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}

/// Counters collected during one expansion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpansionStats {
    /// Sources kept after dropping duplicate ids
    pub sources: usize,
    /// Sources dropped because their id was already seeded
    pub duplicate_sources: usize,
    /// Composites synthesized from adjacent pairs
    pub candidates: usize,
    /// Candidates kept out of the result because their id was already present
    pub shadowed_candidates: usize,
    /// Candidates dropped because the same chain of sources was already built
    pub repeated_paths: usize,
    /// Adjacent pairs skipped because they share a source interval
    pub repeated_sources: usize,
    /// Wall-clock time of the expansion
    pub elapsed: Duration,
}

impl ExpansionStats {
    /// Number of composites appended to the collection
    pub fn composites(&self) -> usize {
        self.candidates - self.shadowed_candidates - self.repeated_paths
    }

    /// Count one candidate; returns whether it still has to be extended
    fn record(&mut self, outcome: Append) -> bool {
        self.candidates += 1;
        match outcome {
            Append::Appended => {}
            Append::Shadowed => self.shadowed_candidates += 1,
            Append::Known => self.repeated_paths += 1,
        }
        outcome.is_added()
    }
}

/// Expansion result
#[derive(Clone, Debug)]
pub struct Expansion {
    /// Sources and composites, in append order
    pub intervals: Vec<Interval>,
    /// Source positions each interval was chained from, parallel to `intervals`
    pub provenance: Vec<Vec<usize>>,
    /// Counters for this expansion
    pub stats: ExpansionStats,
}

impl Expansion {
    /// Number of distinct intervals in the closure
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Check whether the closure is empty
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

/// Expand `intervals` into their chain closure with default options
///
/// Returns sources followed by composites in append order, free of duplicate
/// ids. An empty input returns an empty collection.
pub fn expand(intervals: &[Interval]) -> Vec<Interval> {
    expand_with(intervals, &ExpandOptions::default()).intervals
}

/// Expand `intervals` into their chain closure
pub fn expand_with(intervals: &[Interval], options: &ExpandOptions) -> Expansion {
    let started = Instant::now();

    let mut set = ChainSet::seeded(intervals);
    let mut stats = ExpansionStats {
        sources: set.source_count(),
        duplicate_sources: intervals.len() - set.source_count(),
        ..ExpansionStats::default()
    };

    match options.strategy {
        Strategy::Grouped => expand_grouped(&mut set, &options.separator, &mut stats),
        Strategy::Scan => expand_scan(&mut set, &options.separator, &mut stats),
    }

    stats.elapsed = started.elapsed();
    log::debug!(
        "{:?} expansion: {} sources -> {} intervals ({} candidates, {} shadowed ids, {} repeated paths, {} repeated sources) in {:?}",
        options.strategy,
        stats.sources,
        set.iter().count(),
        stats.candidates,
        stats.shadowed_candidates,
        stats.repeated_paths,
        stats.repeated_sources,
        stats.elapsed
    );

    let (intervals, provenance) = set.into_parts();
    Expansion {
        intervals,
        provenance,
        stats,
    }
}

/// Worklist expansion over the start-coordinate index
///
/// Every interval is extended on the right by single sources only. Because
/// ids concatenate associatively, `(A+B)+(C+D)` and `((A+B)+C)+D` name the
/// same composite, so right-extension alone reaches the full closure.
fn expand_grouped(set: &mut ChainSet, separator: &str, stats: &mut ExpansionStats) {
    let index = StartIndex::from_sources(set);
    if index.is_empty() {
        return;
    }
    log::debug!(
        "start index: {} coordinates over {} sources",
        index.len(),
        set.source_count()
    );

    let mut pending: VecDeque<usize> = (0..set.len()).collect();
    let mut joined: Vec<(Interval, Vec<usize>)> = Vec::new();

    while let Some(current) = pending.pop_front() {
        let Some(left) = set.get(current) else {
            continue;
        };

        for &source in index.starting_at(left.interval.end()) {
            let Some(right) = set.get(source) else {
                continue;
            };

            if left.provenance.contains(&source) {
                log::trace!(
                    "skipped {} -> {}: source already chained",
                    left.interval.id(),
                    right.interval.id()
                );
                stats.repeated_sources += 1;
                continue;
            }

            joined.push((
                left.interval.join(&right.interval, separator),
                left.joined_provenance(right),
            ));
        }

        for (candidate, provenance) in joined.drain(..) {
            let outcome = set.try_append(candidate, provenance);
            if stats.record(outcome) {
                pending.push_back(set.len() - 1);
            }
        }
    }
}

/// Double-index scan over the growing collection
///
/// Both bounds are re-read on every step, so composites appended during the
/// scan are visited as left and right operands later in the same pass.
/// `(A+B)+C` and `A+(B+C)` name the same chain of sources; whichever is
/// built second is dropped as a repeated path.
fn expand_scan(set: &mut ChainSet, separator: &str, stats: &mut ExpansionStats) {
    let mut i = 0;
    while i < set.len() {
        let mut x = 0;
        while x < set.len() {
            let joined = match (set.get(i), set.get(x)) {
                (Some(left), Some(right)) if left.interval.is_adjacent_to(&right.interval) => {
                    if left.shares_source(right) {
                        stats.repeated_sources += 1;
                        None
                    } else {
                        Some((
                            left.interval.join(&right.interval, separator),
                            left.joined_provenance(right),
                        ))
                    }
                }
                _ => None,
            };

            if let Some((candidate, provenance)) = joined {
                let outcome = set.try_append(candidate, provenance);
                stats.record(outcome);
            }
            x += 1;
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GROUPED_SEPARATOR, REFERENCE_COMBO_COUNT};
    use crate::domain::fixture::reference_intervals;
    use std::collections::BTreeSet;

    fn triples(intervals: &[Interval]) -> BTreeSet<(String, i64, i64)> {
        intervals
            .iter()
            .map(|i| (i.id().to_owned(), i.start(), i.end()))
            .collect()
    }

    fn both_strategies() -> [ExpandOptions; 2] {
        [
            ExpandOptions::with_strategy(Strategy::Grouped),
            ExpandOptions::with_strategy(Strategy::Scan),
        ]
    }

    #[test]
    fn test_expand_empty() {
        for options in both_strategies() {
            let result = expand_with(&[], &options);
            assert!(result.is_empty());
            assert_eq!(result.stats.candidates, 0);
        }
    }

    #[test]
    fn test_expand_single() {
        let input = vec![Interval::new("P1", 1, 34)];
        for options in both_strategies() {
            let result = expand_with(&input, &options);
            assert_eq!(result.intervals, input);
        }
    }

    #[test]
    fn test_expand_pair() {
        let input = vec![Interval::new("A", 1, 5), Interval::new("B", 5, 9)];
        let result = expand(&input);

        assert_eq!(result.len(), 3);
        assert_eq!(result[2], Interval::new("A+B", 1, 9));
    }

    #[test]
    fn test_expand_no_adjacency() {
        let input = vec![Interval::new("A", 1, 5), Interval::new("B", 6, 9)];
        for options in both_strategies() {
            let result = expand_with(&input, &options);
            assert_eq!(result.intervals, input);
        }
    }

    #[test]
    fn test_expand_reference_count() {
        for options in both_strategies() {
            let result = expand_with(&reference_intervals(), &options);
            assert_eq!(
                result.len(),
                REFERENCE_COMBO_COUNT,
                "{:?} produced the wrong closure size",
                options.strategy
            );
        }
    }

    #[test]
    fn test_expand_reference_grouped_order() {
        let result = expand(&reference_intervals());
        let ids: Vec<&str> = result.iter().map(Interval::id).collect();

        // Sources first, then composites by chain length
        assert_eq!(&ids[..10], &["P1", "P2", "P3", "P4", "P5", "P6", "P7", "P8", "P9", "P10"]);
        assert_eq!(
            &ids[10..18],
            &["P1+P3", "P2+P4", "P3+P6", "P4+P5", "P4+P8", "P6+P7", "P6+P10", "P8+P9"]
        );
        assert_eq!(
            &ids[24..],
            &["P1+P3+P6+P7", "P1+P3+P6+P10", "P2+P4+P8+P9"]
        );
    }

    #[test]
    fn test_strategies_agree_on_reference() {
        let input = reference_intervals();
        let grouped = expand_with(&input, &ExpandOptions::with_strategy(Strategy::Grouped));
        let scan = expand_with(&input, &ExpandOptions::with_strategy(Strategy::Scan));

        assert_eq!(triples(&grouped.intervals), triples(&scan.intervals));
    }

    #[test]
    fn test_expand_multi_hop() {
        let result = expand(&reference_intervals());
        assert!(result.contains(&Interval::new("P1+P3+P6", 1, 65)));
        assert!(result.contains(&Interval::new("P1+P3+P6+P10", 1, 89)));
    }

    #[test]
    fn test_expand_custom_separator() {
        let options = ExpandOptions {
            strategy: Strategy::Grouped,
            separator: GROUPED_SEPARATOR.to_owned(),
        };
        let result = expand_with(&reference_intervals(), &options);

        assert_eq!(result.len(), REFERENCE_COMBO_COUNT);
        assert!(result.intervals.contains(&Interval::new("P2_P4_P8_P9", 3, 26)));
    }

    #[test]
    fn test_expand_duplicate_source_dropped() {
        let input = vec![
            Interval::new("A", 1, 5),
            Interval::new("A", 5, 9),
            Interval::new("B", 5, 9),
        ];

        for options in both_strategies() {
            let result = expand_with(&input, &options);
            assert_eq!(result.stats.duplicate_sources, 1);
            assert_eq!(
                result.intervals,
                vec![
                    Interval::new("A", 1, 5),
                    Interval::new("B", 5, 9),
                    Interval::new("A+B", 1, 9),
                ]
            );
        }
    }

    #[test]
    fn test_expand_self_loop_excluded() {
        let input = vec![Interval::new("Z", 4, 4)];
        for options in both_strategies() {
            let result = expand_with(&input, &options);
            assert_eq!(result.intervals, input);
            assert_eq!(result.stats.repeated_sources, 1);
        }
    }

    #[test]
    fn test_expand_zero_length_joins_neighbours() {
        let input = vec![
            Interval::new("A", 1, 4),
            Interval::new("Z", 4, 4),
            Interval::new("B", 4, 8),
        ];
        for options in both_strategies() {
            let result = expand_with(&input, &options);
            let ids: BTreeSet<&str> = result.intervals.iter().map(Interval::id).collect();

            assert!(ids.contains("A+Z"));
            assert!(ids.contains("Z+B"));
            assert!(ids.contains("A+Z+B"));
            assert!(ids.contains("A+B"));
            assert!(!ids.contains("Z+Z"));
        }
    }

    #[test]
    fn test_expand_cycle_terminates() {
        let input = vec![Interval::new("A", 1, 2), Interval::new("B", 2, 1)];

        for options in both_strategies() {
            let result = expand_with(&input, &options);
            assert_eq!(
                triples(&result.intervals),
                triples(&[
                    Interval::new("A", 1, 2),
                    Interval::new("B", 2, 1),
                    Interval::new("A+B", 1, 1),
                    Interval::new("B+A", 2, 2),
                ])
            );
        }
    }

    #[test]
    fn test_expand_colliding_composite_id() {
        // A source named like a composite shadows the composite
        let input = vec![
            Interval::new("A", 1, 5),
            Interval::new("B", 5, 9),
            Interval::new("A+B", 100, 200),
        ];

        for options in both_strategies() {
            let result = expand_with(&input, &options);
            assert_eq!(result.intervals, input);
            assert_eq!(result.stats.shadowed_candidates, 1);
            assert_eq!(result.stats.composites(), 0);
        }
    }

    #[test]
    fn test_expand_chains_through_shadowed_id() {
        let input = vec![
            Interval::new("A", 1, 5),
            Interval::new("B", 5, 9),
            Interval::new("A+B", 100, 200),
            Interval::new("C", 9, 12),
        ];
        let mut reversed = input.clone();
        reversed.reverse();

        let expected = triples(&[
            Interval::new("A", 1, 5),
            Interval::new("B", 5, 9),
            Interval::new("A+B", 100, 200),
            Interval::new("C", 9, 12),
            Interval::new("B+C", 5, 12),
            Interval::new("A+B+C", 1, 12),
        ]);

        for sources in [&input, &reversed] {
            for options in both_strategies() {
                let result = expand_with(sources, &options);
                assert_eq!(
                    triples(&result.intervals),
                    expected,
                    "{:?} on {:?}",
                    options.strategy,
                    sources
                );
                assert_eq!(result.stats.shadowed_candidates, 1);
                assert_eq!(result.provenance.len(), result.intervals.len());
            }
        }
    }

    #[test]
    fn test_scan_drops_repeated_paths() {
        // B+C is built before A+B, so A+(B+C) comes first and (A+B)+C repeats it
        let input = vec![
            Interval::new("C", 3, 4),
            Interval::new("B", 2, 3),
            Interval::new("A", 1, 2),
        ];
        let result = expand_with(&input, &ExpandOptions::with_strategy(Strategy::Scan));

        assert_eq!(result.len(), 6);
        assert_eq!(result.stats.shadowed_candidates, 0);
        assert_eq!(result.stats.repeated_paths, 1);
        assert_eq!(result.stats.composites(), 3);
    }

    #[test]
    fn test_stats_reference() {
        let result = expand_with(&reference_intervals(), &ExpandOptions::default());
        assert_eq!(result.stats.sources, 10);
        assert_eq!(result.stats.duplicate_sources, 0);
        assert_eq!(result.stats.composites(), REFERENCE_COMBO_COUNT - 10);
    }

    #[test]
    fn test_provenance_parallel_to_intervals() {
        let result = expand_with(&reference_intervals(), &ExpandOptions::default());
        assert_eq!(result.provenance.len(), result.intervals.len());

        let position = result
            .intervals
            .iter()
            .position(|i| i.id() == "P1+P3+P6")
            .unwrap();
        assert_eq!(result.provenance[position], vec![0, 2, 5]);
    }

    #[test]
    fn test_expand_deterministic() {
        let first = expand(&reference_intervals());
        let second = expand(&reference_intervals());
        assert_eq!(first, second);
    }
}
