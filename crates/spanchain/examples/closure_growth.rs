//! Closure growth measurement
//!
//! - Purpose: see how fast the closure grows relative to the source count, and
//!   how the two strategies compare on the same inputs.
//! - Method: random acyclic intervals on a fixed coordinate range, expanded
//!   with both strategies; the resulting sets are compared for equality.
//! - Output: source count, closure size, and wall time per strategy.
//!
//! ## Example
//! ```sh
//! cargo run --example closure_growth -p spanchain --release
//! # different coordinate range (e.g. 0..40)
//! cargo run --example closure_growth -p spanchain --release -- 40
//! ```

use std::collections::BTreeSet;
use std::time::Instant;

use rand::Rng;

use spanchain::{ExpandOptions, Interval, Strategy, expand_with};

const DEFAULT_COORDINATE_RANGE: i64 = 24;
const SOURCE_COUNTS: [usize; 5] = [8, 12, 16, 20, 24];

fn main() {
    let range = parse_range();
    println!("[Closure Growth Measurement]");
    println!("Coordinate range: 0..{range}");
    println!();
    println!(
        "{:>8} {:>10} {:>14} {:>14}",
        "sources", "closure", "grouped (ms)", "scan (ms)"
    );

    let mut rng = rand::thread_rng();
    for count in SOURCE_COUNTS {
        let input = random_intervals(&mut rng, count, range);

        let start = Instant::now();
        let grouped = expand_with(&input, &ExpandOptions::with_strategy(Strategy::Grouped));
        let grouped_ms = start.elapsed().as_secs_f64() * 1000.0;

        let start = Instant::now();
        let scan = expand_with(&input, &ExpandOptions::with_strategy(Strategy::Scan));
        let scan_ms = start.elapsed().as_secs_f64() * 1000.0;

        let agree = as_set(&grouped.intervals) == as_set(&scan.intervals);
        println!(
            "{:>8} {:>10} {:>14.3} {:>14.3}{}",
            count,
            grouped.len(),
            grouped_ms,
            scan_ms,
            if agree { "" } else { "  MISMATCH" }
        );
    }
}

fn parse_range() -> i64 {
    std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .filter(|&range| range > 1)
        .unwrap_or(DEFAULT_COORDINATE_RANGE)
}

fn random_intervals(rng: &mut impl Rng, count: usize, range: i64) -> Vec<Interval> {
    (0..count)
        .map(|n| {
            let start = rng.gen_range(0..range - 1);
            let end = rng.gen_range(start + 1..range);
            Interval::new(format!("R{n}"), start, end)
        })
        .collect()
}

fn as_set(intervals: &[Interval]) -> BTreeSet<&Interval> {
    intervals.iter().collect()
}
