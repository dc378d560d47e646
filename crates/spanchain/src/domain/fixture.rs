//! Reference fixture
//!
//! Ten source intervals whose closure contains exactly
//! `REFERENCE_COMBO_COUNT` distinct intervals.

use crate::domain::interval::Interval;

const REFERENCE_TABLE: [(&str, i64, i64); 10] = [
    ("P1", 1, 34),
    ("P2", 3, 10),
    ("P3", 34, 43),
    ("P4", 10, 15),
    ("P5", 15, 26),
    ("P6", 43, 65),
    ("P7", 65, 89),
    ("P8", 15, 20),
    ("P9", 20, 26),
    ("P10", 65, 89),
];

/// Source intervals of the reference fixture, in their canonical order
pub fn reference_intervals() -> Vec<Interval> {
    REFERENCE_TABLE.iter().map(|&row| Interval::from(row)).collect()
}
