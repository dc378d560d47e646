//! spanchain - End-to-start interval chaining closure
//!
//! This crate provides functionality to:
//! - Chain labeled intervals whose end meets another interval's start
//! - Expand a set of intervals into the full closure of such chains
//! - Audit an expansion result against the closure properties
//! - Print the console report for an expansion

pub mod app;
pub mod constants;
pub mod domain;
pub mod infra;

// Re-export commonly used types
pub use app::audit::{AuditError, AuditSummary, audit};
pub use app::expander::{ExpandOptions, Expansion, ExpansionStats, Strategy, expand, expand_with};
pub use constants::*;
pub use domain::interval::Interval;
