//! Application layer - Use case implementations
//!
//! This module coordinates the domain layer to expand and audit closures.

pub mod audit;
pub mod expander;
