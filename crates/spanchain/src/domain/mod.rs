//! Domain layer - Pure computational logic
//!
//! This module contains the interval model and the collections the closure
//! is computed over, without I/O dependencies.

pub mod chain_set;
pub mod fixture;
pub mod interval;
pub mod start_index;
