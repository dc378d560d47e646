//! Infrastructure layer - Output side effects
//!
//! This module handles writing expansion results to a console or any writer.

pub mod report;
