//! Interval chaining constants

// =============================================================================
// Composite id separators
// =============================================================================

/// Separator placed between constituent ids of a composite (`"P1+P2"`)
pub const COMPOSITE_SEPARATOR: &str = "+";

/// Separator used by the grouped-map rendition of the closure (`"P1_P2"`)
///
/// The separator carries no meaning beyond readability; both strategies
/// accept either one through `ExpandOptions`.
pub const GROUPED_SEPARATOR: &str = "_";

// =============================================================================
// Reference fixture
// =============================================================================

/// Number of source intervals in the reference fixture
pub const REFERENCE_SOURCE_COUNT: usize = 10;

/// Number of distinct intervals in the closure of the reference fixture
pub const REFERENCE_COMBO_COUNT: usize = 27;
