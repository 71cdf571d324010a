//! Numeric coercion with sentinel substitution.
//!
//! Every indicator test must be defined for every row. Cells that are
//! missing or do not parse as numbers are replaced by a sentinel that the
//! caller picks so it can never satisfy the test being applied.

use crate::data::Column;

/// Substitute for "no difficulty" in a `< 4` sensory test.
pub const NO_DIFFICULTY_SENTINEL: f64 = 5.0;

/// Substitute that never equals a yes/street code of 1.
pub const NOT_CODE_SENTINEL: f64 = 0.0;

/// Coerce a column to numbers, one per row. The column itself is untouched.
pub fn coerce_column(column: &Column, sentinel: f64) -> Vec<f64> {
    column
        .numeric()
        .map(|value| value.unwrap_or(sentinel))
        .collect()
}

/// Coerce a possibly-absent column; an absent column is all sentinel.
pub fn coerce_or_fill(column: Option<&Column>, rows: usize, sentinel: f64) -> Vec<f64> {
    match column {
        Some(column) => coerce_column(column, sentinel),
        None => vec![sentinel; rows],
    }
}
