// ============================================================
// Layer 3: Table Errors
// ============================================================
// Problems with an input table that callers may want to tell
// apart. I/O and CSV syntax errors stay as anyhow errors with
// path context; these are the ones with domain meaning.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("{path}: {columns} columns (expected 2 or 3)")]
    UnsupportedShape { path: String, columns: usize },

    #[error("{path}: expected {expected} columns, found {found}")]
    WrongColumnCount { path: String, expected: usize, found: usize },

    #[error("{path}: required column '{column}' is missing")]
    MissingColumn { path: String, column: String },

    #[error("{path}: row {row}: '{value}' is not a number")]
    InvalidValue { path: String, row: usize, value: String },

    #[error("{path}: '{id}' not found in column '{column}'")]
    UnknownId { path: String, column: String, id: String },

    #[error("fraction must be within [0, 1], got {0}")]
    InvalidFraction(f64),
}
