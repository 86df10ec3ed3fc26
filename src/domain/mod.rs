// ============================================================
// Layer 3: Domain Layer
// ============================================================
// Plain structs, enums and traits describing the matching data:
// edges between papers and reviewers, the shape of a table,
// vertex selections and the errors a table can raise.
//
// Nothing in this layer touches the filesystem.

// A scored (paper, reviewer) pair and its endpoints
pub mod edge;

// 2-column vs 3-column table classification
pub mod shape;

// Sets of papers and reviewers kept by a split or subsample
pub mod selection;

// Table-level error taxonomy
pub mod error;

// Core abstractions other layers implement
pub mod traits;
