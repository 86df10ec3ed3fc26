// ============================================================
// Layer 4: Data Pipeline
// ============================================================
// Everything between a CSV file on disk and the rows a use
// case decides to keep:
//
//   CSV files
//       │
//       ▼
//   loader      → RawTable / typed Edge rows
//       │
//       ├──► selector  → top-K + slack per vertex (pruning)
//       │
//       ├──► splitter  → seeded halving and sampling of vertices
//       │
//       ▼
//   filters     → rows inside a VertexScope
//
//   assignments  → solver output JSON, per-paper reviewer lists

/// Reads headerless and headered CSV tables
pub mod loader;

/// Top-K and random slack edges per vertex
pub mod selector;

/// Seeded vertex halving and sampling
pub mod splitter;

/// Scope-based row filtering
pub mod filters;

/// Solver assignment JSON
pub mod assignments;
