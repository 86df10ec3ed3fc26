// ============================================================
// Layer 5: Infrastructure Layer
// ============================================================
// Cross-cutting file output used by every use case:
//
//   writer.rs   : temp-file + rename writes of finished tables,
//                 so a failed run never leaves a half-written
//                 CSV behind.
//
//   manifest.rs : JSON record of a split run (seed, group sizes,
//                 dropped edges, skipped files).

/// Atomic CSV output
pub mod writer;

/// Split run manifest
pub mod manifest;
