// ============================================================
// Layer 5: Split Manifest
// ============================================================
// Records what a `split` run produced, as pretty JSON next to
// the group directories:
//
//   output_dir/
//     group1/...
//     group2/...
//     split_manifest.json   ← run config, group sizes, dropped edges
//
// The manifest is for operators re-checking a split later; no
// downstream tool reads it.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::Path};

use crate::application::split_use_case::SplitConfig;
use crate::domain::selection::SelectionSizes;
use crate::infra::writer::replace_file;

pub const MANIFEST_FILE: &str = "split_manifest.json";

/// Per-group counts after a split.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub papers:    usize,
    pub reviewers: usize,
    pub edges:     usize,
}

impl GroupSummary {
    pub fn new(sizes: SelectionSizes, edges: usize) -> Self {
        Self { papers: sizes.papers, reviewers: sizes.reviewers, edges }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitManifest {
    pub config:          SplitConfig,
    pub total_edges:     usize,
    pub group1:          GroupSummary,
    pub group2:          GroupSummary,
    pub dropped_edges:   usize,
    pub dropped_percent: f64,
    pub skipped_files:   Vec<String>,
}

impl SplitManifest {
    /// Write the manifest into `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self)?;

        replace_file(&path, |tmp| {
            fs::write(tmp, &json).with_context(|| format!("Cannot write '{}'", tmp.display()))
        })?;

        tracing::debug!("Saved split manifest to '{}'", path.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(dir: &Path) -> SplitConfig {
        SplitConfig {
            scores:        PathBuf::from("data/affinity_scores.csv"),
            reviewer:      PathBuf::from("data/reviewer.csv"),
            submission:    PathBuf::from("data/submission.csv"),
            qualification: None,
            files:         vec![PathBuf::from("data/bids.csv")],
            output_dir:    dir.to_path_buf(),
            seed:          42,
        }
    }

    #[test]
    fn test_manifest_round_trips_as_json() {
        let dir = TempDir::new().unwrap();
        let m = SplitManifest {
            config:          config(dir.path()),
            total_edges:     10,
            group1:          GroupSummary { papers: 1, reviewers: 2, edges: 2 },
            group2:          GroupSummary { papers: 2, reviewers: 2, edges: 4 },
            dropped_edges:   4,
            dropped_percent: 40.0,
            skipped_files:   vec!["odd.csv".to_string()],
        };
        m.save(dir.path()).unwrap();

        let text  = fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["config"]["seed"], 42);
        assert_eq!(value["config"]["files"][0], "data/bids.csv");
        assert!(value["config"]["qualification"].is_null());
        assert_eq!(value["group2"]["edges"], 4);
        assert_eq!(value["skipped_files"][0], "odd.csv");
    }
}
