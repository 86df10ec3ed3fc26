// ============================================================
// Layer 2: FlipPolicyUseCase
// ============================================================
// Moves a random share of Policy B submissions to Policy A, for
// experiments on how the policy mix affects the matching.
//
//   Step 1: Rows of submission.csv whose policy is Policy B
//   Step 2: Seeded draw of floor(rate * count) of them
//   Step 3: Rewrite their policy to Policy A, in place
//   Step 4: List the flipped ids in flipped_submission_ids.csv
//           next to the submission table

use anyhow::{Context, Result};
use csv::StringRecord;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

use crate::data::loader::read_headered;
use crate::domain::error::TableError;
use crate::infra::writer::{write_all, OutputFile};

pub const POLICY_A: &str = "This submission requires Policy A.";
pub const POLICY_B: &str = "This submission allows Policy B.";
pub const FLIPPED_FILE: &str = "flipped_submission_ids.csv";

#[derive(Debug, Clone)]
pub struct FlipPolicyConfig {
    pub submission: PathBuf,
    /// Share of Policy B submissions to flip, within [0, 1]
    pub rate:       f64,
    pub seed:       u64,
}

pub struct FlipPolicyUseCase {
    config: FlipPolicyConfig,
}

impl FlipPolicyUseCase {
    pub fn new(config: FlipPolicyConfig) -> Self {
        Self { config }
    }

    /// Returns the flipped submission ids, in draw order.
    pub fn execute(&self) -> Result<Vec<String>> {
        let cfg = &self.config;
        if !(0.0..=1.0).contains(&cfg.rate) {
            return Err(TableError::InvalidFraction(cfg.rate).into());
        }

        // ── Step 1: Policy B rows ────────────────────────────────────────────
        let table  = read_headered(&cfg.submission)?;
        let id     = table.column_index("submission")?;
        let policy = table.column_index("policy")?;

        let policy_b: Vec<usize> = table
            .rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.get(policy) == Some(POLICY_B))
            .map(|(i, _)| i)
            .collect();

        // ── Step 2: Draw ─────────────────────────────────────────────────────
        let amount  = ((policy_b.len() as f64) * cfg.rate).floor() as usize;
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let picked: Vec<usize> = index::sample(&mut rng, policy_b.len(), amount)
            .into_iter()
            .map(|i| policy_b[i])
            .collect();

        // ── Step 3-4: Rewrite and list ───────────────────────────────────────
        let mut rows = table.rows.clone();
        let mut flipped = Vec::with_capacity(picked.len());
        for &row in &picked {
            rows[row] = with_field(&rows[row], policy, POLICY_A);
            flipped.push(table.rows[row].get(id).unwrap_or_default().to_string());
        }

        let headers  = table.headers.clone().unwrap_or_default();
        let list     = flipped.iter().map(|s| StringRecord::from(vec![s.as_str()])).collect();
        write_all(&[
            OutputFile::headered(&cfg.submission, headers, rows),
            OutputFile::headered(flipped_path(&cfg.submission)?, StringRecord::from(vec!["submission"]), list),
        ])?;

        tracing::info!(
            "Flipped {}/{} papers from Policy B to Policy A",
            flipped.len(),
            policy_b.len()
        );
        Ok(flipped)
    }
}

/// Copy of `row` with field `idx` replaced by `value`.
fn with_field(row: &StringRecord, idx: usize, value: &str) -> StringRecord {
    row.iter()
        .enumerate()
        .map(|(i, f)| if i == idx { value } else { f })
        .collect()
}

fn flipped_path(submission: &Path) -> Result<PathBuf> {
    let dir = submission
        .parent()
        .with_context(|| format!("'{}' has no parent directory", submission.display()))?;
    Ok(dir.join(FLIPPED_FILE))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn submissions(dir: &TempDir, n_b: usize) -> PathBuf {
        let path = dir.path().join("submission.csv");
        let mut body = String::from("submission,policy\nP0,\"This submission requires Policy A.\"\n");
        for i in 1..=n_b {
            body.push_str(&format!("P{i},{POLICY_B}\n"));
        }
        fs::write(&path, body).unwrap();
        path
    }

    fn run(path: &Path, rate: f64) -> Result<Vec<String>> {
        FlipPolicyUseCase::new(FlipPolicyConfig { submission: path.to_path_buf(), rate, seed: 42 }).execute()
    }

    #[test]
    fn test_flips_floor_share_of_policy_b() {
        let dir  = TempDir::new().unwrap();
        let path = submissions(&dir, 9);

        let flipped = run(&path, 0.5).unwrap();
        // floor(9 * 0.5) = 4
        assert_eq!(flipped.len(), 4);
        assert!(!flipped.contains(&"P0".to_string()));

        let table = read_headered(&path).unwrap();
        let now_a: HashSet<String> = table
            .rows
            .iter()
            .filter(|r| &r[1] == POLICY_A)
            .map(|r| r[0].to_string())
            .collect();
        assert_eq!(now_a.len(), 5);
        assert!(flipped.iter().all(|id| now_a.contains(id)));

        let list = read_headered(dir.path().join(FLIPPED_FILE)).unwrap();
        let listed: Vec<String> = list.rows.iter().map(|r| r[0].to_string()).collect();
        assert_eq!(listed, flipped);
    }

    #[test]
    fn test_same_seed_same_flips() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        assert_eq!(run(&submissions(&a, 20), 0.3).unwrap(), run(&submissions(&b, 20), 0.3).unwrap());
    }

    #[test]
    fn test_rejects_bad_rate_before_reading() {
        let dir = TempDir::new().unwrap();
        let err = run(&dir.path().join("missing.csv"), 1.5).unwrap_err();
        assert!(matches!(err.downcast_ref::<TableError>(), Some(TableError::InvalidFraction(_))));
    }
}
