// ============================================================
// Layer 2: FilterReviewersUseCase
// ============================================================
// Drops reviewers who never completed registration before a
// matching run:
//
//   Step 1: Load the reviewer table (user, country, policy, ...)
//   Step 2: Rows with an empty country or policy are unregistered
//   Step 3: Optionally keep only ids in a registered list
//   Step 4: Write kept reviewers and the unregistered ones
//
// With `keep_unregistered` the reviewer table is written back
// unchanged and the removed file only gets its header. That mode
// exists for test runs of the pipeline.

use anyhow::Result;
use csv::StringRecord;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::data::loader::{read_headered, RawTable};
use crate::infra::writer::{write_all, OutputFile};

#[derive(Debug, Clone)]
pub struct FilterReviewersConfig {
    pub reviewer:          PathBuf,
    /// Kept reviewers are written here
    pub output:            PathBuf,
    /// Unregistered reviewers are written here
    pub removed:           PathBuf,
    /// Headered CSV of registered ids in a `reviewer_id` column
    pub registered:        Option<PathBuf>,
    pub keep_unregistered: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterReviewersReport {
    pub before:       usize,
    pub kept:         usize,
    pub unregistered: usize,
}

pub struct FilterReviewersUseCase {
    config: FilterReviewersConfig,
}

impl FilterReviewersUseCase {
    pub fn new(config: FilterReviewersConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<FilterReviewersReport> {
        let cfg = &self.config;

        // ── Step 1-2: Registered vs unregistered ─────────────────────────────
        let table = read_headered(&cfg.reviewer)?;
        tracing::info!("Original {} reviewers", table.len());

        let (mut kept, unregistered) = partition_registered(&table)?;

        // ── Step 3: Registered-id allow list ─────────────────────────────────
        if let Some(path) = &cfg.registered {
            let registered = read_headered(path)?;
            let ids: HashSet<String> = registered
                .distinct(registered.column_index("reviewer_id")?)
                .into_iter()
                .collect();

            let user = table.column_index("user")?;
            kept.retain(|r| r.get(user).is_some_and(|id| ids.contains(id)));
            tracing::info!("Kept {} reviewers listed in '{}'", kept.len(), path.display());
        }

        // ── Step 4: Write ────────────────────────────────────────────────────
        let headers = table.headers.clone().unwrap_or_default();
        let report  = if cfg.keep_unregistered {
            tracing::warn!("Unregistered reviewers are kept; use this for test runs only");
            write_all(&[
                OutputFile::headered(&cfg.output, headers.clone(), table.rows.clone()),
                OutputFile::headered(&cfg.removed, headers, Vec::new()),
            ])?;
            FilterReviewersReport { before: table.len(), kept: table.len(), unregistered: 0 }
        } else {
            let report = FilterReviewersReport {
                before:       table.len(),
                kept:         kept.len(),
                unregistered: unregistered.len(),
            };
            write_all(&[
                OutputFile::headered(&cfg.output, headers.clone(), kept),
                OutputFile::headered(&cfg.removed, headers, unregistered),
            ])?;
            tracing::info!("Removed {} reviewers that have not registered", report.unregistered);
            report
        };

        Ok(report)
    }
}

/// Split rows into (complete, missing country or policy).
fn partition_registered(table: &RawTable) -> Result<(Vec<StringRecord>, Vec<StringRecord>)> {
    let country = table.column_index("country")?;
    let policy  = table.column_index("policy")?;

    let filled = |r: &StringRecord, i: usize| r.get(i).is_some_and(|v| !v.is_empty());

    Ok(table
        .rows
        .iter()
        .cloned()
        .partition(|r| filled(r, country) && filled(r, policy)))
}
