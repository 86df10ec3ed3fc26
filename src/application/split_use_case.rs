// ============================================================
// Layer 2: SplitUseCase
// ============================================================
// Splits one matching data set into two disconnected halves
// that can be matched in parallel:
//
//   Step 1: Distinct papers and reviewers of the score table
//   Step 2: Seeded shuffle + halve of each vertex list  (Layer 4)
//   Step 3: Score edges kept only inside one group
//   Step 4: reviewer / submission / qualification metadata
//   Step 5: Extra files, dispatched on their column count
//   Step 6: Write group1/ and group2/, then the manifest
//
// Edges between a group-1 paper and a group-2 reviewer (or the
// other way round) belong to neither group and are dropped.
// Their count is reported so the operator can judge whether
// the split leaves enough supply in each half.

use anyhow::{Context, Result};
use csv::StringRecord;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::{
    filters::{endpoint_counts, filter_by_column, filter_rows},
    loader::{read_headered, read_headerless, RawTable},
    splitter::split_vertices,
};
use crate::domain::error::TableError;
use crate::domain::selection::VertexSelection;
use crate::domain::shape::TableShape;
use crate::domain::traits::VertexScope;
use crate::infra::manifest::{GroupSummary, SplitManifest};
use crate::infra::writer::{write_all, OutputFile};

pub const GROUP_DIRS: [&str; 2] = ["group1", "group2"];

// ─── Split Configuration ──────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize)]
pub struct SplitConfig {
    pub scores:        PathBuf,
    pub reviewer:      PathBuf,
    pub submission:    PathBuf,
    pub qualification: Option<PathBuf>,
    pub files:         Vec<PathBuf>,
    pub output_dir:    PathBuf,
    pub seed:          u64,
}

pub struct SplitUseCase {
    config: SplitConfig,
}

impl SplitUseCase {
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<SplitManifest> {
        let cfg  = &self.config;
        let dirs = GROUP_DIRS.map(|g| cfg.output_dir.join(g));

        tracing::info!("Splitting into two disconnected groups (seed {})", cfg.seed);

        // ── Step 1: Vertex sets from the score table ─────────────────────────
        let scores = read_headerless(&cfg.scores)?;
        if !scores.is_empty() && scores.width() != 3 {
            return Err(TableError::WrongColumnCount {
                path:     cfg.scores.display().to_string(),
                expected: 3,
                found:    scores.width(),
            }
            .into());
        }
        let papers    = scores.distinct(0);
        let reviewers = scores.distinct(1);
        tracing::info!(
            "Found {} submissions and {} reviewers, {} edges",
            papers.len(),
            reviewers.len(),
            scores.len()
        );

        // ── Step 2: Halve both vertex lists ──────────────────────────────────
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let groups  = {
            let (g1, g2) = split_vertices(papers, reviewers, &mut rng);
            [g1, g2]
        };
        debug_assert!(groups[0].is_disjoint(&groups[1]));
        for (name, g) in GROUP_DIRS.iter().zip(&groups) {
            tracing::info!("{}: {} submissions, {} reviewers", name, g.papers.len(), g.reviewers.len());
        }

        let mut outputs = Vec::new();

        // ── Step 3: Score edges ──────────────────────────────────────────────
        let split_scores = split_table(&scores, TableShape::Edge, &groups);
        let edge_counts  = [split_scores[0].len(), split_scores[1].len()];
        for (name, rows) in GROUP_DIRS.iter().zip(&split_scores) {
            let (p, r) = endpoint_counts(rows);
            tracing::info!("{}: {} edges ({} papers, {} reviewers)", name, rows.len(), p, r);
        }
        outputs.extend(headerless_outputs(&scores, &dirs, split_scores)?);

        // ── Step 4: Metadata tables ──────────────────────────────────────────
        outputs.extend(split_metadata(&cfg.reviewer, "user", &groups, &dirs, |g, id| g.has_reviewer(id))?);
        outputs.extend(split_metadata(&cfg.submission, "submission", &groups, &dirs, |g, id| g.has_paper(id))?);
        if let Some(q) = &cfg.qualification {
            outputs.extend(split_metadata(q, "user", &groups, &dirs, |g, id| g.has_reviewer(id))?);
        }

        // ── Step 5: Extra files ──────────────────────────────────────────────
        let mut skipped = Vec::new();
        for path in &cfg.files {
            let table = read_headerless(path)?;
            let name  = table.file_name()?.to_string();

            if table.is_empty() {
                tracing::info!("{}: empty, copied as-is to both groups", name);
                outputs.extend(headerless_outputs(&table, &dirs, [Vec::new(), Vec::new()])?);
                continue;
            }

            let shape = match TableShape::classify(path, table.width()) {
                Ok(shape) => shape,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", name, e);
                    skipped.push(name);
                    continue;
                }
            };

            let parts = split_table(&table, shape, &groups);
            let kept  = parts[0].len() + parts[1].len();
            tracing::info!(
                "{}: group1 {}/{} {}, group2 {}/{} {}",
                name,
                parts[0].len(),
                table.len(),
                shape.unit(),
                parts[1].len(),
                table.len(),
                shape.unit()
            );
            if shape == TableShape::Edge && kept < table.len() {
                let dropped = table.len() - kept;
                tracing::info!(
                    "{}: dropped {} cross-group edges ({:.1}%)",
                    name,
                    dropped,
                    percent(dropped, table.len())
                );
            }
            outputs.extend(headerless_outputs(&table, &dirs, parts)?);
        }

        // ── Step 6: Write everything ─────────────────────────────────────────
        for d in &dirs {
            fs::create_dir_all(d).with_context(|| format!("Cannot create '{}'", d.display()))?;
        }
        write_all(&outputs)?;

        let dropped  = scores.len() - edge_counts[0] - edge_counts[1];
        let manifest = SplitManifest {
            config:          cfg.clone(),
            total_edges:     scores.len(),
            group1:          GroupSummary::new(groups[0].sizes(), edge_counts[0]),
            group2:          GroupSummary::new(groups[1].sizes(), edge_counts[1]),
            dropped_edges:   dropped,
            dropped_percent: percent(dropped, scores.len()),
            skipped_files:   skipped,
        };
        manifest.save(&cfg.output_dir)?;

        tracing::info!(
            "Dropped cross-group edges: {} ({:.1}%)",
            manifest.dropped_edges,
            manifest.dropped_percent
        );

        Ok(manifest)
    }
}

/// Rows of `table` kept by each group.
fn split_table(table: &RawTable, shape: TableShape, groups: &[VertexSelection; 2]) -> [Vec<StringRecord>; 2] {
    [
        filter_rows(&table.rows, shape, &groups[0]),
        filter_rows(&table.rows, shape, &groups[1]),
    ]
}

/// One headerless output per group, named after the input file.
fn headerless_outputs(
    table: &RawTable,
    dirs:  &[PathBuf; 2],
    parts: [Vec<StringRecord>; 2],
) -> Result<Vec<OutputFile>> {
    let name = table.file_name()?;
    Ok(dirs
        .iter()
        .zip(parts)
        .map(|(d, rows)| OutputFile::headerless(d.join(name), rows))
        .collect())
}

/// Split a headered metadata table on its `column` id.
fn split_metadata<F>(
    path:   &Path,
    column: &str,
    groups: &[VertexSelection; 2],
    dirs:   &[PathBuf; 2],
    keep:   F,
) -> Result<Vec<OutputFile>>
where
    F: Fn(&VertexSelection, &str) -> bool,
{
    let table   = read_headered(path)?;
    let idx     = table.column_index(column)?;
    let name    = table.file_name()?;
    let headers = table.headers.clone().unwrap_or_default();

    let mut outputs = Vec::with_capacity(2);
    for ((g, d), group_name) in groups.iter().zip(dirs).zip(GROUP_DIRS) {
        let rows = filter_by_column(&table.rows, idx, |id| keep(g, id));
        tracing::info!("{}: {} {}/{} rows", name, group_name, rows.len(), table.len());
        outputs.push(OutputFile::headered(d.join(name), headers.clone(), rows));
    }
    Ok(outputs)
}

/// `part` as a percentage of `whole`; 0 for an empty whole.
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}
