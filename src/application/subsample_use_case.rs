// ============================================================
// Layer 2: SubsampleUseCase
// ============================================================
// Shrinks a full matching data set to N papers and N reviewers
// for debugging the solver on a small instance.
//
// Every input is written next to itself as
// `<stem>_subsampled.csv`. Unlike `split`, an extra file of an
// unknown shape aborts the whole run.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

use crate::data::{
    filters::{filter_by_column, filter_rows},
    loader::{read_headered, read_headerless},
    splitter::sample_up_to,
};
use crate::domain::selection::{SelectionSizes, VertexSelection};
use crate::domain::shape::TableShape;
use crate::domain::traits::VertexScope;
use crate::infra::writer::{write_all, OutputFile};

// ─── Subsample Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct SubsampleConfig {
    pub scores:        PathBuf,
    pub reviewer:      PathBuf,
    pub submission:    PathBuf,
    pub qualification: PathBuf,
    /// Target number of papers and of reviewers
    pub n:             usize,
    pub files:         Vec<PathBuf>,
    pub seed:          u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsampleReport {
    pub sampled:      SelectionSizes,
    pub score_edges:  usize,
    pub files_written: usize,
}

pub struct SubsampleUseCase {
    config: SubsampleConfig,
}

impl SubsampleUseCase {
    pub fn new(config: SubsampleConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<SubsampleReport> {
        let cfg = &self.config;

        let scores    = read_headerless(&cfg.scores)?;
        let papers    = scores.distinct(0);
        let reviewers = scores.distinct(1);
        tracing::info!("Loaded {} submissions and {} reviewers", papers.len(), reviewers.len());

        let mut rng = StdRng::seed_from_u64(cfg.seed);
        if papers.len() < cfg.n {
            tracing::info!("Only {} submissions (< {}), keeping all", papers.len(), cfg.n);
        }
        let sampled_papers = sample_up_to(&papers, cfg.n, &mut rng);
        if reviewers.len() < cfg.n {
            tracing::info!("Only {} reviewers (< {}), keeping all", reviewers.len(), cfg.n);
        }
        let sampled_reviewers = sample_up_to(&reviewers, cfg.n, &mut rng);
        let scope = VertexSelection::new(sampled_papers, sampled_reviewers);

        let mut outputs = Vec::new();

        let score_rows  = filter_rows(&scores.rows, TableShape::Edge, &scope);
        let score_edges = score_rows.len();
        tracing::info!(
            "Subsampled {} scores from {} submissions and {} reviewers",
            score_edges,
            scope.papers.len(),
            scope.reviewers.len()
        );
        outputs.push(OutputFile::headerless(subsampled_path(&cfg.scores)?, score_rows));

        outputs.push(subsample_metadata(&cfg.submission, "submission", |id| scope.has_paper(id))?);
        outputs.push(subsample_metadata(&cfg.reviewer, "user", |id| scope.has_reviewer(id))?);
        outputs.push(subsample_metadata(&cfg.qualification, "user", |id| scope.has_reviewer(id))?);

        for path in &cfg.files {
            let table = read_headerless(path)?;
            let rows = if table.is_empty() {
                Vec::new()
            } else {
                let shape = TableShape::classify(path, table.width())?;
                let rows  = filter_rows(&table.rows, shape, &scope);
                tracing::info!(
                    "{}: subsampled {}/{} {}",
                    table.file_name()?,
                    rows.len(),
                    table.len(),
                    shape.unit()
                );
                rows
            };
            outputs.push(OutputFile::headerless(subsampled_path(path)?, rows));
        }

        write_all(&outputs)?;

        Ok(SubsampleReport {
            sampled:       scope.sizes(),
            score_edges,
            files_written: outputs.len(),
        })
    }
}

fn subsample_metadata<F>(path: &Path, column: &str, keep: F) -> Result<OutputFile>
where
    F: Fn(&str) -> bool,
{
    let table   = read_headered(path)?;
    let idx     = table.column_index(column)?;
    let rows    = filter_by_column(&table.rows, idx, keep);
    let headers = table.headers.clone().unwrap_or_default();
    tracing::info!("{}: kept {}/{} rows", table.file_name()?, rows.len(), table.len());
    Ok(OutputFile::headered(subsampled_path(path)?, headers, rows))
}

/// `dir/name.csv` → `dir/name_subsampled.csv`
pub fn subsampled_path(path: &Path) -> Result<PathBuf> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("'{}' has no file name", path.display()))?;
    Ok(path.with_file_name(format!("{stem}_subsampled.csv")))
}
