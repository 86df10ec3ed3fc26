// ============================================================
// Layer 2: ExcludeUseCase
// ============================================================
// Drops withdrawn or desk-rejected submissions: only papers in
// the final submission list (`id` column) survive. The
// submission table and every listed edge file are rewritten in
// place.

use anyhow::Result;
use std::path::PathBuf;

use crate::data::{
    filters::{filter_by_column, filter_rows},
    loader::{read_headered, read_headerless},
};
use crate::domain::error::TableError;
use crate::domain::selection::PaperAllowList;
use crate::domain::shape::TableShape;
use crate::domain::traits::VertexScope;
use crate::infra::writer::{write_all, OutputFile};

#[derive(Debug, Clone)]
pub struct ExcludeConfig {
    pub final_submissions: PathBuf,
    pub submission:        Option<PathBuf>,
    pub files:             Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeReport {
    pub final_papers:        usize,
    pub excluded_submissions: usize,
    pub removed_edges:       usize,
}

pub struct ExcludeUseCase {
    config: ExcludeConfig,
}

impl ExcludeUseCase {
    pub fn new(config: ExcludeConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<ExcludeReport> {
        let cfg = &self.config;

        let finals = read_headered(&cfg.final_submissions)?;
        let allow  = PaperAllowList::new(finals.distinct(finals.column_index("id")?));
        if allow.is_empty() {
            tracing::warn!(
                "'{}' lists no final submissions; every paper will be excluded",
                cfg.final_submissions.display()
            );
        }
        let mut report = ExcludeReport { final_papers: allow.len(), ..Default::default() };

        let mut outputs = Vec::new();

        if let Some(path) = &cfg.submission {
            let table   = read_headered(path)?;
            let idx     = table.column_index("submission")?;
            let rows    = filter_by_column(&table.rows, idx, |id| allow.has_paper(id));
            let headers = table.headers.clone().unwrap_or_default();

            report.excluded_submissions = table.len() - rows.len();
            tracing::info!("Excluding {} submissions", report.excluded_submissions);
            outputs.push(OutputFile::headered(path, headers, rows));
        }

        for path in &cfg.files {
            let table = read_headerless(path)?;
            if !table.is_empty() && table.width() != 3 {
                return Err(TableError::WrongColumnCount {
                    path:     path.display().to_string(),
                    expected: 3,
                    found:    table.width(),
                }
                .into());
            }

            let rows    = filter_rows(&table.rows, TableShape::Edge, &allow);
            let removed = table.len() - rows.len();
            tracing::info!("{}: removed {}/{} edges", table.file_name()?, removed, table.len());
            report.removed_edges += removed;
            outputs.push(OutputFile::headerless(path, rows));
        }

        write_all(&outputs)?;
        Ok(report)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_excludes_non_final_papers() {
        let dir    = TempDir::new().unwrap();
        let finals = dir.path().join("final.csv");
        let subs   = dir.path().join("submission.csv");
        let bids   = dir.path().join("bids.csv");
        fs::write(&finals, "id,title\nP1,a\nP3,c\n").unwrap();
        fs::write(&subs, "submission,policy\nP1,A\nP2,B\nP3,A\n").unwrap();
        fs::write(&bids, "P1,R1,1\nP2,R1,1\nP3,R2,-1\n").unwrap();

        let report = ExcludeUseCase::new(ExcludeConfig {
            final_submissions: finals,
            submission:        Some(subs.clone()),
            files:             vec![bids.clone()],
        })
        .execute()
        .unwrap();

        assert_eq!(report, ExcludeReport { final_papers: 2, excluded_submissions: 1, removed_edges: 1 });
        assert_eq!(fs::read_to_string(&subs).unwrap(), "submission,policy\nP1,A\nP3,A\n");
        assert_eq!(fs::read_to_string(&bids).unwrap(), "P1,R1,1\nP3,R2,-1\n");
    }

    #[test]
    fn test_empty_final_list_excludes_everything() {
        let dir    = TempDir::new().unwrap();
        let finals = dir.path().join("final.csv");
        let bids   = dir.path().join("bids.csv");
        fs::write(&finals, "id,title\n").unwrap();
        fs::write(&bids, "P1,R1,1\nP2,R1,1\n").unwrap();

        let report = ExcludeUseCase::new(ExcludeConfig {
            final_submissions: finals,
            submission:        None,
            files:             vec![bids.clone()],
        })
        .execute()
        .unwrap();

        assert_eq!(report.final_papers, 0);
        assert_eq!(report.removed_edges, 2);
        assert_eq!(fs::read_to_string(&bids).unwrap(), "");
    }

    #[test]
    fn test_two_column_file_is_rejected() {
        let dir    = TempDir::new().unwrap();
        let finals = dir.path().join("final.csv");
        let quota  = dir.path().join("quota.csv");
        fs::write(&finals, "id\nP1\n").unwrap();
        fs::write(&quota, "R1,4\n").unwrap();

        let err = ExcludeUseCase::new(ExcludeConfig {
            final_submissions: finals,
            submission:        None,
            files:             vec![quota.clone()],
        })
        .execute()
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::WrongColumnCount { found: 2, .. })
        ));
        assert_eq!(fs::read_to_string(&quota).unwrap(), "R1,4\n");
    }
}
