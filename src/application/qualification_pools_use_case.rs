// ============================================================
// Layer 2: QualificationPoolsUseCase
// ============================================================
// Splits the qualification table into the reviewer pools used by
// the matching rounds, by the `type` column:
//
//   emergency    emergency-medium, emergency-high
//   unqualified  regular-low
//   round1       regular-high
//   round2       regular-high, regular-medium
//
// Pools may overlap (round1 is part of round2). A reviewer whose
// type is in none of them lands in no pool.

use anyhow::Result;
use std::path::PathBuf;

use crate::data::{filters::filter_by_column, loader::read_headered};
use crate::infra::writer::{write_all, OutputFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewerPool {
    Emergency,
    Unqualified,
    Round1,
    Round2,
}

impl ReviewerPool {
    pub const ALL: [ReviewerPool; 4] = [
        ReviewerPool::Emergency,
        ReviewerPool::Unqualified,
        ReviewerPool::Round1,
        ReviewerPool::Round2,
    ];

    /// Reviewer types that belong to this pool.
    pub fn types(self) -> &'static [&'static str] {
        match self {
            ReviewerPool::Emergency   => &["emergency-medium", "emergency-high"],
            ReviewerPool::Unqualified => &["regular-low"],
            ReviewerPool::Round1      => &["regular-high"],
            ReviewerPool::Round2      => &["regular-high", "regular-medium"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ReviewerPool::Emergency   => "emergency",
            ReviewerPool::Unqualified => "unqualified",
            ReviewerPool::Round1      => "round1",
            ReviewerPool::Round2      => "round2",
        }
    }
}

#[derive(Debug, Clone)]
pub struct QualificationPoolsConfig {
    pub qualification: PathBuf,
    /// Output path per pool, in `ReviewerPool::ALL` order
    pub outputs:       [PathBuf; 4],
}

pub struct QualificationPoolsUseCase {
    config: QualificationPoolsConfig,
}

impl QualificationPoolsUseCase {
    pub fn new(config: QualificationPoolsConfig) -> Self {
        Self { config }
    }

    /// Returns the row count of each pool, in `ReviewerPool::ALL` order.
    pub fn execute(&self) -> Result<[usize; 4]> {
        let cfg     = &self.config;
        let table   = read_headered(&cfg.qualification)?;
        let column  = table.column_index("type")?;
        let headers = table.headers.clone().unwrap_or_default();

        let mut counts  = [0; 4];
        let mut outputs = Vec::with_capacity(4);
        for (i, (pool, path)) in ReviewerPool::ALL.iter().zip(&cfg.outputs).enumerate() {
            let rows = filter_by_column(&table.rows, column, |t| pool.types().contains(&t));
            tracing::info!("{} pool: {}/{} reviewers", pool.name(), rows.len(), table.len());
            counts[i] = rows.len();
            outputs.push(OutputFile::headered(path, headers.clone(), rows));
        }

        write_all(&outputs)?;
        Ok(counts)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_pools_by_type() {
        let dir   = TempDir::new().unwrap();
        let quals = dir.path().join("qualification.csv");
        fs::write(
            &quals,
            "user,qualification,type\n\
             R1,1,regular-high\n\
             R2,1,regular-medium\n\
             R3,0,regular-low\n\
             R4,1,emergency-high\n\
             R5,1,emergency-medium\n\
             R6,1,unknown\n",
        )
        .unwrap();

        let outputs = ReviewerPool::ALL.map(|p| dir.path().join(format!("{}.csv", p.name())));
        let counts  = QualificationPoolsUseCase::new(QualificationPoolsConfig {
            qualification: quals,
            outputs:       outputs.clone(),
        })
        .execute()
        .unwrap();

        assert_eq!(counts, [2, 1, 1, 2]);
        assert_eq!(
            fs::read_to_string(&outputs[3]).unwrap(),
            "user,qualification,type\nR1,1,regular-high\nR2,1,regular-medium\n"
        );
        assert_eq!(
            fs::read_to_string(&outputs[1]).unwrap(),
            "user,qualification,type\nR3,0,regular-low\n"
        );
    }

    #[test]
    fn test_missing_type_column_is_an_error() {
        let dir   = TempDir::new().unwrap();
        let quals = dir.path().join("qualification.csv");
        fs::write(&quals, "user,qualification\nR1,1\n").unwrap();

        let outputs = ReviewerPool::ALL.map(|p| dir.path().join(format!("{}.csv", p.name())));
        let res = QualificationPoolsUseCase::new(QualificationPoolsConfig {
            qualification: quals,
            outputs:       outputs.clone(),
        })
        .execute();

        assert!(res.is_err());
        assert!(outputs.iter().all(|p| !p.exists()));
    }
}
