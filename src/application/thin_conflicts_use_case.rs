// ============================================================
// Layer 2: ThinConflictsUseCase
// ============================================================
// Keeps a random fraction of a conflict table, for experiments
// that relax the conflict constraints. The file is rewritten in
// place; surviving rows keep their original order.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use crate::data::{loader::read_headerless, splitter::sample_fraction};
use crate::domain::error::TableError;
use crate::infra::writer::OutputFile;

#[derive(Debug, Clone)]
pub struct ThinConflictsConfig {
    pub conflict: PathBuf,
    pub fraction: f64,
    pub seed:     u64,
}

pub struct ThinConflictsUseCase {
    config: ThinConflictsConfig,
}

impl ThinConflictsUseCase {
    pub fn new(config: ThinConflictsConfig) -> Self {
        Self { config }
    }

    /// Returns (rows kept, rows before).
    pub fn execute(&self) -> Result<(usize, usize)> {
        let cfg = &self.config;
        if !(0.0..=1.0).contains(&cfg.fraction) {
            return Err(TableError::InvalidFraction(cfg.fraction).into());
        }

        let table   = read_headerless(&cfg.conflict)?;
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let keep    = sample_fraction(table.len(), cfg.fraction, &mut rng)?;
        let rows    = keep.iter().map(|&i| table.rows[i].clone()).collect::<Vec<_>>();

        tracing::info!("Keeping {}/{} conflict rows", rows.len(), table.len());
        let kept = rows.len();
        OutputFile::headerless(&cfg.conflict, rows).write()?;

        Ok((kept, table.len()))
    }
}
