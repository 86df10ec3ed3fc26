// ============================================================
// Layer 2: ConstraintsUseCase
// ============================================================
// Derives `paper,reviewer,-1` constraint edges from a previous
// round's assignments, so the next round can diversify them:
//
//   quality: a paper whose assigned reviewers are all
//            unqualified (qualification == 0) gets a constraint
//            against every unqualified reviewer
//   country: a paper whose assigned reviewers all share one
//            country gets a constraint against every reviewer
//            from that country
//
// A paper with no assigned reviewers counts as all-unqualified
// but has no shared country.

use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::data::assignments::{read_assignments, PaperAssignment};
use crate::data::loader::{read_headered, RawTable};
use crate::domain::edge::Edge;
use crate::domain::error::TableError;
use crate::infra::writer::OutputFile;

const CONSTRAINT: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Quality,
    Country,
}

#[derive(Debug, Clone)]
pub struct ConstraintsConfig {
    pub kind:        ConstraintKind,
    pub assignments: PathBuf,
    /// Qualification table for `quality`, reviewer table for `country`
    pub reviewers:   PathBuf,
    pub output:      PathBuf,
}

pub struct ConstraintsUseCase {
    config: ConstraintsConfig,
}

impl ConstraintsUseCase {
    pub fn new(config: ConstraintsConfig) -> Self {
        Self { config }
    }

    /// Returns the number of constraint edges written.
    pub fn execute(&self) -> Result<usize> {
        let cfg = &self.config;
        tracing::info!("Deriving {:?} constraints", cfg.kind);

        let assignments = read_assignments(&cfg.assignments)?;
        let reviewers   = read_headered(&cfg.reviewers)?;

        let edges = match cfg.kind {
            ConstraintKind::Quality => quality_constraints(&assignments, &reviewers)?,
            ConstraintKind::Country => country_constraints(&assignments, &reviewers)?,
        };

        if edges.is_empty() {
            tracing::info!("No constraints found; writing an empty constraint file");
        } else {
            tracing::info!("Extracted {} constraints from {} papers", edges.len(), assignments.len());
        }
        OutputFile::from_edges(&cfg.output, &edges).write()?;

        Ok(edges.len())
    }
}

/// `reviewer id -> value of column` for a headered reviewer table.
fn column_by_user<'t>(table: &'t RawTable, column: &str) -> Result<HashMap<&'t str, &'t str>> {
    let user  = table.column_index("user")?;
    let value = table.column_index(column)?;

    Ok(table
        .rows
        .iter()
        .filter_map(|r| Some((r.get(user)?, r.get(value)?)))
        .collect())
}

/// Look up the column value of every reviewer assigned to a paper.
fn assigned_values<'t>(
    table:      &RawTable,
    column:     &str,
    by_user:    &HashMap<&'t str, &'t str>,
    assignment: &PaperAssignment,
) -> Result<Vec<&'t str>, TableError> {
    assignment
        .reviewers
        .iter()
        .map(|id| {
            by_user.get(id.as_str()).copied().ok_or_else(|| TableError::UnknownId {
                path:   table.path.display().to_string(),
                column: column.to_string(),
                id:     id.clone(),
            })
        })
        .collect()
}

fn is_unqualified(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(|q| q == 0.0)
}

/// Constraint edges for papers reviewed only by unqualified reviewers.
pub fn quality_constraints(assignments: &[PaperAssignment], table: &RawTable) -> Result<Vec<Edge>> {
    let by_user = column_by_user(table, "qualification")?;
    let user    = table.column_index("user")?;
    let qual    = table.column_index("qualification")?;

    let unqualified: Vec<&str> = table
        .rows
        .iter()
        .filter(|r| r.get(qual).is_some_and(is_unqualified))
        .filter_map(|r| r.get(user))
        .collect();

    let mut edges = Vec::new();
    for a in assignments {
        let values = assigned_values(table, "qualification", &by_user, a)?;
        if values.iter().all(|v| is_unqualified(v)) {
            edges.extend(unqualified.iter().map(|r| Edge::new(&a.paper, *r, CONSTRAINT)));
        }
    }
    Ok(edges)
}

/// Constraint edges for papers whose reviewers all come from one country.
pub fn country_constraints(assignments: &[PaperAssignment], table: &RawTable) -> Result<Vec<Edge>> {
    let by_user = column_by_user(table, "country")?;
    let user    = table.column_index("user")?;
    let country = table.column_index("country")?;

    let mut from: HashMap<&str, Vec<&str>> = HashMap::new();
    for r in &table.rows {
        if let (Some(u), Some(c)) = (r.get(user), r.get(country)) {
            from.entry(c).or_default().push(u);
        }
    }

    let mut edges = Vec::new();
    for a in assignments {
        let values   = assigned_values(table, "country", &by_user, a)?;
        let distinct: HashSet<&str> = values.iter().copied().collect();
        if distinct.len() != 1 {
            continue;
        }
        let shared = values[0];
        if shared.is_empty() {
            tracing::debug!("{}: assigned reviewers have no country, skipped", a.paper);
            continue;
        }
        if let Some(same) = from.get(shared) {
            edges.extend(same.iter().map(|r| Edge::new(&a.paper, *r, CONSTRAINT)));
        }
    }
    Ok(edges)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn table(dir: &TempDir, name: &str, body: &str) -> RawTable {
        let p = dir.path().join(name);
        fs::write(&p, body).unwrap();
        read_headered(&p).unwrap()
    }

    fn assignment(paper: &str, reviewers: &[&str]) -> PaperAssignment {
        PaperAssignment {
            paper:     paper.to_string(),
            reviewers: reviewers.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn keys(edges: &[Edge]) -> Vec<(&str, &str)> {
        edges.iter().map(Edge::key).collect()
    }

    #[test]
    fn test_quality_constraints_for_all_unqualified_papers() {
        let dir = TempDir::new().unwrap();
        let t   = table(&dir, "qualification.csv", "user,qualification\nR1,0\nR2,1\nR3,0\n");
        let a   = vec![
            assignment("P1", &["R1", "R3"]),
            assignment("P2", &["R1", "R2"]),
            assignment("P3", &[]),
        ];

        let edges = quality_constraints(&a, &t).unwrap();
        assert_eq!(
            keys(&edges),
            vec![("P1", "R1"), ("P1", "R3"), ("P3", "R1"), ("P3", "R3")]
        );
        assert!(edges.iter().all(|e| e.value == -1.0));
    }

    #[test]
    fn test_country_constraints_for_single_country_papers() {
        let dir = TempDir::new().unwrap();
        let t   = table(&dir, "reviewer.csv", "user,country\nR1,FR\nR2,FR\nR3,US\nR4,FR\n");
        let a   = vec![
            assignment("P1", &["R1", "R2"]),
            assignment("P2", &["R1", "R3"]),
            assignment("P3", &[]),
        ];

        let edges = country_constraints(&a, &t).unwrap();
        assert_eq!(keys(&edges), vec![("P1", "R1"), ("P1", "R2"), ("P1", "R4")]);
    }

    #[test]
    fn test_unknown_assigned_reviewer_is_an_error() {
        let dir = TempDir::new().unwrap();
        let t   = table(&dir, "reviewer.csv", "user,country\nR1,FR\n");
        let err = country_constraints(&[assignment("P1", &["R9"])], &t).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::UnknownId { .. })
        ));
    }

    #[test]
    fn test_execute_writes_empty_file_without_constraints() {
        let dir   = TempDir::new().unwrap();
        let json  = dir.path().join("assignments.json");
        let quals = dir.path().join("qualification.csv");
        let out   = dir.path().join("quality_constraints.csv");
        fs::write(&json, r#"{"P1": [{"user": "R2"}]}"#).unwrap();
        fs::write(&quals, "user,qualification\nR1,0\nR2,1\n").unwrap();

        let written = ConstraintsUseCase::new(ConstraintsConfig {
            kind:        ConstraintKind::Quality,
            assignments: json.clone(),
            reviewers:   quals,
            output:      out.clone(),
        })
        .execute()
        .unwrap();
        assert_eq!(written, 0);
        assert_eq!(fs::read_to_string(&out).unwrap(), "");

        fs::write(&json, r#"{"P1": [{"user": "R1"}]}"#).unwrap();
        let written = ConstraintsUseCase::new(ConstraintsConfig {
            kind:        ConstraintKind::Quality,
            assignments: json,
            reviewers:   dir.path().join("qualification.csv"),
            output:      out.clone(),
        })
        .execute()
        .unwrap();
        assert_eq!(written, 1);
        assert_eq!(fs::read_to_string(&out).unwrap(), "P1,R1,-1\n");
    }
}
