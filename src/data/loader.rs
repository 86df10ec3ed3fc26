// ============================================================
// Layer 4: Table Loader
// ============================================================
// Reads the CSV files of a matching data set.
//
// Two flavours exist on disk:
//   - headerless numeric tables (scores, bids, conflicts, quota)
//   - headered metadata tables (submission.csv, reviewer.csv,
//     qualification.csv) identified by a named id column
//
// Rows are kept as `csv::StringRecord`s so that filtering a
// table writes back exactly the text that was read. Typed
// access (`read_edges`, `read_pairs`) parses on top of that.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::edge::Edge;
use crate::domain::error::TableError;

/// A CSV table held in memory, with its origin path.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub path:    PathBuf,
    pub headers: Option<StringRecord>,
    pub rows:    Vec<StringRecord>,
}

impl RawTable {
    /// Number of columns. An empty headerless table has width 0.
    pub fn width(&self) -> usize {
        match &self.headers {
            Some(h) => h.len(),
            None    => self.rows.first().map_or(0, |r| r.len()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column in a headered table.
    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.headers
            .as_ref()
            .and_then(|h| h.iter().position(|c| c == name))
            .ok_or_else(|| TableError::MissingColumn {
                path:   self.path.display().to_string(),
                column: name.to_string(),
            })
    }

    /// Distinct values of column `idx`, in order of first appearance.
    pub fn distinct(&self, idx: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(|r| r.get(idx))
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect()
    }

    /// File name component of the origin path.
    pub fn file_name(&self) -> Result<&str> {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("'{}' has no file name", self.path.display()))
    }
}

/// Read a CSV file without a header row.
pub fn read_headerless(path: impl AsRef<Path>) -> Result<RawTable> {
    read_table(path.as_ref(), false)
}

/// Read a CSV file whose first row names the columns.
pub fn read_headered(path: impl AsRef<Path>) -> Result<RawTable> {
    read_table(path.as_ref(), true)
}

fn read_table(path: &Path, has_headers: bool) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("Cannot open '{}'", path.display()))?;

    let headers = if has_headers {
        let h = reader
            .headers()
            .with_context(|| format!("Cannot read header of '{}'", path.display()))?
            .clone();
        Some(h)
    } else {
        None
    };

    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Malformed CSV in '{}'", path.display()))?;

    tracing::debug!("Read {} rows from '{}'", rows.len(), path.display());

    Ok(RawTable { path: path.to_path_buf(), headers, rows })
}

/// Read a `paper,reviewer,value` table into typed edges.
pub fn read_edges(path: impl AsRef<Path>) -> Result<Vec<Edge>> {
    let table = read_headerless(path)?;
    edges_from_table(&table)
}

/// Parse every row of a 3-column table as an `Edge`.
pub fn edges_from_table(table: &RawTable) -> Result<Vec<Edge>> {
    let path = table.path.display().to_string();

    if !table.is_empty() && table.width() != 3 {
        return Err(TableError::WrongColumnCount {
            path,
            expected: 3,
            found:    table.width(),
        }
        .into());
    }

    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| -> Result<Edge> {
            let raw = &r[2];
            let value = raw.parse::<f64>().map_err(|_| TableError::InvalidValue {
                path:  path.clone(),
                row:   i + 1,
                value: raw.to_string(),
            })?;
            Ok(Edge::new(&r[0], &r[1], value))
        })
        .collect()
}

/// Read the (paper, reviewer) keys of a constraint table.
/// Only the first two columns matter; the value column is ignored.
pub fn read_pairs(path: impl AsRef<Path>) -> Result<Vec<(String, String)>> {
    let table = read_headerless(path)?;

    if !table.is_empty() && table.width() < 2 {
        return Err(TableError::WrongColumnCount {
            path:     table.path.display().to_string(),
            expected: 3,
            found:    table.width(),
        }
        .into());
    }

    Ok(table
        .rows
        .iter()
        .map(|r| (r[0].to_string(), r[1].to_string()))
        .collect())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let p = dir.path().join(name);
        fs::write(&p, body).unwrap();
        p
    }

    #[test]
    fn test_read_edges_parses_values() {
        let dir   = TempDir::new().unwrap();
        let p     = write(&dir, "scores.csv", "P1,R1,0.5\nP1, R2 ,-1\n");
        let edges = read_edges(&p).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1], Edge::new("P1", "R2", -1.0));
    }

    #[test]
    fn test_read_edges_rejects_bad_number() {
        let dir = TempDir::new().unwrap();
        let p   = write(&dir, "scores.csv", "P1,R1,0.5\nP2,R1,high\n");
        let err = read_edges(&p).unwrap_err();
        let err = err.downcast_ref::<TableError>().unwrap();
        assert!(matches!(err, TableError::InvalidValue { row: 2, .. }));
    }

    #[test]
    fn test_read_edges_rejects_two_columns() {
        let dir = TempDir::new().unwrap();
        let p   = write(&dir, "quota.csv", "R1,3\n");
        let err = read_edges(&p).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::WrongColumnCount { found: 2, .. })
        ));
    }

    #[test]
    fn test_ragged_rows_are_malformed() {
        let dir = TempDir::new().unwrap();
        let p   = write(&dir, "bids.csv", "P1,R1,1\nP2,R2\n");
        assert!(read_headerless(&p).is_err());
    }

    #[test]
    fn test_empty_file_has_no_width() {
        let dir   = TempDir::new().unwrap();
        let p     = write(&dir, "conflicts.csv", "");
        let table = read_headerless(&p).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.width(), 0);
        assert!(read_pairs(&p).unwrap().is_empty());
    }

    #[test]
    fn test_headered_column_lookup() {
        let dir   = TempDir::new().unwrap();
        let p     = write(&dir, "reviewer.csv", "user,country\nR1,FR\nR2,US\n");
        let table = read_headered(&p).unwrap();
        assert_eq!(table.column_index("user").unwrap(), 0);
        assert_eq!(table.len(), 2);

        let err = table.column_index("submission").unwrap_err();
        assert!(matches!(err, TableError::MissingColumn { .. }));
    }

    #[test]
    fn test_distinct_keeps_first_appearance_order() {
        let dir   = TempDir::new().unwrap();
        let p     = write(&dir, "scores.csv", "P2,R1,1\nP1,R1,1\nP2,R2,1\n");
        let table = read_headerless(&p).unwrap();
        assert_eq!(table.distinct(0), vec!["P2", "P1"]);
        assert_eq!(table.distinct(1), vec!["R1", "R2"]);
    }
}
