// ============================================================
// Layer 5: Output Writer
// ============================================================
// Writes output tables without ever leaving a half-written file.
//
// Each file is first written to a hidden sibling
// `.<name>.tmp` in the destination directory and then renamed
// over the target. A failure while writing removes the temp
// file and leaves the target untouched.
//
// Use cases collect every `OutputFile` in memory before calling
// `write_all`, so a read or compute error aborts a run before
// anything is written.

use anyhow::{Context, Result};
use csv::{StringRecord, WriterBuilder};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::edge::Edge;

/// A fully computed table waiting to be written.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub path:    PathBuf,
    pub headers: Option<StringRecord>,
    pub rows:    Vec<StringRecord>,
}

impl OutputFile {
    /// A table written without a header row.
    pub fn headerless(path: impl Into<PathBuf>, rows: Vec<StringRecord>) -> Self {
        Self { path: path.into(), headers: None, rows }
    }

    /// A table written with the given header row.
    pub fn headered(path: impl Into<PathBuf>, headers: StringRecord, rows: Vec<StringRecord>) -> Self {
        Self { path: path.into(), headers: Some(headers), rows }
    }

    /// A headerless `paper,reviewer,value` table built from edges.
    pub fn from_edges<'e>(path: impl Into<PathBuf>, edges: impl IntoIterator<Item = &'e Edge>) -> Self {
        let rows = edges
            .into_iter()
            .map(|e| StringRecord::from(e.to_record().to_vec()))
            .collect();
        Self::headerless(path, rows)
    }

    /// Write this table atomically.
    pub fn write(&self) -> Result<()> {
        replace_file(&self.path, |tmp| {
            let mut w = WriterBuilder::new()
                .has_headers(false)
                .from_path(tmp)
                .with_context(|| format!("Cannot create '{}'", tmp.display()))?;

            if let Some(h) = &self.headers {
                w.write_record(h)?;
            }
            for row in &self.rows {
                w.write_record(row)?;
            }
            w.flush()?;
            Ok(())
        })?;

        tracing::debug!("Wrote {} rows to '{}'", self.rows.len(), self.path.display());
        Ok(())
    }
}

/// Write every file, in order.
pub fn write_all(files: &[OutputFile]) -> Result<()> {
    for f in files {
        f.write()?;
    }
    Ok(())
}

/// Produce `path` by filling a temp file through `fill` and renaming it into place.
pub fn replace_file<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let tmp = temp_path(path)?;

    if let Err(e) = fill(&tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| {
            format!("Cannot move '{}' into place at '{}'", tmp.display(), path.display())
        });
    }
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("'{}' has no file name", path.display()))?;
    Ok(path.with_file_name(format!(".{name}.tmp")))
}
