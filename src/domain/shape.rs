// ============================================================
// Layer 3: Table Shape
// ============================================================
// Headerless matching files come in two shapes:
//   vertex,value           (e.g. quota.csv, reviewer supply)
//   paper,reviewer,value   (e.g. affinity scores, bids, conflicts)
// Anything else cannot be split or subsampled.

use std::path::Path;

use crate::domain::error::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableShape {
    /// Two columns; the first one is a reviewer id
    Vertex,
    /// Three columns; paper id then reviewer id
    Edge,
}

impl TableShape {
    /// Classify a table by its column count.
    pub fn classify(path: &Path, columns: usize) -> Result<Self, TableError> {
        match columns {
            2 => Ok(TableShape::Vertex),
            3 => Ok(TableShape::Edge),
            _ => Err(TableError::UnsupportedShape {
                path: path.display().to_string(),
                columns,
            }),
        }
    }

    /// Word used when reporting row counts for this shape.
    pub fn unit(&self) -> &'static str {
        match self {
            TableShape::Vertex => "rows",
            TableShape::Edge   => "edges",
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_widths() {
        let p = Path::new("quota.csv");
        assert_eq!(TableShape::classify(p, 2).unwrap(), TableShape::Vertex);
        assert_eq!(TableShape::classify(p, 3).unwrap(), TableShape::Edge);
    }

    #[test]
    fn test_classify_rejects_other_widths() {
        let err = TableShape::classify(Path::new("weird.csv"), 4).unwrap_err();
        assert!(matches!(err, TableError::UnsupportedShape { columns: 4, .. }));
        assert!(err.to_string().contains("weird.csv"));
    }
}
