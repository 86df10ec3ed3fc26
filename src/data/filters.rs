// ============================================================
// Layer 4: Row Filters
// ============================================================
// Keeps the rows of a table that fall inside a `VertexScope`.
//
//   Edge shape   (paper,reviewer,value): both endpoints in scope
//   Vertex shape (reviewer,value):       first column in scope
//   Metadata     (headered):             named id column in scope
//
// Rows are cloned unchanged; only membership is decided here.

use csv::StringRecord;
use std::collections::HashSet;

use crate::domain::shape::TableShape;
use crate::domain::traits::VertexScope;

/// Rows of a headerless table that belong to `scope`.
pub fn filter_rows<S: VertexScope + ?Sized>(
    rows:  &[StringRecord],
    shape: TableShape,
    scope: &S,
) -> Vec<StringRecord> {
    rows.iter()
        .filter(|r| match shape {
            TableShape::Edge   => scope.has_edge(&r[0], &r[1]),
            TableShape::Vertex => scope.has_reviewer(&r[0]),
        })
        .cloned()
        .collect()
}

/// Rows whose `column` value satisfies `keep`.
pub fn filter_by_column<F>(rows: &[StringRecord], column: usize, keep: F) -> Vec<StringRecord>
where
    F: Fn(&str) -> bool,
{
    rows.iter()
        .filter(|r| r.get(column).is_some_and(&keep))
        .cloned()
        .collect()
}

/// Distinct (papers, reviewers) touched by the rows of an edge table.
pub fn endpoint_counts(rows: &[StringRecord]) -> (usize, usize) {
    let papers: HashSet<&str>    = rows.iter().map(|r| &r[0]).collect();
    let reviewers: HashSet<&str> = rows.iter().map(|r| &r[1]).collect();
    (papers.len(), reviewers.len())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::VertexSelection;

    fn rec(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    fn scope() -> VertexSelection {
        VertexSelection::new(
            vec!["P1".to_string()],
            vec!["R1".to_string(), "R2".to_string()],
        )
    }

    #[test]
    fn test_edge_rows_need_both_endpoints() {
        let rows = vec![
            rec(&["P1", "R1", "0.3"]),
            rec(&["P1", "R3", "0.3"]),
            rec(&["P2", "R1", "0.3"]),
            rec(&["P1", "R2", "0.1"]),
        ];
        let kept = filter_rows(&rows, TableShape::Edge, &scope());
        assert_eq!(kept, vec![rows[0].clone(), rows[3].clone()]);
    }

    #[test]
    fn test_vertex_rows_match_reviewers() {
        let rows = vec![rec(&["R1", "6"]), rec(&["R9", "6"]), rec(&["P1", "6"])];
        let kept = filter_rows(&rows, TableShape::Vertex, &scope());
        assert_eq!(kept, vec![rows[0].clone()]);
    }

    #[test]
    fn test_filter_by_column() {
        let rows = vec![rec(&["FR", "R1"]), rec(&["US", "R4"])];
        let kept = filter_by_column(&rows, 1, |id| id == "R4");
        assert_eq!(kept, vec![rows[1].clone()]);
    }

    #[test]
    fn test_endpoint_counts() {
        let rows = vec![
            rec(&["P1", "R1", "1"]),
            rec(&["P1", "R2", "1"]),
            rec(&["P2", "R2", "1"]),
        ];
        assert_eq!(endpoint_counts(&rows), (2, 2));
    }
}
