// ============================================================
// Layer 4: Assignment Loader
// ============================================================
// Reads the solver's assignment output, a JSON object keyed by
// submission id:
//
//   {
//     "P1": [ { "user": "R3", ... }, { "user": "R7", ... } ],
//     "P2": [ ... ]
//   }
//
// Only the `user` field of each assigned reviewer is read.
// Papers keep the key order of the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// Reviewers assigned to one paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperAssignment {
    pub paper:     String,
    pub reviewers: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AssignedReviewer {
    user: String,
}

/// Read an assignments JSON file.
pub fn read_assignments(path: impl AsRef<Path>) -> Result<Vec<PaperAssignment>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;
    parse_assignments(&text).with_context(|| format!("Malformed assignments in '{}'", path.display()))
}

fn parse_assignments(text: &str) -> Result<Vec<PaperAssignment>> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;

    map.into_iter()
        .map(|(paper, value)| {
            let assigned: Vec<AssignedReviewer> = serde_json::from_value(value)
                .with_context(|| format!("paper '{paper}'"))?;
            Ok(PaperAssignment {
                paper,
                reviewers: assigned.into_iter().map(|a| a.user).collect(),
            })
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_file_order() {
        let json = r#"{
            "P9": [{"user": "R1", "aggregate_score": 0.4}, {"user": "R2"}],
            "P1": []
        }"#;
        let a = parse_assignments(json).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].paper, "P9");
        assert_eq!(a[0].reviewers, vec!["R1", "R2"]);
        assert!(a[1].reviewers.is_empty());
    }

    #[test]
    fn test_missing_user_is_an_error() {
        assert!(parse_assignments(r#"{"P1": [{"name": "R1"}]}"#).is_err());
        assert!(parse_assignments("[1, 2]").is_err());
    }
}
