// ============================================================
// Layer 3: Vertex Selections
// ============================================================
// A `VertexSelection` is one side of a split (group1 or group2)
// or the sampled vertices of a subsample. `PaperAllowList`
// restricts papers only and lets every reviewer through.

use std::collections::HashSet;

use crate::domain::traits::VertexScope;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexSelection {
    pub papers:    HashSet<String>,
    pub reviewers: HashSet<String>,
}

impl VertexSelection {
    pub fn new(
        papers:    impl IntoIterator<Item = String>,
        reviewers: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            papers:    papers.into_iter().collect(),
            reviewers: reviewers.into_iter().collect(),
        }
    }

    pub fn sizes(&self) -> SelectionSizes {
        SelectionSizes {
            papers:    self.papers.len(),
            reviewers: self.reviewers.len(),
        }
    }

    /// True when no paper and no reviewer is shared with `other`.
    pub fn is_disjoint(&self, other: &VertexSelection) -> bool {
        self.papers.is_disjoint(&other.papers) && self.reviewers.is_disjoint(&other.reviewers)
    }
}

impl VertexScope for VertexSelection {
    fn has_paper(&self, id: &str) -> bool {
        self.papers.contains(id)
    }

    fn has_reviewer(&self, id: &str) -> bool {
        self.reviewers.contains(id)
    }
}

/// Paper and reviewer counts of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSizes {
    pub papers:    usize,
    pub reviewers: usize,
}

/// Keeps the listed submissions and every reviewer.
#[derive(Debug, Clone, Default)]
pub struct PaperAllowList {
    papers: HashSet<String>,
}

impl PaperAllowList {
    pub fn new(papers: impl IntoIterator<Item = String>) -> Self {
        Self { papers: papers.into_iter().collect() }
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

impl VertexScope for PaperAllowList {
    fn has_paper(&self, id: &str) -> bool {
        self.papers.contains(id)
    }

    fn has_reviewer(&self, _id: &str) -> bool {
        true
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_edge_needs_both_endpoints() {
        let sel = VertexSelection::new(ids(&["P1"]), ids(&["R1"]));
        assert!(sel.has_edge("P1", "R1"));
        assert!(!sel.has_edge("P1", "R2"));
        assert!(!sel.has_edge("P2", "R1"));
    }

    #[test]
    fn test_disjointness() {
        let a = VertexSelection::new(ids(&["P1"]), ids(&["R1"]));
        let b = VertexSelection::new(ids(&["P2"]), ids(&["R2"]));
        let c = VertexSelection::new(ids(&["P3"]), ids(&["R1"]));
        assert!(a.is_disjoint(&b));
        assert!(!a.is_disjoint(&c));
    }

    #[test]
    fn test_allow_list_ignores_reviewers() {
        let allow = PaperAllowList::new(ids(&["P1"]));
        assert!(allow.has_edge("P1", "anyone"));
        assert!(!allow.has_edge("P9", "anyone"));
        assert_eq!(allow.len(), 1);
    }
}
