// ============================================================
// Layer 3: Edge Domain Type
// ============================================================
// One row of a headerless `paper,reviewer,value` table.
// The same shape carries affinity scores, bids and conflict
// constraints; only the meaning of `value` differs.

use std::fmt;

/// A scored edge between a submission and a reviewer.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Submission identifier (first column)
    pub paper: String,

    /// Reviewer identifier (second column)
    pub reviewer: String,

    /// Affinity score, bid value or constraint value (third column)
    pub value: f64,
}

impl Edge {
    pub fn new(paper: impl Into<String>, reviewer: impl Into<String>, value: f64) -> Self {
        Self {
            paper:    paper.into(),
            reviewer: reviewer.into(),
            value,
        }
    }

    /// The (paper, reviewer) identity of this edge, borrowed.
    pub fn key(&self) -> (&str, &str) {
        (self.paper.as_str(), self.reviewer.as_str())
    }

    /// The three CSV fields of this edge in file order.
    pub fn to_record(&self) -> [String; 3] {
        [self.paper.clone(), self.reviewer.clone(), self.value.to_string()]
    }
}

/// Which side of the bipartite graph an edge is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Paper,
    Reviewer,
}

impl Endpoint {
    /// The identifier of this endpoint on `edge`.
    pub fn of<'e>(&self, edge: &'e Edge) -> &'e str {
        match self {
            Endpoint::Paper    => edge.paper.as_str(),
            Endpoint::Reviewer => edge.reviewer.as_str(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Paper    => write!(f, "paper"),
            Endpoint::Reviewer => write!(f, "reviewer"),
        }
    }
}
