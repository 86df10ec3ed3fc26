// ============================================================
// Layer 3: Core Traits
// ============================================================
// Row filters are written against `VertexScope` rather than a
// concrete set type, so the same filtering code serves a
// split group, a debug subsample and a final-submission list.

/// A set of papers and reviewers that rows are kept against.
pub trait VertexScope {
    /// Whether the submission `id` belongs to this scope.
    fn has_paper(&self, id: &str) -> bool;

    /// Whether the reviewer `id` belongs to this scope.
    fn has_reviewer(&self, id: &str) -> bool;

    /// An edge is in scope only when both endpoints are.
    fn has_edge(&self, paper: &str, reviewer: &str) -> bool {
        self.has_paper(paper) && self.has_reviewer(reviewer)
    }
}
