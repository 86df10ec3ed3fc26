// ============================================================
// Layer 2: Application / Use Cases
// ============================================================
// One use case per subcommand. Each one loads its inputs
// through Layer 4, decides every output row in memory and only
// then hands the finished tables to Layer 5 for writing.
//
// No argument parsing and no printing here; that is Layer 1.

// Candidate-graph pruning (top-K + slack)
pub mod prune_use_case;

// Two-way vertex-disjoint split
pub mod split_use_case;

// Debug-scale subsample
pub mod subsample_use_case;

// Restrict to final submissions
pub mod exclude_use_case;

// Random thinning of a conflict table
pub mod thin_conflicts_use_case;

// Registration-based reviewer filtering
pub mod filter_reviewers_use_case;

// Quality and country constraint edges from assignments
pub mod constraints_use_case;

// Reviewer pools by qualification type
pub mod qualification_pools_use_case;

// Seeded Policy B to Policy A flip
pub mod flip_policy_use_case;
