// ============================================================
// Layer 1: CLI Commands and Arguments
// ============================================================
// One subcommand per batch transformation. clap's derive macros
// generate --help text, reject missing required flags and parse
// numbers before any file is opened.

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::{
    constraints_use_case::{ConstraintKind, ConstraintsConfig},
    exclude_use_case::ExcludeConfig,
    filter_reviewers_use_case::FilterReviewersConfig,
    flip_policy_use_case::FlipPolicyConfig,
    prune_use_case::PruneConfig,
    qualification_pools_use_case::QualificationPoolsConfig,
    split_use_case::SplitConfig,
    subsample_use_case::SubsampleConfig,
    thin_conflicts_use_case::ThinConflictsConfig,
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prune the affinity graph to top-K plus random slack edges per vertex
    Prune(PruneArgs),

    /// Split papers, reviewers and edges into two disconnected groups
    Split(SplitArgs),

    /// Subsample N papers and N reviewers for debugging
    Subsample(SubsampleArgs),

    /// Keep only final submissions in the submission table and edge files
    Exclude(ExcludeArgs),

    /// Randomly keep a fraction of the conflict constraints
    ThinConflicts(ThinConflictsArgs),

    /// Drop reviewers with a missing country or policy
    FilterReviewers(FilterReviewersArgs),

    /// Derive quality or country constraint edges from assignments
    Constraints(ConstraintsArgs),

    /// Split the qualification table into reviewer pools by type
    QualificationPools(QualificationPoolsArgs),

    /// Flip a share of Policy B submissions to Policy A
    FlipPolicy(FlipPolicyArgs),
}

#[derive(Args, Debug)]
pub struct PruneArgs {
    /// Affinity CSV (paper,reviewer,score); overwritten with the pruned graph
    #[arg(long)]
    pub affinity: PathBuf,

    /// Bids CSV (paper,reviewer,bid); overwritten with the filtered bids
    #[arg(long)]
    pub bids: PathBuf,

    /// Conflict constraints CSV (paper,reviewer,-1)
    #[arg(long)]
    pub conflict: PathBuf,

    /// Top-scoring edges kept per reviewer and per paper
    #[arg(long = "top-k", short = 'K')]
    pub top_k: usize,

    /// Extra random edges drawn per reviewer and per paper
    #[arg(long)]
    pub slack: usize,

    /// Seed for slack sampling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl From<PruneArgs> for PruneConfig {
    fn from(a: PruneArgs) -> Self {
        PruneConfig {
            affinity: a.affinity,
            bids:     a.bids,
            conflict: a.conflict,
            top_k:    a.top_k,
            slack:    a.slack,
            seed:     a.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Affinity scores CSV (paper,reviewer,score); defines the vertex sets
    #[arg(long)]
    pub scores: PathBuf,

    /// Reviewer metadata CSV with a 'user' column
    #[arg(long)]
    pub reviewer: PathBuf,

    /// Submission metadata CSV with a 'submission' column
    #[arg(long)]
    pub submission: PathBuf,

    /// Qualification CSV with a 'user' column
    #[arg(long)]
    pub qualification: Option<PathBuf>,

    /// Additional 2- or 3-column files to split (bids, conflicts, quota, ...)
    #[arg(long, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Base output directory; group1/ and group2/ are created inside
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Random seed for the vertex shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl From<SplitArgs> for SplitConfig {
    fn from(a: SplitArgs) -> Self {
        SplitConfig {
            scores:        a.scores,
            reviewer:      a.reviewer,
            submission:    a.submission,
            qualification: a.qualification,
            files:         a.files,
            output_dir:    a.output_dir,
            seed:          a.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct SubsampleArgs {
    #[arg(long)]
    pub scores: PathBuf,

    #[arg(long)]
    pub reviewer: PathBuf,

    #[arg(long)]
    pub submission: PathBuf,

    #[arg(long)]
    pub qualification: PathBuf,

    /// Number of papers and of reviewers to keep
    #[arg(long = "n", short = 'N', default_value_t = 1000)]
    pub n: usize,

    /// Additional 2- or 3-column files to subsample
    #[arg(long, num_args = 1..)]
    pub files: Vec<PathBuf>,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl From<SubsampleArgs> for SubsampleConfig {
    fn from(a: SubsampleArgs) -> Self {
        SubsampleConfig {
            scores:        a.scores,
            reviewer:      a.reviewer,
            submission:    a.submission,
            qualification: a.qualification,
            n:             a.n,
            files:         a.files,
            seed:          a.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct ExcludeArgs {
    /// CSV listing the final submissions in an 'id' column
    #[arg(long)]
    pub final_submissions: PathBuf,

    /// Submission metadata CSV to filter in place
    #[arg(long)]
    pub submission: Option<PathBuf>,

    /// 3-column edge files to filter in place
    #[arg(long, num_args = 1..)]
    pub files: Vec<PathBuf>,
}

impl From<ExcludeArgs> for ExcludeConfig {
    fn from(a: ExcludeArgs) -> Self {
        ExcludeConfig {
            final_submissions: a.final_submissions,
            submission:        a.submission,
            files:             a.files,
        }
    }
}

#[derive(Args, Debug)]
pub struct ThinConflictsArgs {
    /// Conflict constraints CSV, rewritten in place
    #[arg(long)]
    pub conflict: PathBuf,

    /// Fraction of rows to keep, within [0, 1]
    #[arg(long, default_value_t = 0.5)]
    pub fraction: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl From<ThinConflictsArgs> for ThinConflictsConfig {
    fn from(a: ThinConflictsArgs) -> Self {
        ThinConflictsConfig {
            conflict: a.conflict,
            fraction: a.fraction,
            seed:     a.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct FilterReviewersArgs {
    /// Reviewer CSV with 'user', 'country' and 'policy' columns
    #[arg(long)]
    pub reviewer: PathBuf,

    /// Where the kept reviewers are written
    #[arg(long)]
    pub output: PathBuf,

    /// Where the unregistered reviewers are written
    #[arg(long)]
    pub removed: PathBuf,

    /// Registered reviewers CSV with a 'reviewer_id' column
    #[arg(long)]
    pub registered: Option<PathBuf>,

    /// Write the reviewer table back unfiltered (test runs only)
    #[arg(long)]
    pub keep_unregistered: bool,
}

impl From<FilterReviewersArgs> for FilterReviewersConfig {
    fn from(a: FilterReviewersArgs) -> Self {
        FilterReviewersConfig {
            reviewer:          a.reviewer,
            output:            a.output,
            removed:           a.removed,
            registered:        a.registered,
            keep_unregistered: a.keep_unregistered,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintKindArg {
    /// Papers whose reviewers are all unqualified
    Quality,
    /// Papers whose reviewers all share one country
    Country,
}

impl From<ConstraintKindArg> for ConstraintKind {
    fn from(k: ConstraintKindArg) -> Self {
        match k {
            ConstraintKindArg::Quality => ConstraintKind::Quality,
            ConstraintKindArg::Country => ConstraintKind::Country,
        }
    }
}

#[derive(Args, Debug)]
pub struct ConstraintsArgs {
    #[arg(long, value_enum)]
    pub kind: ConstraintKindArg,

    /// Assignments JSON of the previous matching round
    #[arg(long)]
    pub assignments: PathBuf,

    /// Qualification CSV (quality) or reviewer CSV (country), with a 'user' column
    #[arg(long)]
    pub reviewers: PathBuf,

    /// Output constraints CSV (paper,reviewer,-1)
    #[arg(long)]
    pub output: PathBuf,
}

impl From<ConstraintsArgs> for ConstraintsConfig {
    fn from(a: ConstraintsArgs) -> Self {
        ConstraintsConfig {
            kind:        a.kind.into(),
            assignments: a.assignments,
            reviewers:   a.reviewers,
            output:      a.output,
        }
    }
}

#[derive(Args, Debug)]
pub struct QualificationPoolsArgs {
    /// Qualification CSV with a 'type' column
    #[arg(long)]
    pub qualification: PathBuf,

    #[arg(long)]
    pub emergency: PathBuf,

    #[arg(long)]
    pub unqualified: PathBuf,

    #[arg(long)]
    pub round1: PathBuf,

    #[arg(long)]
    pub round2: PathBuf,
}

impl From<QualificationPoolsArgs> for QualificationPoolsConfig {
    fn from(a: QualificationPoolsArgs) -> Self {
        QualificationPoolsConfig {
            qualification: a.qualification,
            outputs:       [a.emergency, a.unqualified, a.round1, a.round2],
        }
    }
}

#[derive(Args, Debug)]
pub struct FlipPolicyArgs {
    /// Submission CSV with 'submission' and 'policy' columns, rewritten in place
    #[arg(long)]
    pub submission: PathBuf,

    /// Share of Policy B submissions to flip, within [0, 1]
    #[arg(long)]
    pub rate: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl From<FlipPolicyArgs> for FlipPolicyConfig {
    fn from(a: FlipPolicyArgs) -> Self {
        FlipPolicyConfig {
            submission: a.submission,
            rate:       a.rate,
            seed:       a.seed,
        }
    }
}
