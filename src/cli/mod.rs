// ============================================================
// Layer 1: CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes each subcommand to its
// use case in Layer 2. The one-line outcome of a run is printed
// here; per-file detail goes through tracing.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::Commands;

use crate::application::{
    constraints_use_case::ConstraintsUseCase,
    exclude_use_case::ExcludeUseCase,
    filter_reviewers_use_case::FilterReviewersUseCase,
    flip_policy_use_case::FlipPolicyUseCase,
    prune_use_case::PruneUseCase,
    qualification_pools_use_case::QualificationPoolsUseCase,
    split_use_case::SplitUseCase,
    subsample_use_case::SubsampleUseCase,
    thin_conflicts_use_case::ThinConflictsUseCase,
};

#[derive(Parser, Debug)]
#[command(
    name = "matchprep",
    version,
    about = "Prepare reviewer-paper matching data: prune, split, filter, derive constraints."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prune(args) => {
                let report = PruneUseCase::new(args.into()).execute()?;
                println!(
                    "Pruned {} affinity edges to {} candidate edges ({} bids kept).",
                    report.affinity_in, report.candidate_edges, report.bids_kept
                );
            }
            Commands::Split(args) => {
                let output_dir = args.output_dir.clone();
                let m = SplitUseCase::new(args.into()).execute()?;
                println!(
                    "Group 1: {} papers, {} reviewers, {} edges",
                    m.group1.papers, m.group1.reviewers, m.group1.edges
                );
                println!(
                    "Group 2: {} papers, {} reviewers, {} edges",
                    m.group2.papers, m.group2.reviewers, m.group2.edges
                );
                println!(
                    "Dropped cross-group edges: {} ({:.1}%)",
                    m.dropped_edges, m.dropped_percent
                );
                println!("Output written to {}", output_dir.display());
            }
            Commands::Subsample(args) => {
                let report = SubsampleUseCase::new(args.into()).execute()?;
                println!(
                    "Subsampled {} scores from {} submissions and {} reviewers ({} files written).",
                    report.score_edges,
                    report.sampled.papers,
                    report.sampled.reviewers,
                    report.files_written
                );
            }
            Commands::Exclude(args) => {
                let report = ExcludeUseCase::new(args.into()).execute()?;
                println!(
                    "Excluded {} submissions and {} edges ({} final submissions).",
                    report.excluded_submissions, report.removed_edges, report.final_papers
                );
            }
            Commands::ThinConflicts(args) => {
                let (kept, before) = ThinConflictsUseCase::new(args.into()).execute()?;
                println!("Kept {kept}/{before} conflict rows.");
            }
            Commands::FilterReviewers(args) => {
                let report = FilterReviewersUseCase::new(args.into()).execute()?;
                println!(
                    "Kept {}/{} reviewers ({} unregistered).",
                    report.kept, report.before, report.unregistered
                );
            }
            Commands::Constraints(args) => {
                let written = ConstraintsUseCase::new(args.into()).execute()?;
                println!("Wrote {written} constraint edges.");
            }
            Commands::QualificationPools(args) => {
                let [emergency, unqualified, round1, round2] =
                    QualificationPoolsUseCase::new(args.into()).execute()?;
                println!(
                    "Pools: {emergency} emergency, {unqualified} unqualified, {round1} round 1, {round2} round 2."
                );
            }
            Commands::FlipPolicy(args) => {
                let flipped = FlipPolicyUseCase::new(args.into()).execute()?;
                println!("Flipped {} papers from Policy B to Policy A.", flipped.len());
            }
        }
        Ok(())
    }
}
