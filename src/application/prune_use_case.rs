// ============================================================
// Layer 2: PruneUseCase
// ============================================================
// Turns the dense paper x reviewer affinity graph into the
// sparse candidate graph handed to the assignment solver.
//
//   Step 1: Load affinity, bids and conflicts       (Layer 4)
//   Step 2: Drop conflicted pairs from both tables
//   Step 3: Keep only bids that have an affinity score
//   Step 4: Affinity edges with a positive bid
//   Step 5: Top-K + slack per reviewer                (Layer 4)
//   Step 6: Top-K + slack per paper                   (Layer 4)
//   Step 7: Union of 4-6, first occurrence per pair wins
//   Step 8: Rewrite bids, then affinity, in place      (Layer 5)
//
// Both outputs are computed before either file is touched.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::data::{
    loader::{read_edges, read_pairs},
    selector::select_top_k_and_slack,
};
use crate::domain::edge::{Edge, Endpoint};
use crate::infra::writer::{write_all, OutputFile};

// ─── Prune Configuration ──────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct PruneConfig {
    pub affinity: PathBuf,
    pub bids:     PathBuf,
    pub conflict: PathBuf,
    /// K: best edges kept per reviewer and per paper
    pub top_k:    usize,
    /// R: random extra edges drawn per reviewer and per paper
    pub slack:    usize,
    pub seed:     u64,
}

/// Edge counts at each stage of a pruning run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub affinity_in:        usize,
    pub affinity_filtered:  usize,
    pub bids_in:            usize,
    pub bids_kept:          usize,
    pub positive_bids:      usize,
    pub bid_edges:          usize,
    pub reviewer_top_k:     usize,
    pub reviewer_slack:     usize,
    pub paper_top_k:        usize,
    pub paper_slack:        usize,
    pub candidate_edges:    usize,
}

/// Result of pruning, before anything is written.
#[derive(Debug, Clone)]
pub struct PrunedGraph {
    /// Conflict-free bids restricted to scored pairs (all values, not only positive)
    pub bids:       Vec<Edge>,
    /// The candidate graph
    pub candidates: Vec<Edge>,
    pub report:     PruneReport,
}

pub struct PruneUseCase {
    config: PruneConfig,
}

impl PruneUseCase {
    pub fn new(config: PruneConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<PruneReport> {
        let cfg = &self.config;

        // ── Step 1: Load inputs ──────────────────────────────────────────────
        let affinity  = read_edges(&cfg.affinity)
            .with_context(|| format!("Cannot load affinity scores '{}'", cfg.affinity.display()))?;
        let bids      = read_edges(&cfg.bids)
            .with_context(|| format!("Cannot load bids '{}'", cfg.bids.display()))?;
        let conflicts = read_pairs(&cfg.conflict)
            .with_context(|| format!("Cannot load conflicts '{}'", cfg.conflict.display()))?;

        tracing::info!(
            "Loaded {} affinity edges, {} bids, {} conflicts",
            affinity.len(),
            bids.len(),
            conflicts.len()
        );

        // ── Steps 2-7: Prune in memory ───────────────────────────────────────
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let pruned  = prune_graph(affinity, bids, &conflicts, cfg.top_k, cfg.slack, &mut rng);

        // ── Step 8: Rewrite both files ───────────────────────────────────────
        write_all(&[
            OutputFile::from_edges(&cfg.bids, &pruned.bids),
            OutputFile::from_edges(&cfg.affinity, &pruned.candidates),
        ])?;

        Ok(pruned.report)
    }
}

/// Build the candidate graph from in-memory tables.
pub fn prune_graph<R: Rng + ?Sized>(
    affinity:  Vec<Edge>,
    bids:      Vec<Edge>,
    conflicts: &[(String, String)],
    k:         usize,
    slack:     usize,
    rng:       &mut R,
) -> PrunedGraph {
    let mut report = PruneReport {
        affinity_in: affinity.len(),
        bids_in:     bids.len(),
        ..Default::default()
    };

    let conflicted: HashSet<(&str, &str)> = conflicts
        .iter()
        .map(|(p, r)| (p.as_str(), r.as_str()))
        .collect();

    let affinity: Vec<Edge> = affinity
        .into_iter()
        .filter(|e| !conflicted.contains(&e.key()))
        .collect();
    report.affinity_filtered = affinity.len();

    // A bid on a pair without an affinity score is meaningless
    let scored: HashSet<(&str, &str)> = affinity.iter().map(Edge::key).collect();
    let bids: Vec<Edge> = bids
        .into_iter()
        .filter(|b| !conflicted.contains(&b.key()) && scored.contains(&b.key()))
        .collect();
    report.bids_kept = bids.len();

    let bid_rows: Vec<usize> = {
        let positive: HashSet<(&str, &str)> = bids
            .iter()
            .filter(|b| b.value > 0.0)
            .map(Edge::key)
            .collect();
        report.positive_bids = positive.len();

        affinity
            .iter()
            .enumerate()
            .filter(|(_, e)| positive.contains(&e.key()))
            .map(|(i, _)| i)
            .collect()
    };
    report.bid_edges = bid_rows.len();

    tracing::info!(
        "{} affinity edges and {} bids after conflicts ({} positive)",
        report.affinity_filtered,
        report.bids_kept,
        report.positive_bids
    );

    let by_reviewer = select_top_k_and_slack(&affinity, Endpoint::Reviewer, k, slack, rng);
    let by_paper    = select_top_k_and_slack(&affinity, Endpoint::Paper, k, slack, rng);
    report.reviewer_top_k = by_reviewer.top_k.len();
    report.reviewer_slack = by_reviewer.slack.len();
    report.paper_top_k    = by_paper.top_k.len();
    report.paper_slack    = by_paper.slack.len();

    let mut seen = HashSet::new();
    let candidates: Vec<Edge> = bid_rows
        .iter()
        .chain(&by_reviewer.top_k)
        .chain(&by_reviewer.slack)
        .chain(&by_paper.top_k)
        .chain(&by_paper.slack)
        .filter(|&&i| seen.insert(affinity[i].key()))
        .map(|&i| affinity[i].clone())
        .collect();
    report.candidate_edges = candidates.len();

    tracing::info!(
        "bid {}, reviewer top-k {}, reviewer slack {}, paper top-k {}, paper slack {} → {} candidate edges",
        report.bid_edges,
        report.reviewer_top_k,
        report.reviewer_slack,
        report.paper_top_k,
        report.paper_slack,
        report.candidate_edges
    );

    PrunedGraph { bids, candidates, report }
}
