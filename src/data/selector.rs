// ============================================================
// Layer 4: Top-K + Slack Selector
// ============================================================
// For every vertex on one side of the bipartite graph:
//   1. keep its K highest-scoring edges            (top_k)
//   2. from its remaining edges, draw R rows with
//      replacement and keep the distinct ones       (slack)
//
// The same routine runs twice during pruning, once grouped by
// reviewer and once grouped by paper.
//
// Drawing with replacement never fails when a vertex has fewer
// than R remaining edges, but repeated draws collapse, so such
// a vertex ends up with fewer than R slack edges. Pruned graphs
// from earlier runs were produced this way and the behaviour is
// kept.
//
// Ties in score keep input row order (stable sort), so which of
// two equal-score edges survives depends on file order only.
// A NaN score never ranks into the top K; such an edge can still
// be drawn as slack.

use rand::Rng;
use std::collections::{HashMap, HashSet};

use crate::domain::edge::{Edge, Endpoint};

/// Row indices chosen for one side, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub top_k: Vec<usize>,
    pub slack: Vec<usize>,
}

/// Pick the top `k` and up to `slack` random extra edges per vertex of `side`.
pub fn select_top_k_and_slack<R: Rng + ?Sized>(
    edges: &[Edge],
    side:  Endpoint,
    k:     usize,
    slack: usize,
    rng:   &mut R,
) -> Selection {
    let groups = group_rows(edges, side);

    let mut top_k = Vec::new();
    for members in &groups {
        let mut ranked: Vec<usize> = members
            .iter()
            .copied()
            .filter(|&i| !edges[i].value.is_nan())
            .collect();
        ranked.sort_by(|&a, &b| edges[b].value.total_cmp(&edges[a].value));
        top_k.extend(ranked.into_iter().take(k));
    }

    // Slack candidates exclude anything already kept on this side, by key
    let kept: HashSet<(&str, &str)> = top_k.iter().map(|&i| edges[i].key()).collect();

    let mut slack_rows = Vec::new();
    if slack > 0 {
        for members in &groups {
            let remaining: Vec<usize> = members
                .iter()
                .copied()
                .filter(|&i| !kept.contains(&edges[i].key()))
                .collect();
            if remaining.is_empty() {
                continue;
            }

            let mut drawn = HashSet::with_capacity(slack);
            for _ in 0..slack {
                let pick = remaining[rng.gen_range(0..remaining.len())];
                if drawn.insert(pick) {
                    slack_rows.push(pick);
                }
            }
        }
    }

    tracing::debug!(
        "{} side: {} groups, {} top-k edges, {} slack edges",
        side,
        groups.len(),
        top_k.len(),
        slack_rows.len()
    );

    Selection { top_k, slack: slack_rows }
}

/// Row indices grouped by the `side` endpoint, groups in order of first appearance.
fn group_rows(edges: &[Edge], side: Endpoint) -> Vec<Vec<usize>> {
    let mut slot: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>>    = Vec::new();

    for (i, edge) in edges.iter().enumerate() {
        let g = *slot.entry(side.of(edge)).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[g].push(i);
    }

    groups
}
