// ============================================================
// Layer 4: Vertex Splitter and Samplers
// ============================================================
// Seeded shuffling and sampling of vertex lists.
//
// `halve` is the classic shuffle-then-split_off: every
// permutation is equally likely and the first half (floor of
// len / 2) becomes group 1. Papers and reviewers are halved
// separately, one after the other from the same RNG, so the
// group of a paper says nothing about the group of a reviewer.
//
// Every function takes the RNG as a parameter; a seeded
// `StdRng` makes runs reproducible.

use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::domain::error::TableError;
use crate::domain::selection::VertexSelection;

/// Shuffle `items` and split at the midpoint into (first half, second half).
pub fn halve<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> (Vec<T>, Vec<T>) {
    items.shuffle(rng);

    let mid    = items.len() / 2;
    let second = items.split_off(mid);

    (items, second)
}

/// Split papers and reviewers into two vertex-disjoint groups.
pub fn split_vertices<R: Rng + ?Sized>(
    papers:    Vec<String>,
    reviewers: Vec<String>,
    rng:       &mut R,
) -> (VertexSelection, VertexSelection) {
    let (papers1, papers2)       = halve(papers, rng);
    let (reviewers1, reviewers2) = halve(reviewers, rng);

    (
        VertexSelection::new(papers1, reviewers1),
        VertexSelection::new(papers2, reviewers2),
    )
}

/// Draw `n` distinct items without replacement; all of them when fewer exist.
pub fn sample_up_to<R: Rng + ?Sized>(items: &[String], n: usize, rng: &mut R) -> Vec<String> {
    if n >= items.len() {
        return items.to_vec();
    }
    items.choose_multiple(rng, n).cloned().collect()
}

/// Row indices of a random `fraction` of `len` rows, ascending.
pub fn sample_fraction<R: Rng + ?Sized>(
    len:      usize,
    fraction: f64,
    rng:      &mut R,
) -> Result<Vec<usize>, TableError> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(TableError::InvalidFraction(fraction));
    }

    let amount      = ((len as f64) * fraction).round_ties_even() as usize;
    let mut picked  = index::sample(rng, len, amount.min(len)).into_vec();
    picked.sort_unstable();
    Ok(picked)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn ids(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    #[test]
    fn test_halve_sizes_use_floor_midpoint() {
        let mut rng  = StdRng::seed_from_u64(42);
        let (a, b)   = halve((0..7).collect::<Vec<_>>(), &mut rng);
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 4);
    }

    #[test]
    fn test_halve_preserves_items() {
        let mut rng = StdRng::seed_from_u64(42);
        let (a, b)  = halve((0..50).collect::<Vec<_>>(), &mut rng);
        let all: HashSet<_> = a.iter().chain(b.iter()).copied().collect();
        assert_eq!(all.len(), 50);
    }

    #[test]
    fn test_halve_empty_and_single() {
        let mut rng = StdRng::seed_from_u64(0);
        let (a, b)  = halve(Vec::<u8>::new(), &mut rng);
        assert!(a.is_empty() && b.is_empty());

        let (a, b) = halve(vec![1u8], &mut rng);
        assert!(a.is_empty());
        assert_eq!(b, vec![1]);
    }

    #[test]
    fn test_split_is_vertex_disjoint_for_many_seeds() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (g1, g2) = split_vertices(ids("P", 11), ids("R", 9), &mut rng);
            assert!(g1.is_disjoint(&g2));
            assert_eq!(g1.papers.len() + g2.papers.len(), 11);
            assert_eq!(g1.reviewers.len() + g2.reviewers.len(), 9);
        }
    }

    #[test]
    fn test_split_is_deterministic_per_seed() {
        let a = split_vertices(ids("P", 30), ids("R", 30), &mut StdRng::seed_from_u64(5));
        let b = split_vertices(ids("P", 30), ids("R", 30), &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_up_to_caps_at_available() {
        let mut rng = StdRng::seed_from_u64(1);
        let items   = ids("R", 4);
        assert_eq!(sample_up_to(&items, 10, &mut rng), items);

        let picked: HashSet<_> = sample_up_to(&items, 2, &mut rng).into_iter().collect();
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_sample_fraction_rounds_and_sorts() {
        let mut rng = StdRng::seed_from_u64(42);
        let picked  = sample_fraction(9, 0.5, &mut rng).unwrap();
        // 4.5 rounds to even
        assert_eq!(picked.len(), 4);
        assert_eq!(sample_fraction(7, 0.5, &mut rng).unwrap().len(), 4);
        assert!(picked.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sample_fraction_rejects_out_of_range() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(sample_fraction(10, 1.5, &mut rng).is_err());
        assert!(sample_fraction(10, -0.1, &mut rng).is_err());
    }
}
