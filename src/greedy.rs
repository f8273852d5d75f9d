// greedy.rs Copyright 2018 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Greedy maximum-coverage heuristic with a beam-width tie-break and a
//! 2-opt pair-removal improvement pass, used when `s < j`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::bitset::BitSet;
use crate::coverage::CoverageMatrix;
use crate::error::PartialCoverageWarning;

pub struct GreedyConfig {
    pub beam_width: usize,
    pub seed: Option<u64>,
}

pub struct GreedyOutcome {
    pub selection: Vec<usize>,
    pub warning: Option<PartialCoverageWarning>,
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// number of currently-unsatisfied targets that candidate `i` would cover
fn gain(matrix: &CoverageMatrix, satisfied: &BitSet, candidate: usize) -> usize {
    let mut count = 0;
    for target in 0..matrix.j_req.len() {
        if !satisfied.contains(target) && matrix.hits(candidate, target) {
            count += 1;
        }
    }
    count
}

fn greedy_phase(matrix: &CoverageMatrix, beam_width: usize) -> (Vec<usize>, BitSet) {
    let n_targets = matrix.j_req.len();
    let mut satisfied = BitSet::new(n_targets.max(1));
    let mut pool: Vec<usize> = (0..matrix.k_mask.len()).collect();
    let mut selection = Vec::new();

    loop {
        if satisfied.count_ones() >= n_targets {
            break;
        }

        let mut ranked: Vec<(usize, usize)> =
            pool.iter().map(|&i| (i, gain(matrix, &satisfied, i))).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let best = ranked.first().copied();
        match best {
            Some((_, 0)) | None => break,
            Some(_) => {
                let window = beam_width.min(ranked.len());
                let (chosen, _) = ranked[..window][0];

                for target in 0..n_targets {
                    if matrix.hits(chosen, target) {
                        satisfied.insert(target);
                    }
                }
                selection.push(chosen);
                pool.retain(|&c| c != chosen);
            }
        }
    }

    (selection, satisfied)
}

fn fully_covers(matrix: &CoverageMatrix, selection: &[usize]) -> bool {
    (0..matrix.j_req.len()).all(|target| matrix.selection_covers(selection, target))
}

/// Randomly probes pair-removals from `selection`, keeping any that
/// preserve full coverage. Budget is `5 * selection.len()` trials.
fn two_opt(matrix: &CoverageMatrix, selection: Vec<usize>, rng: &mut StdRng) -> Vec<usize> {
    if selection.len() < 2 {
        return selection;
    }

    let mut current = selection;
    let trials = 5 * current.len();
    let mut accepted = 0usize;
    let mut attempted = 0usize;

    for _ in 0..trials {
        if current.len() < 2 {
            break;
        }
        attempted += 1;

        let i = rng.gen_range(0..current.len());
        let mut j = rng.gen_range(0..current.len());
        while j == i {
            j = rng.gen_range(0..current.len());
        }

        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let mut candidate = current.clone();
        candidate.remove(hi);
        candidate.remove(lo);

        if fully_covers(matrix, &candidate) {
            current = candidate;
            accepted += 1;
        }
    }

    debug!(
        trials = attempted,
        accepted,
        acceptance_rate = if attempted > 0 { accepted as f64 / attempted as f64 } else { 0.0 },
        "2-opt complete"
    );

    current
}

pub fn solve(matrix: &CoverageMatrix, cfg: &GreedyConfig) -> GreedyOutcome {
    let (selection, satisfied) = greedy_phase(matrix, cfg.beam_width.max(1));
    let n_targets = matrix.j_req.len();
    let covered = satisfied.count_ones().min(n_targets);

    if covered < n_targets {
        return GreedyOutcome {
            selection,
            warning: Some(PartialCoverageWarning { uncovered: n_targets - covered, total_targets: n_targets }),
        };
    }

    let mut rng = make_rng(cfg.seed);
    let selection = two_opt(matrix, selection, &mut rng);

    GreedyOutcome { selection, warning: None }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::combin::Combinations;

    fn sample_matrix() -> CoverageMatrix {
        let candidates: Vec<Vec<usize>> = Combinations::new(7, 4).collect();
        let targets: Vec<Vec<usize>> = Combinations::new(7, 5).collect();
        CoverageMatrix::build(&candidates, &targets, 3)
    }

    #[test]
    fn greedy_achieves_full_coverage_on_small_instance() {
        let matrix = sample_matrix();
        let cfg = GreedyConfig { beam_width: 1, seed: Some(42) };
        let outcome = solve(&matrix, &cfg);
        assert!(outcome.warning.is_none());
        assert!(fully_covers(&matrix, &outcome.selection));
    }

    #[test]
    fn two_opt_never_increases_selection_size() {
        let matrix = sample_matrix();
        let (selection, _) = greedy_phase(&matrix, 1);
        let before = selection.len();
        let mut rng = make_rng(Some(7));
        let after = two_opt(&matrix, selection, &mut rng);
        assert!(after.len() <= before);
        assert!(fully_covers(&matrix, &after));
    }

    #[test]
    fn deterministic_given_fixed_seed() {
        let matrix = sample_matrix();
        let cfg = GreedyConfig { beam_width: 1, seed: Some(123) };
        let a = solve(&matrix, &cfg).selection;
        let b = solve(&matrix, &cfg).selection;
        assert_eq!(a, b);
    }
}
