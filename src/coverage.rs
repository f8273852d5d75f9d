// coverage.rs Copyright 2018 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Bitmask-accelerated coverage matrix: which candidate `k`-combinations
//! contain which `s`-subsets, and which `j`-subsets require which
//! `s`-subsets.

use std::collections::HashMap;

use crate::bitset::BitSet;
use crate::combin::Combinations;

/// The union of `s`-subsets referenced by any candidate or target, plus
/// the two packed relation matrices built over it.
pub struct CoverageMatrix {
    pub universe_size: usize,
    pub k_mask: Vec<BitSet>,
    pub j_req: Vec<BitSet>,
}

/// Canonical index for every distinct `s`-subset (in index space,
/// `0..n`) that occurs as a sub-combination of `combo`.
fn s_subset_indices(
    combo: &[usize],
    s: usize,
    index_of: &mut HashMap<Vec<usize>, usize>,
) -> Vec<usize> {
    let mut out = Vec::new();
    for sub in Combinations::new(combo.len(), s) {
        let key: Vec<usize> = sub.iter().map(|&i| combo[i]).collect();
        let next = index_of.len();
        let idx = *index_of.entry(key).or_insert(next);
        out.push(idx);
    }
    out
}

impl CoverageMatrix {
    /// Builds the matrix from candidate `k`-combinations and target
    /// `j`-subsets, both given in index space over a sample of size `n`.
    pub fn build(candidates: &[Vec<usize>], targets: &[Vec<usize>], s: usize) -> Self {
        let mut index_of: HashMap<Vec<usize>, usize> = HashMap::new();

        let candidate_subsets: Vec<Vec<usize>> = candidates
            .iter()
            .map(|c| s_subset_indices(c, s, &mut index_of))
            .collect();
        let target_subsets: Vec<Vec<usize>> = targets
            .iter()
            .map(|t| s_subset_indices(t, s, &mut index_of))
            .collect();

        let universe_size = index_of.len().max(1);

        let k_mask = candidate_subsets
            .into_iter()
            .map(|ids| {
                let mut row = BitSet::new(universe_size);
                for id in ids {
                    row.insert(id);
                }
                row
            })
            .collect();

        let j_req = target_subsets
            .into_iter()
            .map(|ids| {
                let mut row = BitSet::new(universe_size);
                for id in ids {
                    row.insert(id);
                }
                row
            })
            .collect();

        CoverageMatrix { universe_size, k_mask, j_req }
    }

    /// does candidate `i` hit target `l`?
    pub fn hits(&self, candidate: usize, target: usize) -> bool {
        self.k_mask[candidate].intersects(&self.j_req[target])
    }

    /// is target `l` covered by the union of the given candidate indices?
    pub fn selection_covers(&self, selection: &[usize], target: usize) -> bool {
        selection.iter().any(|&i| self.hits(i, target))
    }

    /// number of candidates hitting each target; used to detect an
    /// infeasible instance before handing the model to the exact solver.
    pub fn hitting_candidates(&self, target: usize) -> Vec<usize> {
        (0..self.k_mask.len()).filter(|&i| self.hits(i, target)).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identical_combo_hits_itself() {
        let candidates = vec![vec![0, 1, 2, 3]];
        let targets = vec![vec![0, 1, 2, 3]];
        let m = CoverageMatrix::build(&candidates, &targets, 4);
        assert!(m.hits(0, 0));
    }

    #[test]
    fn disjoint_combos_do_not_hit() {
        let candidates = vec![vec![0, 1, 2]];
        let targets = vec![vec![3, 4, 5]];
        let m = CoverageMatrix::build(&candidates, &targets, 2);
        assert!(!m.hits(0, 0));
    }

    #[test]
    fn partial_overlap_hits_at_required_s() {
        // candidate {0,1,2,3}, target {2,3,4,5}; shared 2-subset {2,3}
        let candidates = vec![vec![0, 1, 2, 3]];
        let targets = vec![vec![2, 3, 4, 5]];
        let m = CoverageMatrix::build(&candidates, &targets, 2);
        assert!(m.hits(0, 0));
    }
}
