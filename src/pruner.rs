// pruner.rs Copyright 2018 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Equivalence-class collapsing of candidate `k`-combinations for exact
//! mode (`s = j`). Two candidates are equivalent when they contain the
//! same set of `s`-subsets; only the lexicographically smallest
//! candidate in each class is kept.

use std::collections::HashSet;

use crate::combin::Combinations;

/// The sorted tuple of `s`-subsets contained in `combo`, used as an
/// equivalence-class key.
fn signature(combo: &[usize], s: usize) -> Vec<Vec<usize>> {
    let mut sig: Vec<Vec<usize>> = Combinations::new(combo.len(), s)
        .map(|sub| sub.iter().map(|&i| combo[i]).collect())
        .collect();
    sig.sort();
    sig
}

/// Returns the indices (into `candidates`) of the kept representatives,
/// in the same relative order as `candidates` (a subsequence of it).
/// Because `candidates` is itself already in strict lexicographic order,
/// a single forward pass keeping the first occurrence of each signature
/// is sufficient: the first-seen candidate for a signature is always its
/// lexicographically smallest member.
pub fn prune(candidates: &[Vec<usize>], s: usize) -> Vec<usize> {
    let mut seen: HashSet<Vec<Vec<usize>>> = HashSet::new();
    let mut kept = Vec::new();

    for (i, combo) in candidates.iter().enumerate() {
        let sig = signature(combo, s);
        if seen.insert(sig) {
            kept.push(i);
        }
    }

    kept
}
