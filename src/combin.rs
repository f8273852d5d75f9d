// combin.rs Copyright 2018 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Lexicographic generation of fixed-size combinations over `0..n`.
//!
//! Candidates and targets are generated in index space (`0..n`) and
//! mapped into sample-value space by the caller; this keeps the
//! enumeration itself free of any knowledge of the working sample.

/// Iterates every `r`-combination of `0..n` in strict lexicographic
/// order by repeatedly advancing the rightmost incrementable index and
/// resetting the suffix that follows it.
pub struct Combinations {
    n: usize,
    r: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, r: usize) -> Self {
        if r == 0 || r > n {
            return Combinations { n, r, indices: Vec::new(), done: r > n };
        }
        Combinations { n, r, indices: (0..r).collect(), done: false }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.r == 0 {
            self.done = true;
            return Some(Vec::new());
        }

        let current = self.indices.clone();

        // find the rightmost index that can still be incremented
        let mut i = self.r;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] != i + self.n - self.r {
                self.indices[i] += 1;
                for j in i + 1..self.r {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }

        Some(current)
    }
}

/// Number of `r`-combinations of an `n`-element set.
pub fn n_choose_r(n: usize, r: usize) -> u64 {
    if r > n {
        return 0;
    }
    let r = r.min(n - r);
    let mut result: u64 = 1;
    for i in 0..r {
        result = result * (n - i) as u64 / (i + 1) as u64;
    }
    result
}

/// Maps an index-space combination into sample-value space, preserving order.
pub fn to_values(sample: &[u32], indices: &[usize]) -> Vec<u32> {
    indices.iter().map(|&i| sample[i]).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counts_match_formula() {
        for n in 1..8 {
            for r in 0..=n {
                let count = Combinations::new(n, r).count() as u64;
                assert_eq!(count, n_choose_r(n, r), "n={} r={}", n, r);
            }
        }
    }

    #[test]
    fn strictly_increasing_and_lexicographic() {
        let all: Vec<Vec<usize>> = Combinations::new(5, 3).collect();
        let mut sorted = all.clone();
        sorted.sort();
        assert_eq!(all, sorted);
        for combo in &all {
            for w in combo.windows(2) {
                assert!(w[0] < w[1]);
            }
        }
    }

    #[test]
    fn r_zero_yields_single_empty_combo() {
        let all: Vec<Vec<usize>> = Combinations::new(4, 0).collect();
        assert_eq!(all, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn r_greater_than_n_yields_nothing() {
        let all: Vec<Vec<usize>> = Combinations::new(3, 5).collect();
        assert!(all.is_empty());
    }
}
