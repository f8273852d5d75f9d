// exact.rs Copyright 2018 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Exact solver for the `s = j` case: a 0/1 minimisation over candidate
//! `k`-combinations, solved as an integer program.
//!
//! The `microlp` backend behind `good_lp` here is a single-threaded
//! branch-and-bound solver with no worker-count knob, so unlike the
//! wall-clock limit, `workers` is not something this solver can honour
//! (see DESIGN.md's Open Question decisions).

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use good_lp::{default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel};

use crate::coverage::CoverageMatrix;
use crate::error::{CoverError, CoverResult};

/// Small objective-coefficient bias applied to hinted candidates. Too
/// small to change which *count* of combinations is optimal, large
/// enough to break ties in favour of the hint.
const WARM_START_EPSILON: f64 = 1e-6;

const DEFAULT_TIME_LIMIT_SECS: u64 = 30;

pub struct ExactConfig {
    pub t: u32,
    pub time_limit_secs: Option<u64>,
    pub warm_start: Vec<usize>,
}

/// Runs the exact 0/1 minimisation over `matrix`'s candidates against its
/// targets, with threshold `t`, symmetry-breaking over the given
/// (already pruned) candidate order, and an optional warm-start hint.
///
/// Returns the indices (into `matrix.k_mask`, i.e. into the pruned
/// candidate list) making up the optimal selection.
pub fn solve(matrix: &CoverageMatrix, cfg: &ExactConfig) -> CoverResult<Vec<usize>> {
    let n_candidates = matrix.k_mask.len();
    let n_targets = matrix.j_req.len();

    for target in 0..n_targets {
        if matrix.hitting_candidates(target).is_empty() {
            return Err(CoverError::InfeasibleInstance(format!(
                "target {} has no candidate sharing an s-subset with it",
                target
            )));
        }
    }

    let mut vars = ProblemVariables::new();
    let x: Vec<_> = (0..n_candidates).map(|_| vars.add(variable().binary())).collect();

    let mut objective = Expression::with_capacity(n_candidates);
    for (i, xi) in x.iter().enumerate() {
        let coeff = if cfg.warm_start.contains(&i) { 1.0 - WARM_START_EPSILON } else { 1.0 };
        objective.add_mul(coeff, *xi);
    }

    let mut model = vars.minimise(objective).using(default_solver);

    for target in 0..n_targets {
        let hitters = matrix.hitting_candidates(target);
        let mut constraint = Expression::with_capacity(hitters.len());
        for i in hitters {
            constraint.add_mul(1.0, x[i]);
        }
        model = model.with(constraint.geq(cfg.t as f64));
    }

    // symmetry breaking over the (pruned) lexicographic candidate order:
    // x_{i-1} >= x_i forces a canonical representative among solutions
    // that only differ by permuting equivalent candidates.
    for i in 1..n_candidates {
        model = model.with((x[i - 1] - x[i]).geq(0.0));
    }

    // microlp has no cooperative cancellation, so the time limit is enforced
    // by running the solve on its own thread and not waiting past the
    // deadline for it to report back.
    let time_limit = Duration::from_secs(cfg.time_limit_secs.unwrap_or(DEFAULT_TIME_LIMIT_SECS));
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(model.solve());
    });

    let resolved = match rx.recv_timeout(time_limit) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            return Err(CoverError::SolverFailure(format!(
                "exact solver exceeded the {}s time limit",
                time_limit.as_secs()
            )));
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            return Err(CoverError::SolverFailure("solver thread terminated without a result".into()));
        }
    };

    match resolved {
        Ok(solution) => {
            let selected: Vec<usize> =
                (0..n_candidates).filter(|&i| solution.value(x[i]) >= 0.5).collect();
            Ok(selected)
        }
        Err(ResolutionError::Infeasible) => {
            Err(CoverError::InfeasibleInstance("solver proved the model infeasible".into()))
        }
        Err(e) => Err(CoverError::SolverFailure(format!("{:?}", e))),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::combin::Combinations;

    #[test]
    fn small_instance_is_solved() {
        // n=5, k=3, j=s=3: every 3-subset must be hit by >=1 identical
        // candidate, so the only feasible answer is "select every 3-subset".
        let candidates: Vec<Vec<usize>> = Combinations::new(5, 3).collect();
        let targets = candidates.clone();
        let matrix = CoverageMatrix::build(&candidates, &targets, 3);

        let cfg = ExactConfig { t: 1, time_limit_secs: Some(5), warm_start: Vec::new() };
        let selection = solve(&matrix, &cfg).unwrap();
        assert_eq!(selection.len(), candidates.len());
    }

    #[test]
    fn infeasible_target_detected_before_solving() {
        let candidates: Vec<Vec<usize>> = vec![vec![0, 1, 2]];
        let targets: Vec<Vec<usize>> = vec![vec![3, 4, 5]];
        let matrix = CoverageMatrix::build(&candidates, &targets, 3);

        let cfg = ExactConfig { t: 1, time_limit_secs: Some(5), warm_start: Vec::new() };
        match solve(&matrix, &cfg) {
            Err(CoverError::InfeasibleInstance(_)) => {}
            other => panic!("expected InfeasibleInstance, got {:?}", other),
        }
    }
}
