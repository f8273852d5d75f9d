// driver.rs Copyright 2018 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Top-level orchestration: validate, materialise the sample, enumerate
//! candidates/targets, dispatch to the exact or approximate solver, and
//! assemble the result record.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, debug_span, info, instrument};

use crate::combin::{to_values, Combinations};
use crate::config::SolveConfig;
use crate::coverage::CoverageMatrix;
use crate::error::{CoverError, CoverResult};
use crate::exact::{self, ExactConfig};
use crate::greedy::{self, GreedyConfig};
use crate::progress::ProgressReporter;
use crate::pruner;
use crate::result::SolveOutput;

fn default_worker_count() -> usize {
    let cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(0);
    if cores == 0 {
        return 4;
    }
    ((cores as f64) * 1.5).round().max(1.0) as usize
}

fn resolve_worker_count(cfg: &SolveConfig) -> usize {
    match cfg.workers {
        Some(w) if w > 0 => w,
        _ => default_worker_count(),
    }
}

fn materialize_sample(cfg: &SolveConfig) -> CoverResult<Vec<u32>> {
    if let Some(values) = &cfg.samples {
        let mut sorted = values.clone();
        sorted.sort_unstable();
        return Ok(sorted);
    }

    let mut rng: StdRng = match cfg.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let mut pool: Vec<u32> = (1..=cfg.m).collect();
    pool.shuffle(&mut rng);
    let mut chosen: Vec<u32> = pool.into_iter().take(cfg.n as usize).collect();
    chosen.sort_unstable();
    Ok(chosen)
}

/// Runs a complete solve. `reporter` receives the fixed-milestone
/// progress events described in the external interface; pass a fresh
/// `ProgressReporter::new()` with no sinks if progress isn't needed.
#[instrument(skip(cfg, reporter))]
pub fn solve<'a>(cfg: &SolveConfig, reporter: &mut ProgressReporter<'a>) -> CoverResult<SolveOutput> {
    {
        let _span = debug_span!("validation").entered();
        reporter.report(0, "validating parameters");
        cfg.validate()?;
    }

    let sample = materialize_sample(cfg)?;
    debug!(n = sample.len(), "sample materialised");
    reporter.report(5, "sample materialised");

    let n = sample.len();
    let (candidates, targets) = {
        let _span = debug_span!("enumeration", k = cfg.k, j = cfg.j).entered();
        let candidates: Vec<Vec<usize>> = Combinations::new(n, cfg.k as usize).collect();
        let targets: Vec<Vec<usize>> = Combinations::new(n, cfg.j as usize).collect();
        info!(candidates = candidates.len(), targets = targets.len(), "combinatorics enumerated");
        (candidates, targets)
    };
    reporter.report(10, "candidates and targets enumerated");

    let workers = resolve_worker_count(cfg);

    let (combos, warning) = if cfg.s == cfg.j {
        let pruned = {
            let _span = debug_span!("pruning").entered();
            let kept_indices = pruner::prune(&candidates, cfg.s as usize);
            let pruned: Vec<Vec<usize>> = kept_indices.iter().map(|&i| candidates[i].clone()).collect();
            debug!(pruned = pruned.len(), original = candidates.len(), "exact-mode pruning complete");
            pruned
        };
        reporter.report(15, "candidate pruning complete");

        let matrix = {
            let _span = debug_span!("matrix_build").entered();
            let matrix = CoverageMatrix::build(&pruned, &targets, cfg.s as usize);
            debug!(universe_size = matrix.universe_size, "coverage matrix built");
            matrix
        };
        reporter.report(30, "coverage matrix built");

        let selection = {
            let _span = debug_span!("solve", mode = "exact", workers).entered();
            let exact_cfg = ExactConfig { t: cfg.t, time_limit_secs: cfg.time_limit, warm_start: Vec::new() };
            exact::solve(&matrix, &exact_cfg)?
        };
        reporter.report(90, "exact solve complete");

        let combos: Vec<Vec<usize>> = selection.into_iter().map(|i| pruned[i].clone()).collect();
        (combos, None)
    } else {
        let matrix = {
            let _span = debug_span!("matrix_build").entered();
            let matrix = CoverageMatrix::build(&candidates, &targets, cfg.s as usize);
            debug!(universe_size = matrix.universe_size, "coverage matrix built");
            matrix
        };
        reporter.report(30, "coverage matrix built");

        let outcome = {
            let _span = debug_span!("solve", mode = "approximate", beam_width = cfg.beam_width).entered();
            let greedy_cfg = GreedyConfig { beam_width: cfg.beam_width, seed: cfg.seed };
            greedy::solve(&matrix, &greedy_cfg)
        };
        reporter.report(90, "approximate solve complete");

        let combos: Vec<Vec<usize>> =
            outcome.selection.into_iter().map(|i| candidates[i].clone()).collect();
        (combos, outcome.warning)
    };

    if let Some(w) = &warning {
        reporter.report(95, format!("partial coverage: {}/{} targets uncovered", w.uncovered, w.total_targets));
    } else {
        reporter.report(95, "post-processing");
    }

    let combos_values: Vec<Vec<u32>> = combos.iter().map(|c| to_values(&sample, c)).collect();

    let output = SolveOutput {
        m: cfg.m,
        n: cfg.n,
        k: cfg.k,
        j: cfg.j,
        s: cfg.s,
        t: cfg.t,
        samples: sample,
        combos: combos_values,
        execution_time: (reporter.elapsed_secs() * 1000.0).round() / 1000.0,
        workers,
    };

    reporter.report(100, "done");
    Ok(output)
}

#[cfg(test)]
mod test {
    use super::*;

    fn base_config() -> SolveConfig {
        SolveConfig {
            m: 45,
            n: 7,
            k: 4,
            j: 4,
            s: 4,
            t: 1,
            samples: Some(vec![1, 2, 3, 4, 5, 6, 7]),
            random_select: false,
            seed: Some(1),
            time_limit: Some(5),
            workers: Some(1),
            beam_width: 1,
        }
    }

    #[test]
    fn scenario_s1_all_combos_of_seven_choose_four() {
        let cfg = base_config();
        let mut reporter = ProgressReporter::new();
        let output = solve(&cfg, &mut reporter).unwrap();
        assert_eq!(output.combos.len(), 35);
    }

    #[test]
    fn scenario_s6_infeasible_when_t_too_high() {
        let mut cfg = base_config();
        cfg.t = 2;
        let mut reporter = ProgressReporter::new();
        match solve(&cfg, &mut reporter) {
            Err(CoverError::InfeasibleInstance(_)) => {}
            other => panic!("expected InfeasibleInstance, got {:?}", other.map(|o| o.combos.len())),
        }
    }

    #[test]
    fn approximate_mode_covers_with_fewer_combos_than_exhaustive() {
        let mut cfg = base_config();
        cfg.k = 6;
        cfg.j = 5;
        cfg.s = 3;
        cfg.t = 1;
        let mut reporter = ProgressReporter::new();
        let output = solve(&cfg, &mut reporter).unwrap();
        assert!(!output.combos.is_empty());
        assert!(output.combos.len() < 7);
    }

    #[test]
    fn default_worker_count_is_positive() {
        assert!(default_worker_count() >= 1);
    }
}
