// config.rs Copyright 2018 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::error::{CoverError, CoverResult};

/// Validated input record for a single solve call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveConfig {
    pub m: u32,
    pub n: u32,
    pub k: u32,
    pub j: u32,
    pub s: u32,
    pub t: u32,
    pub samples: Option<Vec<u32>>,
    pub random_select: bool,
    pub seed: Option<u64>,
    pub time_limit: Option<u64>,
    pub workers: Option<usize>,
    pub beam_width: usize,
}

impl Default for SolveConfig {
    fn default() -> Self {
        SolveConfig {
            m: 45,
            n: 7,
            k: 6,
            j: 5,
            s: 5,
            t: 1,
            samples: None,
            random_select: false,
            seed: None,
            time_limit: None,
            workers: None,
            beam_width: 1,
        }
    }
}

impl SolveConfig {
    pub fn validate(&self) -> CoverResult<()> {
        if !(45..=54).contains(&self.m) {
            return Err(CoverError::InvalidParameters(format!("m={} out of range 45..=54", self.m)));
        }
        if !(7..=25).contains(&self.n) {
            return Err(CoverError::InvalidParameters(format!("n={} out of range 7..=25", self.n)));
        }
        if !(4..=7).contains(&self.k) {
            return Err(CoverError::InvalidParameters(format!("k={} out of range 4..=7", self.k)));
        }
        if !(3..=7).contains(&self.s) {
            return Err(CoverError::InvalidParameters(format!("s={} out of range 3..=7", self.s)));
        }
        if !(self.s <= self.j && self.j <= self.k) {
            return Err(CoverError::InvalidParameters(format!(
                "require s <= j <= k, got s={} j={} k={}",
                self.s, self.j, self.k
            )));
        }
        if !(1..=self.j).contains(&self.t) {
            return Err(CoverError::InvalidParameters(format!("t={} out of range 1..={}", self.t, self.j)));
        }
        if self.n > self.m {
            return Err(CoverError::InvalidParameters(format!("n={} exceeds m={}", self.n, self.m)));
        }
        if self.beam_width == 0 {
            return Err(CoverError::InvalidParameters("beam_width must be >= 1".into()));
        }

        match &self.samples {
            Some(values) => {
                if values.len() as u32 != self.n {
                    return Err(CoverError::InvalidParameters(format!(
                        "samples has {} entries, expected n={}",
                        values.len(),
                        self.n
                    )));
                }
                let mut sorted = values.clone();
                sorted.sort_unstable();
                sorted.dedup();
                if sorted.len() != values.len() {
                    return Err(CoverError::InvalidParameters("samples contains duplicates".into()));
                }
                if values.iter().any(|&v| v < 1 || v > self.m) {
                    return Err(CoverError::InvalidParameters(format!(
                        "samples values must be in 1..={}",
                        self.m
                    )));
                }
            }
            None => {
                if !self.random_select {
                    return Err(CoverError::ConfigurationError(
                        "one of `samples` or `random_select` must be given".into(),
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config_with_samples_validates() {
        let mut cfg = SolveConfig::default();
        cfg.samples = Some(vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_samples_and_random_select_is_configuration_error() {
        let cfg = SolveConfig::default();
        match cfg.validate() {
            Err(CoverError::ConfigurationError(_)) => {}
            other => panic!("expected ConfigurationError, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_m_is_invalid_parameters() {
        let mut cfg = SolveConfig::default();
        cfg.m = 10;
        cfg.random_select = true;
        match cfg.validate() {
            Err(CoverError::InvalidParameters(_)) => {}
            other => panic!("expected InvalidParameters, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_samples_rejected() {
        let mut cfg = SolveConfig::default();
        cfg.samples = Some(vec![1, 1, 3, 4, 5, 6, 7]);
        match cfg.validate() {
            Err(CoverError::InvalidParameters(_)) => {}
            other => panic!("expected InvalidParameters, got {:?}", other),
        }
    }
}
