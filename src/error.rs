// error.rs Copyright 2018 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Typed failure surface for a single solve call.
#[derive(Error, Debug)]
pub enum CoverError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("instance is infeasible: {0}")]
    InfeasibleInstance(String),

    #[error("solver failed: {0}")]
    SolverFailure(String),

    #[error("configuration error: {0}")]
    ConfigurationError(String),
}

/// Non-fatal warning: approximate mode finished without achieving full
/// coverage. Carried alongside a successful result rather than returned
/// as an `Err`.
#[derive(Debug, Clone)]
pub struct PartialCoverageWarning {
    pub uncovered: usize,
    pub total_targets: usize,
}

pub type CoverResult<T> = Result<T, CoverError>;
