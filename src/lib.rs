// lib.rs Copyright 2018 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

pub mod bitset;
pub mod combin;
pub mod config;
pub mod coverage;
pub mod driver;
pub mod error;
pub mod exact;
pub mod greedy;
pub mod progress;
pub mod pruner;
pub mod result;

pub use config::SolveConfig;
pub use driver::solve;
pub use error::{CoverError, CoverResult, PartialCoverageWarning};
pub use progress::{ProgressEvent, ProgressReporter};
pub use result::SolveOutput;
