// result.rs Copyright 2018 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct SolveOutput {
    pub m: u32,
    pub n: u32,
    pub k: u32,
    pub j: u32,
    pub s: u32,
    pub t: u32,
    pub samples: Vec<u32>,
    pub combos: Vec<Vec<u32>>,
    pub execution_time: f64,
    pub workers: usize,
}
