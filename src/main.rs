// main.rs Copyright 2018 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::process::ExitCode;

use clap::Parser;

use covering_select::progress::ProgressReporter;
use covering_select::{CoverError, SolveConfig};

/// Selects a minimum-size family of k-combinations covering every
/// j-subset of a sample under a two-level (s, t) covering rule.
#[derive(Parser, Debug)]
#[command(name = "covering-select")]
struct Cli {
    #[arg(short = 'm', long)]
    m: u32,

    #[arg(short = 'n', long)]
    n: u32,

    #[arg(short = 'k', long)]
    k: u32,

    #[arg(short = 'j', long)]
    j: u32,

    #[arg(short = 's', long)]
    s: u32,

    #[arg(short = 't', long, default_value_t = 1)]
    t: u32,

    /// Comma-separated sample values, e.g. "1,2,3,4,5,6,7"
    #[arg(long)]
    samples: Option<String>,

    #[arg(long)]
    random: bool,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long = "time")]
    time_limit: Option<u64>,

    #[arg(long)]
    workers: Option<usize>,

    #[arg(long, default_value_t = 1)]
    beam: usize,
}

fn parse_samples(raw: &str) -> Result<Vec<u32>, String> {
    raw.split(',')
        .map(|part| part.trim().parse::<u32>().map_err(|e| format!("invalid sample value {:?}: {}", part, e)))
        .collect()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let samples = match &cli.samples {
        Some(raw) => match parse_samples(raw) {
            Ok(values) => Some(values),
            Err(msg) => {
                eprintln!("error: {}", msg);
                return ExitCode::from(1);
            }
        },
        None => None,
    };

    let config = SolveConfig {
        m: cli.m,
        n: cli.n,
        k: cli.k,
        j: cli.j,
        s: cli.s,
        t: cli.t,
        samples,
        random_select: cli.random,
        seed: cli.seed,
        time_limit: cli.time_limit,
        workers: cli.workers,
        beam_width: cli.beam,
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let mut reporter = ProgressReporter::new().with_sink(&mut handle);

    match covering_select::solve(&config, &mut reporter) {
        Ok(output) => {
            match serde_json::to_string(&output) {
                Ok(line) => println!("{}", line),
                Err(e) => {
                    eprintln!("error: failed to serialise result: {}", e);
                    return ExitCode::from(3);
                }
            }
            ExitCode::SUCCESS
        }
        Err(CoverError::InvalidParameters(msg)) | Err(CoverError::ConfigurationError(msg)) => {
            eprintln!("error: {}", msg);
            ExitCode::from(1)
        }
        Err(CoverError::InfeasibleInstance(msg)) | Err(CoverError::SolverFailure(msg)) => {
            eprintln!("error: {}", msg);
            ExitCode::from(2)
        }
    }
}
