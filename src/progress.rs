// progress.rs Copyright 2018 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-milestone progress reporting. Unlike a rate-adaptive progress
//! bar, a solve has a small number of well-defined phases, so percentages
//! are emitted at known points rather than computed from a throughput
//! estimate.

use std::io::Write;
use std::time::Instant;

use serde::Serialize;

#[derive(Serialize, Clone, Debug)]
pub struct ProgressEvent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub percent: u8,
    pub message: String,
    pub elapsed_time: f64,
}

pub type ProgressCallback<'a> = Box<dyn FnMut(&ProgressEvent) + 'a>;

/// Emits progress events to an optional in-process callback and an
/// optional line-oriented text sink. A write failure on the text sink is
/// swallowed: progress reporting never aborts a solve.
pub struct ProgressReporter<'a> {
    start_time: Instant,
    callback: Option<ProgressCallback<'a>>,
    sink: Option<&'a mut dyn Write>,
    last_percent: u8,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        ProgressReporter { start_time: Instant::now(), callback: None, sink: None, last_percent: 0 }
    }

    pub fn with_callback(mut self, callback: ProgressCallback<'a>) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn with_sink(mut self, sink: &'a mut dyn Write) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Emits a milestone. `percent` must be monotonically non-decreasing
    /// within one solve; out-of-order calls are clamped up to the last
    /// reported value rather than rejected.
    pub fn report(&mut self, percent: u8, message: impl Into<String>) {
        let percent = percent.max(self.last_percent);
        self.last_percent = percent;

        let event = ProgressEvent {
            kind: "progress",
            percent,
            message: message.into(),
            elapsed_time: self.start_time.elapsed().as_secs_f64(),
        };

        if let Some(cb) = self.callback.as_mut() {
            cb(&event);
        }

        if let Some(sink) = self.sink.as_mut() {
            if let Ok(line) = serde_json::to_string(&event) {
                let _ = writeln!(sink, "{}", line);
            }
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}

impl<'a> Default for ProgressReporter<'a> {
    fn default() -> Self {
        Self::new()
    }
}
