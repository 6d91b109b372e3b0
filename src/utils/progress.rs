//! Progress reporting for relocation batches.
//!
//! The core never draws to a terminal itself; it drives a [`Progress`]
//! sink during each batch of directory relocations. Callers that want
//! user feedback inject [`ProgressBarSink`]; library callers and tests
//! use [`NoProgress`].

use indicatif::{ProgressBar, ProgressStyle};

/// Observational sink for relocation progress. Has no effect on
/// control flow: a failing relocation aborts the run regardless of
/// what the sink does with the events.
pub trait Progress {
    /// Called once at the start of a batch with the number of entries.
    fn begin(&mut self, total: u64);

    /// Called after each completed relocation.
    fn advance(&mut self, n: u64);

    /// Called once when the batch finishes.
    fn complete(&mut self);
}

/// Sink that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn begin(&mut self, _total: u64) {}
    fn advance(&mut self, _n: u64) {}
    fn complete(&mut self) {}
}

/// Terminal progress bar backed by indicatif.
#[derive(Default)]
pub struct ProgressBarSink {
    bar: Option<ProgressBar>,
}

impl ProgressBarSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for ProgressBarSink {
    fn begin(&mut self, total: u64) {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        self.bar = Some(pb);
    }

    fn advance(&mut self, n: u64) {
        if let Some(pb) = &self.bar {
            pb.inc(n);
        }
    }

    fn complete(&mut self) {
        if let Some(pb) = self.bar.take() {
            pb.finish_with_message("Done");
        }
    }
}
