//! Shared utilities: errors, logging, and progress reporting.

pub mod error;
pub mod logging;
pub mod progress;

pub use error::{FoldError, Result};
pub use logging::{init_logging, LogConfig};
pub use progress::{NoProgress, Progress, ProgressBarSink};
