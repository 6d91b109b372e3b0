//! # foldprep
//!
//! A Rust library and CLI for preparing labeled directory-based
//! datasets for machine-learning experiments.
//!
//! ## Features
//!
//! - **Shuffled folds**: randomly permutes sample-to-directory
//!   mappings, with fold 0 reproducing the unshuffled origin ordering
//! - **Unique k-fold splits**: test sets that are pairwise disjoint
//!   across folds, with the achievable fold count derived from the
//!   train/test ratio
//! - **Reproducible**: all randomness flows from one seeded ChaCha8 RNG
//! - **Copy or move**: non-destructive copies by default, with an
//!   explicit destructive move mode
//!
//! ## Modules
//!
//! - `dataset`: label files, shuffling, disjoint test allocation, fold
//!   planning and materialization
//! - `utils`: errors, logging, and progress reporting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use foldprep::{run_unique, NoProgress, SplitConfig};
//!
//! let config = SplitConfig::new(5, 0.8)?.with_seed(42);
//! let summary = run_unique(
//!     "data/birdsong".as_ref(),
//!     "output/folds".as_ref(),
//!     &config,
//!     &mut NoProgress,
//! )?;
//! println!("created {} folds", summary.fold_count);
//! ```

pub mod dataset;
pub mod utils;

// Re-export commonly used items for convenience
pub use dataset::allocator::{clamp_fold_count, max_disjoint_folds, DisjointTestPlan};
pub use dataset::fold::{materialize, FoldPlan, Relocation, Subtree};
pub use dataset::folder::{
    run_baseline, run_unique, FoldSummary, RunSummary, SplitConfig, DEFAULT_SEED,
    DEFAULT_TRAIN_FRACTION, SUMMARY_FILE,
};
pub use dataset::labels::{read_labels, write_labels, LabelSet, Sample, LABEL_FILE};
pub use dataset::relocate::RelocateMode;
pub use dataset::FOLD_PREFIX;
pub use utils::error::{FoldError, Result};
pub use utils::progress::{NoProgress, Progress, ProgressBarSink};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
