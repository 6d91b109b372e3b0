//! Dataset fold preparation.
//!
//! This module provides functionality for:
//! - Reading and writing directory-dataset label files
//! - Uniformly shuffling sample-to-directory mappings
//! - Allocating pairwise disjoint test sets for unique k-fold splits
//! - Planning and materializing train/test folds on disk
//!
//! ## Dataset layout
//!
//! An origin dataset is a directory holding `Labels.txt` (one label per
//! line) plus one numbered subdirectory per line. A split run produces
//! `<out_dir>/fold_<n>/{train,test}/<new_index>/` subtrees, each with
//! its own `Labels.txt`, plus a fold-root `Labels.txt` and a run
//! summary `split_info.json`.

pub mod allocator;
pub mod fold;
pub mod folder;
pub mod labels;
pub mod relocate;
pub mod shuffle;

// Re-export main types for convenience
pub use allocator::{clamp_fold_count, max_disjoint_folds, DisjointTestPlan};
pub use fold::{materialize, FoldPlan, Relocation, Subtree};
pub use folder::{
    run_baseline, run_unique, FoldSummary, RunSummary, SplitConfig, DEFAULT_SEED,
    DEFAULT_TRAIN_FRACTION, SUMMARY_FILE,
};
pub use labels::{read_labels, write_labels, LabelSet, Sample, LABEL_FILE};
pub use relocate::{relocate_tree, RelocateMode};

/// Directory-name prefix for fold output (`fold_0`, `fold_1`, ...).
pub const FOLD_PREFIX: &str = "fold_";
