//! Fold construction: index remapping and on-disk materialization.
//!
//! A [`FoldPlan`] fixes the full old-index to new-index mapping for one
//! fold before anything touches the filesystem. Materializing the plan
//! relocates each sample directory into its `train/` or `test/` slot
//! and writes the label files that define the new index-to-label
//! mapping.

use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::labels::{self, LabelSet, Sample};
use crate::dataset::relocate::{self, RelocateMode};
use crate::dataset::FOLD_PREFIX;
use crate::utils::error::Result;
use crate::utils::progress::Progress;

/// Destination subtree of a relocated sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subtree {
    Train,
    Test,
}

impl Subtree {
    pub fn dir_name(self) -> &'static str {
        match self {
            Subtree::Train => "train",
            Subtree::Test => "test",
        }
    }
}

/// One planned relocation: which origin directory index moves to which
/// destination index, under which subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub origin_index: usize,
    pub dest_index: usize,
    pub subtree: Subtree,
}

impl Relocation {
    /// Source directory inside the origin dataset.
    pub fn source_path(&self, origin_dir: &Path) -> PathBuf {
        origin_dir.join(self.origin_index.to_string())
    }

    /// Destination directory inside the fold output.
    pub fn dest_path(&self, fold_dir: &Path) -> PathBuf {
        fold_dir
            .join(self.subtree.dir_name())
            .join(self.dest_index.to_string())
    }
}

/// Fully determined relocation plan for one fold.
///
/// `train` and `test` are ordered: a sample's position is its new index
/// within its subtree. Test indices start at `test_offset` — 0 in
/// baseline folds, `train.len()` in unique folds, where the directory
/// numbering continues across the subtree boundary.
#[derive(Debug, Clone)]
pub struct FoldPlan {
    fold_number: usize,
    train: Vec<Sample>,
    test: Vec<Sample>,
    test_offset: usize,
}

impl FoldPlan {
    /// Baseline fold: splits an ordering at `floor(N * train_fraction)`.
    /// Test directory numbering restarts at 0.
    pub fn baseline(fold_number: usize, ordering: LabelSet, train_fraction: f64) -> Self {
        let mut train = ordering.into_samples();
        let train_length = (train.len() as f64 * train_fraction).floor() as usize;
        let test = train.split_off(train_length);

        Self {
            fold_number,
            train,
            test,
            test_offset: 0,
        }
    }

    /// Unique fold: train and test orderings come from the disjoint
    /// allocator. Test directory numbering continues at `train.len()`.
    pub fn unique(fold_number: usize, train: Vec<Sample>, test: Vec<Sample>) -> Self {
        let test_offset = train.len();
        Self {
            fold_number,
            train,
            test,
            test_offset,
        }
    }

    pub fn fold_number(&self) -> usize {
        self.fold_number
    }

    pub fn train(&self) -> &[Sample] {
        &self.train
    }

    pub fn test(&self) -> &[Sample] {
        &self.test
    }

    pub fn test_offset(&self) -> usize {
        self.test_offset
    }

    /// Total samples in the fold.
    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.train.is_empty() && self.test.is_empty()
    }

    /// The fold's working ordering: train samples then test samples.
    /// This is what the fold-root label file records.
    pub fn ordering(&self) -> impl Iterator<Item = &Sample> {
        self.train.iter().chain(self.test.iter())
    }

    /// Relocation entries for one subtree, in execution order.
    pub fn subtree_relocations(&self, subtree: Subtree) -> Vec<Relocation> {
        let (samples, offset) = match subtree {
            Subtree::Train => (&self.train, 0),
            Subtree::Test => (&self.test, self.test_offset),
        };

        samples
            .iter()
            .enumerate()
            .map(|(index, sample)| Relocation {
                origin_index: sample.origin_index,
                dest_index: offset + index,
                subtree,
            })
            .collect()
    }

    /// All relocation entries: the train subtree first, then test.
    pub fn relocations(&self) -> Vec<Relocation> {
        let mut entries = self.subtree_relocations(Subtree::Train);
        entries.extend(self.subtree_relocations(Subtree::Test));
        entries
    }

    /// Output directory for this fold under `out_dir`.
    pub fn fold_dir(&self, out_dir: &Path) -> PathBuf {
        out_dir.join(format!("{}{}", FOLD_PREFIX, self.fold_number))
    }
}

/// Materializes one fold on disk under `out_dir/fold_<n>`.
///
/// Relocates every sample directory into its subtree slot and writes
/// the fold-root label file plus one label file per subtree. Each
/// subtree is one progress batch. Any relocation failure aborts
/// immediately; already-relocated directories are not rolled back.
pub fn materialize(
    plan: &FoldPlan,
    origin_dir: &Path,
    out_dir: &Path,
    mode: RelocateMode,
    progress: &mut dyn Progress,
) -> Result<PathBuf> {
    let fold_dir = plan.fold_dir(out_dir);
    fs::create_dir_all(&fold_dir)?;

    labels::write_labels(plan.ordering(), &fold_dir)?;

    relocate_batch(plan, Subtree::Train, origin_dir, &fold_dir, mode, progress)?;
    labels::write_labels(plan.train(), &fold_dir.join(Subtree::Train.dir_name()))?;

    relocate_batch(plan, Subtree::Test, origin_dir, &fold_dir, mode, progress)?;
    labels::write_labels(plan.test(), &fold_dir.join(Subtree::Test.dir_name()))?;

    Ok(fold_dir)
}

fn relocate_batch(
    plan: &FoldPlan,
    subtree: Subtree,
    origin_dir: &Path,
    fold_dir: &Path,
    mode: RelocateMode,
    progress: &mut dyn Progress,
) -> Result<()> {
    let entries = plan.subtree_relocations(subtree);
    fs::create_dir_all(fold_dir.join(subtree.dir_name()))?;

    progress.begin(entries.len() as u64);
    for entry in &entries {
        relocate::relocate_tree(
            &entry.source_path(origin_dir),
            &entry.dest_path(fold_dir),
            mode,
        )?;
        progress.advance(1);
    }
    progress.complete();

    Ok(())
}
