//! Fold orchestration: drives complete split runs over a dataset.
//!
//! Two run modes exist. Baseline runs materialize independently
//! shuffled folds whose test sets may overlap across folds; unique runs
//! allocate pairwise disjoint test blocks first and build every fold
//! from them. Both are strictly sequential: one fold finishes all of
//! its filesystem work before the next begins, and the first failure
//! aborts the whole run with no rollback.

use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::dataset::allocator::{self, DisjointTestPlan};
use crate::dataset::fold::{self, FoldPlan};
use crate::dataset::labels::{self, LabelSet};
use crate::dataset::relocate::RelocateMode;
use crate::dataset::shuffle;
use crate::utils::error::{FoldError, Result};
use crate::utils::progress::Progress;

/// Default training fraction when none is given.
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;

/// Default RNG seed for reproducible splits.
pub const DEFAULT_SEED: u64 = 42;

/// Name of the run summary file written into the output directory.
pub const SUMMARY_FILE: &str = "split_info.json";

/// Configuration for a split run.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub fold_count: usize,
    pub train_fraction: f64,
    pub seed: u64,
    pub relocate: RelocateMode,
}

impl SplitConfig {
    /// Creates a validated configuration with the default seed and
    /// copy-based relocation.
    pub fn new(fold_count: usize, train_fraction: f64) -> Result<Self> {
        let config = Self {
            fold_count,
            train_fraction,
            seed: DEFAULT_SEED,
            relocate: RelocateMode::Copy,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_relocate(mut self, relocate: RelocateMode) -> Self {
        self.relocate = relocate;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.fold_count == 0 {
            return Err(FoldError::InvalidFoldCount(self.fold_count));
        }
        if !(self.train_fraction > 0.0 && self.train_fraction < 1.0) {
            return Err(FoldError::InvalidTrainFraction(self.train_fraction));
        }
        if self.relocate.is_destructive() && self.fold_count > 1 {
            return Err(FoldError::InvalidArgument(
                "move-based relocation consumes the origin dataset and supports a single fold only"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-fold sizes recorded in the run summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldSummary {
    pub fold: usize,
    pub train: usize,
    pub test: usize,
}

/// Metadata describing a completed run, written to
/// [`SUMMARY_FILE`] in the output directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: String,
    pub fold_count: usize,
    pub train_fraction: f64,
    pub seed: u64,
    pub total_samples: usize,
    pub folds: Vec<FoldSummary>,
}

/// Runs `fold_count` independently shuffled folds.
///
/// Fold 0 keeps the origin ordering; every later fold gets a fresh
/// shuffle. Test sets are not disjoint across folds in this mode — it
/// is the cheaper, statistically biased variant.
pub fn run_baseline(
    origin_dir: &Path,
    out_dir: &Path,
    config: &SplitConfig,
    progress: &mut dyn Progress,
) -> Result<RunSummary> {
    config.validate()?;
    let origin = load_origin(origin_dir, config)?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut folds = Vec::with_capacity(config.fold_count);

    for fold_number in 0..config.fold_count {
        info!("Creating fold {}", fold_number);

        let ordering = if fold_number == 0 {
            shuffle::identity(&origin)
        } else {
            shuffle::shuffled(&origin, &mut rng)
        };

        let plan = FoldPlan::baseline(fold_number, ordering, config.train_fraction);
        fold::materialize(&plan, origin_dir, out_dir, config.relocate, progress)?;

        folds.push(FoldSummary {
            fold: fold_number,
            train: plan.train().len(),
            test: plan.test().len(),
        });
    }

    finish_run("baseline", config.fold_count, &origin, config, folds, out_dir)
}

/// Runs folds whose test sets are pairwise disjoint.
///
/// The requested fold count is clamped down to the achievable maximum
/// `floor(1 / (1 - p))` when necessary. One global permutation supplies
/// every fold's test block; each fold's train set is the complement,
/// independently reshuffled.
pub fn run_unique(
    origin_dir: &Path,
    out_dir: &Path,
    config: &SplitConfig,
    progress: &mut dyn Progress,
) -> Result<RunSummary> {
    config.validate()?;
    let origin = load_origin(origin_dir, config)?;

    let fold_count = allocator::clamp_fold_count(config.fold_count, config.train_fraction);
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let plan = DisjointTestPlan::draw(&origin, config.train_fraction, &mut rng);

    let mut folds = Vec::with_capacity(fold_count);

    for fold_number in 0..fold_count {
        info!("Creating fold {}", fold_number);

        let mut train = plan.train_pool(&origin, fold_number);
        shuffle::shuffle_samples(&mut train, &mut rng);
        let test = plan.test_block(fold_number).to_vec();

        let fold_plan = FoldPlan::unique(fold_number, train, test);
        fold::materialize(&fold_plan, origin_dir, out_dir, config.relocate, progress)?;

        folds.push(FoldSummary {
            fold: fold_number,
            train: fold_plan.train().len(),
            test: fold_plan.test().len(),
        });
    }

    finish_run("unique", fold_count, &origin, config, folds, out_dir)
}

fn load_origin(origin_dir: &Path, config: &SplitConfig) -> Result<LabelSet> {
    if config.relocate.is_destructive() {
        warn!(
            "Move-based relocation consumes '{}'; a failure mid-run leaves origin and output \
             both partially populated",
            origin_dir.display()
        );
    }

    let origin = labels::read_labels(origin_dir)?;
    if origin.is_empty() {
        warn!(
            "Label file in '{}' is empty; folds will contain no samples",
            origin_dir.display()
        );
    }
    Ok(origin)
}

fn finish_run(
    mode: &str,
    fold_count: usize,
    origin: &LabelSet,
    config: &SplitConfig,
    folds: Vec<FoldSummary>,
    out_dir: &Path,
) -> Result<RunSummary> {
    let summary = RunSummary {
        mode: mode.to_string(),
        fold_count,
        train_fraction: config.train_fraction,
        seed: config.seed,
        total_samples: origin.len(),
        folds,
    };

    fs::create_dir_all(out_dir)?;
    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(out_dir.join(SUMMARY_FILE), json)?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::labels::{read_labels, LABEL_FILE};
    use crate::utils::progress::NoProgress;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn make_origin(dir: &Path, names: &[&str]) {
        let set = LabelSet::from_labels(names.iter().copied());
        labels::write_labels(set.samples(), dir).unwrap();

        for (index, name) in names.iter().enumerate() {
            let sample_dir = dir.join(index.to_string());
            fs::create_dir_all(&sample_dir).unwrap();
            fs::write(sample_dir.join("sample.dat"), format!("{}#{}", name, index)).unwrap();
        }
    }

    fn fold_labels(fold_dir: &Path, subtree: &str) -> Vec<String> {
        read_labels(&fold_dir.join(subtree))
            .unwrap()
            .labels()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_config_rejects_zero_folds() {
        let err = SplitConfig::new(0, 0.8).unwrap_err();
        assert!(matches!(err, FoldError::InvalidFoldCount(0)));
    }

    #[test]
    fn test_config_rejects_bad_fractions() {
        for fraction in [0.0, 1.0, -0.5, 1.5] {
            let err = SplitConfig::new(3, fraction).unwrap_err();
            assert!(matches!(err, FoldError::InvalidTrainFraction(_)));
        }
    }

    #[test]
    fn test_config_rejects_move_with_multiple_folds() {
        let config = SplitConfig::new(2, 0.8)
            .unwrap()
            .with_relocate(RelocateMode::Move);
        let temp = TempDir::new().unwrap();
        let err = run_baseline(temp.path(), temp.path(), &config, &mut NoProgress).unwrap_err();
        assert!(matches!(err, FoldError::InvalidArgument(_)));
    }

    #[test]
    fn test_missing_label_file_aborts_before_any_output() {
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("origin");
        let out = temp.path().join("out");
        fs::create_dir_all(&origin).unwrap();

        let config = SplitConfig::new(2, 0.8).unwrap();
        let err = run_baseline(&origin, &out, &config, &mut NoProgress).unwrap_err();

        assert!(matches!(err, FoldError::MissingLabelFile(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_baseline_run_end_to_end() {
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("origin");
        let out = temp.path().join("out");
        let names = ["cat", "dog", "cat", "bird", "fish"];
        make_origin(&origin, &names);

        let config = SplitConfig::new(2, 0.6).unwrap();
        let summary = run_baseline(&origin, &out, &config, &mut NoProgress).unwrap();

        assert_eq!(summary.fold_count, 2);
        assert_eq!(summary.total_samples, 5);
        for fold in &summary.folds {
            assert_eq!(fold.train + fold.test, 5);
            assert_eq!(fold.train, 3);
        }

        // Fold 0 reproduces the origin ordering exactly.
        let fold_0 = out.join("fold_0");
        assert_eq!(fold_labels(&fold_0, "train"), vec!["cat", "dog", "cat"]);
        assert_eq!(fold_labels(&fold_0, "test"), vec!["bird", "fish"]);

        // Every fold holds the full label multiset across train + test.
        for fold in 0..2 {
            let fold_dir = out.join(format!("fold_{}", fold));
            let mut combined = fold_labels(&fold_dir, "train");
            combined.extend(fold_labels(&fold_dir, "test"));
            combined.sort();

            let mut expected: Vec<String> = names.iter().map(|s| s.to_string()).collect();
            expected.sort();
            assert_eq!(combined, expected);
        }

        // Summary file round-trips.
        let json = fs::read_to_string(out.join(SUMMARY_FILE)).unwrap();
        let parsed: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.mode, "baseline");
        assert_eq!(parsed.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_baseline_same_seed_is_reproducible() {
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("origin");
        make_origin(&origin, &["a", "b", "c", "d", "e", "f"]);

        let config = SplitConfig::new(3, 0.5).unwrap().with_seed(7);
        let out_a = temp.path().join("out_a");
        let out_b = temp.path().join("out_b");

        run_baseline(&origin, &out_a, &config, &mut NoProgress).unwrap();
        run_baseline(&origin, &out_b, &config, &mut NoProgress).unwrap();

        for fold in 0..3 {
            let fold_name = format!("fold_{}", fold);
            let a = fs::read_to_string(out_a.join(&fold_name).join(LABEL_FILE)).unwrap();
            let b = fs::read_to_string(out_b.join(&fold_name).join(LABEL_FILE)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_unique_run_clamps_and_produces_disjoint_tests() {
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("origin");
        let out = temp.path().join("out");
        make_origin(&origin, &["cat", "dog", "cat", "bird"]);

        // p = 0.5 allows at most 2 disjoint folds; requesting 5 clamps.
        let config = SplitConfig::new(5, 0.5).unwrap();
        let summary = run_unique(&origin, &out, &config, &mut NoProgress).unwrap();

        assert_eq!(summary.fold_count, 2);
        assert!(!out.join("fold_2").exists());

        // The two test blocks partition the pool into halves of 2.
        assert_eq!(fold_labels(&out.join("fold_0"), "test").len(), 2);
        assert_eq!(fold_labels(&out.join("fold_1"), "test").len(), 2);

        // Disjoint by directory content: no origin sample lands in two
        // test subtrees, even with duplicate label strings.
        let mut seen = HashSet::new();
        for fold in 0..2 {
            let test_dir = out.join(format!("fold_{}", fold)).join("test");
            for entry in fs::read_dir(&test_dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    let content = fs::read_to_string(path.join("sample.dat")).unwrap();
                    assert!(seen.insert(content), "test sample reused across folds");
                }
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_unique_run_test_dirs_continue_numbering() {
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("origin");
        let out = temp.path().join("out");
        make_origin(&origin, &["a", "b", "c", "d", "e", "f"]);

        // N=6, p=0.5: block size 3, train 3, test dirs 3..6.
        let config = SplitConfig::new(2, 0.5).unwrap();
        run_unique(&origin, &out, &config, &mut NoProgress).unwrap();

        for fold in 0..2 {
            let test_dir = out.join(format!("fold_{}", fold)).join("test");
            for index in 3..6 {
                assert!(test_dir.join(index.to_string()).is_dir());
            }
            assert!(!test_dir.join("0").exists());
        }
    }

    #[test]
    fn test_unique_fold_holds_full_multiset() {
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("origin");
        let out = temp.path().join("out");
        let names = ["cat", "dog", "cat", "bird", "fish", "dog"];
        make_origin(&origin, &names);

        let config = SplitConfig::new(3, 0.66).unwrap();
        let summary = run_unique(&origin, &out, &config, &mut NoProgress).unwrap();

        for fold in &summary.folds {
            let fold_dir = out.join(format!("fold_{}", fold.fold));
            let mut combined = fold_labels(&fold_dir, "train");
            combined.extend(fold_labels(&fold_dir, "test"));
            combined.sort();

            let mut expected: Vec<String> = names.iter().map(|s| s.to_string()).collect();
            expected.sort();
            assert_eq!(combined, expected);
        }
    }

    #[test]
    fn test_second_run_into_same_output_conflicts() {
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("origin");
        let out = temp.path().join("out");
        make_origin(&origin, &["a", "b"]);

        let config = SplitConfig::new(1, 0.5).unwrap();
        run_baseline(&origin, &out, &config, &mut NoProgress).unwrap();

        let err = run_baseline(&origin, &out, &config, &mut NoProgress).unwrap_err();
        assert!(matches!(err, FoldError::DestinationConflict(_)));
    }
}
