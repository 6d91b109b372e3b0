//! Disjoint test-set allocation for unique k-fold splits.
//!
//! Each fold's test set consumes a `(1 - p)` fraction of the sample
//! pool, so at most `floor(1 / (1 - p))` folds can have pairwise
//! disjoint test sets of equal size. The allocator draws one global
//! permutation of the pool and hands out consecutive slices of it as
//! test blocks; disjointness holds by construction.

use std::collections::HashSet;

use rand_chacha::ChaCha8Rng;
use tracing::warn;

use crate::dataset::labels::{LabelSet, Sample};
use crate::dataset::shuffle;

/// Maximum number of folds whose equal-sized test sets can be pairwise
/// disjoint at the given train fraction.
pub fn max_disjoint_folds(train_fraction: f64) -> usize {
    (1.0 / (1.0 - train_fraction)).floor() as usize
}

/// Clamps a requested fold count down to the disjoint maximum, warning
/// when the request had to shrink.
pub fn clamp_fold_count(requested: usize, train_fraction: f64) -> usize {
    let max_folds = max_disjoint_folds(train_fraction);
    if requested > max_folds {
        warn!(
            "Cannot build {} folds with fully unique test sets at train fraction {}; \
             using {} folds. Change the train/test ratio to allow more",
            requested, train_fraction, max_folds
        );
        max_folds
    } else {
        requested
    }
}

/// Disjoint test blocks: consecutive slices of one global permutation,
/// one block per achievable fold.
#[derive(Debug, Clone)]
pub struct DisjointTestPlan {
    blocks: Vec<Vec<Sample>>,
    block_size: usize,
}

impl DisjointTestPlan {
    /// Draws one global permutation of `pool` and slices it into
    /// [`max_disjoint_folds`] test blocks of `floor(N * (1 - p))`
    /// samples each. Any remainder past the last block is never used
    /// as test data.
    pub fn draw(pool: &LabelSet, train_fraction: f64, rng: &mut ChaCha8Rng) -> Self {
        let permuted = shuffle::shuffled(pool, rng).into_samples();
        let test_fraction = 1.0 - train_fraction;
        let block_size = (pool.len() as f64 * test_fraction).floor() as usize;

        let blocks = (0..max_disjoint_folds(train_fraction))
            .map(|fold| {
                let start = (fold * block_size).min(permuted.len());
                let end = ((fold + 1) * block_size).min(permuted.len());
                permuted[start..end].to_vec()
            })
            .collect();

        Self { blocks, block_size }
    }

    /// Number of folds the plan can serve.
    pub fn fold_count(&self) -> usize {
        self.blocks.len()
    }

    /// Test-set size per fold.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The test block for one fold, in permutation order.
    pub fn test_block(&self, fold: usize) -> &[Sample] {
        &self.blocks[fold]
    }

    /// Train candidates for one fold: the full pool minus that fold's
    /// test block, in pool order. Removal matches on origin index, so
    /// duplicate label strings cannot remove the wrong sample.
    pub fn train_pool(&self, pool: &LabelSet, fold: usize) -> Vec<Sample> {
        let held_out: HashSet<usize> = self.blocks[fold]
            .iter()
            .map(|s| s.origin_index)
            .collect();

        pool.samples()
            .iter()
            .filter(|s| !held_out.contains(&s.origin_index))
            .cloned()
            .collect()
    }
}
