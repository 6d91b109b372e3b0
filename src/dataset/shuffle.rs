//! Permutation engine: uniformly random reorderings of a label set.
//!
//! Shuffles sample without replacement, so every sample appears exactly
//! once in the output and origin indices travel with their labels. All
//! randomness comes from a caller-supplied seeded RNG for
//! reproducibility.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::dataset::labels::{LabelSet, Sample};

/// Returns a uniformly random permutation of `set`.
pub fn shuffled(set: &LabelSet, rng: &mut ChaCha8Rng) -> LabelSet {
    let mut samples = set.samples().to_vec();
    shuffle_samples(&mut samples, rng);
    LabelSet::from_samples(samples)
}

/// Returns the input ordering unchanged. Fold 0 of a baseline split
/// uses this so one fold exactly reproduces the origin ordering.
pub fn identity(set: &LabelSet) -> LabelSet {
    set.clone()
}

/// Shuffles a sample list in place.
pub fn shuffle_samples(samples: &mut [Sample], rng: &mut ChaCha8Rng) {
    samples.shuffle(rng);
}
