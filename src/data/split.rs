//! Train/validation row partitioning.

use rand::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Row indices produced by a train/validation split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    /// Rows assigned to the training subset.
    pub train: Vec<u32>,
    /// Rows assigned to the validation subset.
    pub valid: Vec<u32>,
}

/// Partition `n_rows` rows with an independent Bernoulli draw per row.
///
/// Each row lands in the training subset with probability `train_fraction`.
/// The draw is seeded, so a given `(n_rows, train_fraction, seed)` triple
/// always yields the same partition. Either side may come out empty for
/// small inputs or extreme fractions; callers decide how to handle that.
///
/// # Panics
///
/// Panics if `train_fraction` is not within `[0, 1]`.
pub fn bernoulli_split(n_rows: usize, train_fraction: f32, seed: u64) -> SplitIndices {
    assert!(
        (0.0..=1.0).contains(&train_fraction),
        "train_fraction must be in [0, 1], got {}",
        train_fraction
    );

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut train = Vec::with_capacity((n_rows as f32 * train_fraction) as usize);
    let mut valid = Vec::new();

    for row in 0..n_rows as u32 {
        if rng.gen::<f32>() < train_fraction {
            train.push(row);
        } else {
            valid.push(row);
        }
    }

    SplitIndices { train, valid }
}
