//! Random forest trainer.
//!
//! Coordinates the ensemble loop: one bootstrap sample and one grown tree
//! per round, in parallel across trees via rayon. Tree `i` seeds its RNG
//! with `params.seed + i`, so results do not depend on scheduling.

use rayon::prelude::*;

use crate::data::ColMatrix;
use crate::forest::RandomForest;

use super::grower::TreeGrower;
use super::params::RandomForestParams;
use super::sampling::BootstrapSampler;

/// Errors raised before any tree is grown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrainError {
    #[error("targets length ({targets}) does not match number of rows ({rows})")]
    TargetLenMismatch { rows: usize, targets: usize },

    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    #[error("n_trees must be at least 1")]
    NoTrees,
}

/// Trains a [`RandomForest`] from a column-major feature matrix.
#[derive(Debug, Clone)]
pub struct RandomForestTrainer {
    params: RandomForestParams,
}

impl RandomForestTrainer {
    pub fn new(params: RandomForestParams) -> Self {
        Self { params }
    }

    /// Parameters this trainer was built with.
    pub fn params(&self) -> &RandomForestParams {
        &self.params
    }

    /// Train an ensemble on `data` against `targets`.
    pub fn train(&self, data: &ColMatrix, targets: &[f32]) -> Result<RandomForest, TrainError> {
        if data.n_rows() == 0 {
            return Err(TrainError::EmptyDataset);
        }
        if targets.len() != data.n_rows() {
            return Err(TrainError::TargetLenMismatch {
                rows: data.n_rows(),
                targets: targets.len(),
            });
        }
        if self.params.n_trees == 0 {
            return Err(TrainError::NoTrees);
        }

        tracing::info!(
            n_trees = self.params.n_trees,
            max_depth = self.params.max_depth,
            rows = data.n_rows(),
            features = data.n_cols(),
            "training random forest"
        );

        let sampler = BootstrapSampler::new(data.n_rows() as u32);
        let grower = TreeGrower::new(data, targets, &self.params);

        let trees = (0..self.params.n_trees)
            .into_par_iter()
            .map(|i| {
                let rows = sampler.sample(self.params.seed.wrapping_add(i as u64));
                grower.grow(rows)
            })
            .collect();

        let forest = RandomForest::new(trees, data.n_cols() as u32);
        debug_assert!(forest.validate().is_ok());

        tracing::info!(n_trees = forest.n_trees(), "training complete");
        Ok(forest)
    }
}
