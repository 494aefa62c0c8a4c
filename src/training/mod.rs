//! Random forest training.
//!
//! The trainer owns the ensemble loop: every tree draws a bootstrap sample
//! of rows, a [`TreeGrower`] grows it depth-wise with exact greedy
//! variance-reduction splits, and the finished trees are averaged by the
//! ensemble at inference time.
//!
//! Randomness is fully seeded: tree `i` derives its RNG from
//! `params.seed + i`, so training is deterministic regardless of how rayon
//! schedules the per-tree work.

mod grower;
mod metric;
mod params;
mod sampling;
mod trainer;

pub use grower::TreeGrower;
pub use metric::{Mae, Metric, Rmse};
pub use params::RandomForestParams;
pub use sampling::BootstrapSampler;
pub use trainer::{RandomForestTrainer, TrainError};
