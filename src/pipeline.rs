//! The training run, end to end.
//!
//! Loads the raw CSV datasets, applies the fixed feature contract, imputes
//! missing values with training-set medians, splits train/validation, fits
//! the forest, evaluates RMSE, and persists the two artifacts. Artifacts are
//! written only after a successful fit and evaluation; a failed run leaves
//! nothing behind.

use std::path::PathBuf;

use crate::data::{bernoulli_split, read_csv, CsvError, FrameError};
use crate::io::artifact::{save_feature_list, save_model, SaveError};
use crate::training::{Metric, RandomForestParams, RandomForestTrainer, Rmse, TrainError};

/// Identifier column dropped from both datasets before training.
pub const ID_COLUMN: &str = "Id";

/// Target column of the training dataset.
pub const TARGET: &str = "SalePrice";

/// The fixed feature contract shared by training and serving.
pub const FEATURES: [&str; 5] = [
    "OverallQual",
    "GrLivArea",
    "GarageCars",
    "YearBuilt",
    "TotalBsmtSF",
];

/// Errors that abort a training run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error("column {column} has a missing or non-numeric value at row {row}")]
    NonFiniteTarget { column: String, row: usize },

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Train(#[from] TrainError),

    #[error("failed to write artifact: {0}")]
    Save(#[from] SaveError),
}

/// Configuration of one training run.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Training dataset (must contain `Id`, `SalePrice`, and the features).
    pub train_path: PathBuf,
    /// Test dataset (must contain `Id` and the features).
    pub test_path: PathBuf,
    /// Output path for the model artifact.
    pub model_path: PathBuf,
    /// Output path for the feature-list artifact.
    pub features_path: PathBuf,
    /// Forest hyperparameters.
    pub params: RandomForestParams,
    /// Probability a row lands in the training subset.
    pub train_fraction: f32,
    /// Seed for the train/validation split, independent of the model seed.
    pub split_seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            train_path: "train.csv".into(),
            test_path: "test.csv".into(),
            model_path: "rf_model.bin".into(),
            features_path: "features.bin".into(),
            params: RandomForestParams::default(),
            train_fraction: 0.8,
            split_seed: 42,
        }
    }
}

/// Summary of a completed training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    /// Rows in the training subset.
    pub n_train: usize,
    /// Rows in the validation subset.
    pub n_valid: usize,
    /// Validation RMSE; absent when the validation subset came out empty.
    pub rmse: Option<f64>,
}

/// Execute a full training run.
pub fn run_training(config: &TrainConfig) -> Result<TrainReport, PipelineError> {
    tracing::info!(path = %config.train_path.display(), "loading training dataset");
    let mut train_frame = read_csv(&config.train_path)?;
    tracing::info!(path = %config.test_path.display(), "loading test dataset");
    let mut test_frame = read_csv(&config.test_path)?;

    // The test identifiers are retained for parity with downstream scoring
    // flows, but nothing in this pipeline consumes them yet.
    let test_ids = test_frame.require_column(ID_COLUMN)?.to_vec();
    tracing::debug!(n_test_ids = test_ids.len(), "captured test identifiers");

    train_frame.drop_column(ID_COLUMN);
    test_frame.drop_column(ID_COLUMN);

    // Medians come from the training frame only and are applied to both
    // frames. They are computed before the train/validation split, so
    // validation rows contribute to the statistic; see DESIGN.md.
    for feature in FEATURES {
        let median = train_frame.median(feature)?;
        train_frame.fill_missing(feature, median)?;
        test_frame.fill_missing(feature, median)?;
    }

    let features_matrix = train_frame.to_col_matrix(&FEATURES)?;
    let targets = train_frame.require_column(TARGET)?;

    // Imputation covers the feature columns only. A target that failed to
    // parse would otherwise flow through the grower's sums and turn every
    // leaf mean into NaN, so a hole in the target column is fatal.
    if let Some(row) = targets.iter().position(|t| !t.is_finite()) {
        return Err(PipelineError::NonFiniteTarget {
            column: TARGET.to_string(),
            row,
        });
    }

    let split = bernoulli_split(train_frame.n_rows(), config.train_fraction, config.split_seed);
    tracing::info!(
        n_train = split.train.len(),
        n_valid = split.valid.len(),
        "split train/validation"
    );

    let train_data = features_matrix.select_rows(&split.train);
    let train_targets: Vec<f32> = split.train.iter().map(|&r| targets[r as usize]).collect();

    let trainer = RandomForestTrainer::new(config.params.clone());
    let forest = trainer.train(&train_data, &train_targets)?;

    let rmse = if split.valid.is_empty() {
        tracing::warn!("validation subset is empty; skipping RMSE");
        None
    } else {
        let valid_data = features_matrix.select_rows(&split.valid);
        let valid_targets: Vec<f32> = split.valid.iter().map(|&r| targets[r as usize]).collect();
        let preds = forest.predict_matrix(&valid_data);
        let metric = Rmse;
        let rmse = metric.compute(&preds, &valid_targets);
        tracing::info!("validation {}: {rmse:.2}", metric.name());
        Some(rmse)
    };

    save_model(&config.model_path, &forest)?;
    let feature_names: Vec<String> = FEATURES.iter().map(|&f| f.to_string()).collect();
    save_feature_list(&config.features_path, &feature_names)?;
    tracing::info!(
        model = %config.model_path.display(),
        features = %config.features_path.display(),
        "artifacts written"
    );

    Ok(TrainReport {
        n_train: split.train.len(),
        n_valid: split.valid.len(),
        rmse,
    })
}
