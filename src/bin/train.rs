//! Training binary: fit the forest and write the artifacts.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use priceforest::pipeline::{run_training, TrainConfig};
use priceforest::training::RandomForestParams;

/// Train the house-price random forest and persist its artifacts.
#[derive(Parser)]
#[command(name = "train")]
#[command(version, about, long_about = None)]
struct Args {
    /// Training dataset (CSV with Id, SalePrice, and the feature columns)
    #[arg(long, default_value = "train.csv")]
    train: PathBuf,

    /// Test dataset (CSV with Id and the feature columns)
    #[arg(long, default_value = "test.csv")]
    test: PathBuf,

    /// Output path for the model artifact
    #[arg(long, default_value = "rf_model.bin")]
    model_out: PathBuf,

    /// Output path for the feature-list artifact
    #[arg(long, default_value = "features.bin")]
    features_out: PathBuf,

    /// Number of trees in the ensemble
    #[arg(long, default_value = "500")]
    trees: u32,

    /// Maximum tree depth
    #[arg(long, default_value = "20")]
    max_depth: u32,

    /// Seed for the model's internal randomness (bootstrap draws)
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Probability a row lands in the training subset
    #[arg(long, default_value = "0.8")]
    train_fraction: f32,

    /// Seed for the train/validation split
    #[arg(long, default_value = "42")]
    split_seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "priceforest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = TrainConfig {
        train_path: args.train,
        test_path: args.test,
        model_path: args.model_out,
        features_path: args.features_out,
        params: RandomForestParams {
            n_trees: args.trees,
            max_depth: args.max_depth,
            seed: args.seed,
            ..Default::default()
        },
        train_fraction: args.train_fraction,
        split_seed: args.split_seed,
    };

    let report = run_training(&config)?;

    match report.rmse {
        Some(rmse) => println!("Validation RMSE: {rmse:.2}"),
        None => println!("Validation subset empty; no RMSE computed"),
    }
    println!(
        "Model saved as {} and {}",
        config.model_path.display(),
        config.features_path.display()
    );

    Ok(())
}
