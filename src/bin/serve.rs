//! Serving binary: load the artifacts and expose the HTTP API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use priceforest::server::{self, AppState, ServerConfig};

/// Serve single-record predictions from a trained model.
#[derive(Parser)]
#[command(name = "serve")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the model artifact
    #[arg(long, default_value = "rf_model.bin")]
    model: PathBuf,

    /// Path to the feature-list artifact
    #[arg(long, default_value = "features.bin")]
    features: PathBuf,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value = "8000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "priceforest=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Startup is the only place artifacts are touched; a missing or corrupt
    // file means the process never becomes ready to serve.
    let state = Arc::new(AppState::from_artifacts(&args.model, &args.features)?);
    tracing::info!(
        trees = state.forest.n_trees(),
        features = ?state.features,
        "model loaded"
    );

    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };
    server::start(state, config).await
}
