//! HTTP prediction service.
//!
//! The server holds no state beyond the artifacts loaded at startup: an
//! immutable [`AppState`] shared across handlers via `Arc`. Two endpoints
//! are exposed:
//!
//! - `GET /` — liveness probe, fixed payload
//! - `POST /predict` — single-record inference
//!
//! Cross-origin requests are allowed from any origin.

mod error;
mod handlers;
mod routes;

use std::path::Path;
use std::sync::Arc;

use anyhow::{ensure, Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::forest::RandomForest;
use crate::io::artifact::{load_feature_list, load_model};

pub use error::PredictError;
pub use routes::api_routes;

/// Server bind address configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Bind address string, e.g. `0.0.0.0:8000`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Immutable application state: the loaded model and its feature contract.
///
/// Constructed once at startup and never mutated by request handling, so
/// handlers share it without locking.
#[derive(Debug)]
pub struct AppState {
    pub forest: RandomForest,
    pub features: Vec<String>,
}

impl AppState {
    /// Build state from in-memory parts, checking the feature contract.
    pub fn new(forest: RandomForest, features: Vec<String>) -> Result<Self> {
        ensure!(
            features.len() == forest.n_features() as usize,
            "feature list length ({}) does not match model arity ({})",
            features.len(),
            forest.n_features()
        );
        Ok(Self { forest, features })
    }

    /// Load both artifacts from disk. Any failure here is fatal: the
    /// process must not start serving without a usable model.
    pub fn from_artifacts(model_path: &Path, features_path: &Path) -> Result<Self> {
        let forest = load_model(model_path)
            .with_context(|| format!("failed to load model from {}", model_path.display()))?;
        let features = load_feature_list(features_path).with_context(|| {
            format!("failed to load feature list from {}", features_path.display())
        })?;
        Self::new(forest, features)
    }
}

/// Start the HTTP server and serve until the process is stopped.
pub async fn start(state: Arc<AppState>, config: ServerConfig) -> Result<()> {
    let app = app(state);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("server listening on http://{}", addr);
    tracing::info!("  GET  / - health check");
    tracing::info!("  POST /predict - single-record prediction");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router with CORS and tracing layers applied.
///
/// Split out of [`start`] so tests can drive the router directly.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
