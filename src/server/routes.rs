//! Route definitions.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{home, predict};
use super::AppState;

/// Create the API router.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/predict", post(predict))
}
