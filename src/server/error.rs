//! Typed request-failure classification.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by the predict endpoint.
///
/// Client-caused failures map to 400; inference failures are the server's
/// own problem and map to 500. Either way the response body is a single
/// `{"error": <text>}` object and the process keeps serving.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("missing required feature: {0}")]
    MissingFeature(String),

    #[error("feature {0} is not a number")]
    NonNumericFeature(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

impl PredictError {
    fn status(&self) -> StatusCode {
        match self {
            PredictError::InvalidBody(_)
            | PredictError::MissingFeature(_)
            | PredictError::NonNumericFeature(_) => StatusCode::BAD_REQUEST,
            PredictError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "inference failure");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
