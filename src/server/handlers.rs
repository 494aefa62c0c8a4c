//! HTTP request handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use serde::Serialize;
use serde_json::{json, Value};

use super::error::PredictError;
use super::AppState;

/// Successful prediction payload.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: f64,
}

/// Health/liveness probe. Never fails.
pub async fn home() -> Json<Value> {
    Json(json!({ "message": "Backend is running!" }))
}

/// Single-record prediction.
///
/// The body must be a JSON object carrying at least the feature keys the
/// model was trained with; extra keys are ignored. The row is assembled in
/// training order regardless of key order in the request.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>, PredictError> {
    let Json(payload) = body.map_err(|e| PredictError::InvalidBody(e.body_text()))?;
    let row = encode_row(&state.features, &payload)?;

    if row.len() != state.forest.n_features() as usize {
        // Guarded at startup; only reachable if state was built by hand.
        return Err(PredictError::Inference(format!(
            "row has {} features, model expects {}",
            row.len(),
            state.forest.n_features()
        )));
    }

    let prediction = state.forest.predict_row(&row) as f64;
    Ok(Json(PredictResponse { prediction }))
}

/// Select the feature values out of the request object, in contract order.
fn encode_row(features: &[String], payload: &Value) -> Result<Vec<f32>, PredictError> {
    let object = payload
        .as_object()
        .ok_or_else(|| PredictError::InvalidBody("expected a JSON object".to_string()))?;

    features
        .iter()
        .map(|name| {
            let value = object
                .get(name)
                .ok_or_else(|| PredictError::MissingFeature(name.clone()))?;
            value
                .as_f64()
                .map(|v| v as f32)
                .ok_or_else(|| PredictError::NonNumericFeature(name.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn encode_row_orders_by_contract_not_request() {
        let payload = json!({ "b": 2.0, "a": 1.0 });
        assert_eq!(encode_row(&features(), &payload).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn encode_row_ignores_extra_keys() {
        let payload = json!({ "a": 1, "b": 2, "Street": "Pave" });
        assert_eq!(encode_row(&features(), &payload).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn encode_row_reports_the_first_missing_feature() {
        let payload = json!({ "b": 2.0 });
        let err = encode_row(&features(), &payload).unwrap_err();
        assert!(matches!(err, PredictError::MissingFeature(name) if name == "a"));
    }

    #[test]
    fn encode_row_rejects_non_numeric_values() {
        let payload = json!({ "a": 1.0, "b": "tall" });
        let err = encode_row(&features(), &payload).unwrap_err();
        assert!(matches!(err, PredictError::NonNumericFeature(name) if name == "b"));

        let payload = json!({ "a": 1.0, "b": null });
        assert!(encode_row(&features(), &payload).is_err());
    }

    #[test]
    fn encode_row_rejects_non_object_bodies() {
        let payload = json!([1, 2, 3]);
        assert!(matches!(
            encode_row(&features(), &payload).unwrap_err(),
            PredictError::InvalidBody(_)
        ));
    }

    #[test]
    fn integers_are_accepted_as_numbers() {
        let payload = json!({ "a": 7, "b": 1800 });
        assert_eq!(encode_row(&features(), &payload).unwrap(), vec![7.0, 1800.0]);
    }
}
