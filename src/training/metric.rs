//! Evaluation metrics for model quality.
//!
//! Metrics are separate from the fitting criterion — the forest always
//! minimizes variance at the split level, but callers choose what to report.

/// A metric for evaluating model quality.
pub trait Metric: Send + Sync {
    /// Compute the metric over paired predictions and labels.
    fn compute(&self, preds: &[f32], labels: &[f32]) -> f64;

    /// Whether higher values indicate better performance.
    fn higher_is_better(&self) -> bool;

    /// Name of the metric (for logging).
    fn name(&self) -> &'static str;
}

/// Root Mean Squared Error: `sqrt(mean((pred - label)²))`.
///
/// Lower is better.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmse;

impl Metric for Rmse {
    fn compute(&self, preds: &[f32], labels: &[f32]) -> f64 {
        debug_assert_eq!(preds.len(), labels.len());
        if preds.is_empty() {
            return 0.0;
        }

        let mse: f64 = preds
            .iter()
            .zip(labels.iter())
            .map(|(p, l)| {
                let diff = (*p as f64) - (*l as f64);
                diff * diff
            })
            .sum::<f64>()
            / preds.len() as f64;

        mse.sqrt()
    }

    fn higher_is_better(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "rmse"
    }
}

/// Mean Absolute Error: `mean(|pred - label|)`.
///
/// Lower is better; more robust to outliers than RMSE.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mae;

impl Metric for Mae {
    fn compute(&self, preds: &[f32], labels: &[f32]) -> f64 {
        debug_assert_eq!(preds.len(), labels.len());
        if preds.is_empty() {
            return 0.0;
        }

        preds
            .iter()
            .zip(labels.iter())
            .map(|(p, l)| ((*p as f64) - (*l as f64)).abs())
            .sum::<f64>()
            / preds.len() as f64
    }

    fn higher_is_better(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "mae"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rmse_of_perfect_predictions_is_zero() {
        let v = [1.0, 2.0, 3.0];
        assert_eq!(Rmse.compute(&v, &v), 0.0);
    }

    #[test]
    fn rmse_matches_hand_computation() {
        // Errors of 3 and 4: sqrt((9 + 16) / 2).
        let got = Rmse.compute(&[3.0, 0.0], &[0.0, 4.0]);
        assert_relative_eq!(got, (25.0f64 / 2.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn mae_matches_hand_computation() {
        let got = Mae.compute(&[3.0, 0.0], &[0.0, 4.0]);
        assert_relative_eq!(got, 3.5, epsilon = 1e-12);
    }

    #[test]
    fn empty_inputs_yield_zero() {
        assert_eq!(Rmse.compute(&[], &[]), 0.0);
        assert_eq!(Mae.compute(&[], &[]), 0.0);
    }

    #[test]
    fn both_metrics_are_lower_is_better() {
        assert!(!Rmse.higher_is_better());
        assert!(!Mae.higher_is_better());
    }

    #[test]
    fn names_are_stable_for_logging() {
        assert_eq!(Rmse.name(), "rmse");
        assert_eq!(Mae.name(), "mae");
    }
}
