use serde::Serialize;

/// Held-out fit quality of a trained model. Reporting only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationMetrics {
    /// Coefficient of determination on the test partition.
    pub r2: f64,
    /// Mean absolute error, in grade points (0–100 scale).
    pub mae: f64,
    pub rmse: f64,
    pub median_absolute_error: f64,
    pub n_test: usize,
    /// (actual, predicted) per test row, for accuracy plots.
    pub predictions: Vec<(f64, f64)>,
}

impl EvaluationMetrics {
    pub fn actual(&self) -> Vec<f64> {
        self.predictions.iter().map(|(a, _)| *a).collect()
    }

    pub fn predicted(&self) -> Vec<f64> {
        self.predictions.iter().map(|(_, p)| *p).collect()
    }
}
