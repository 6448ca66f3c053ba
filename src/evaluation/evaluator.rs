use super::metrics::EvaluationMetrics;
use crate::error::FitError;
use crate::models::FittedModel;
use ndarray::{ArrayView1, ArrayView2, Axis};
use smartcore::metrics::{mean_absolute_error, mean_squared_error, r2};

pub struct ModelEvaluator;

impl ModelEvaluator {
    /// Applies the model to standardized test rows and scores the predictions.
    pub fn evaluate(
        model: &FittedModel,
        x_test: ArrayView2<f64>,
        y_test: ArrayView1<f64>,
    ) -> Result<EvaluationMetrics, FitError> {
        if x_test.nrows() == 0 {
            return Err(FitError::EmptyTestSet);
        }
        if x_test.nrows() != y_test.len() {
            return Err(FitError::ShapeMismatch {
                rows: x_test.nrows(),
                targets: y_test.len(),
            });
        }

        let y_pred: Vec<f64> = x_test
            .axis_iter(Axis(0))
            .map(|row| model.predict_standardized(&row.to_vec()))
            .collect();
        let y_true = y_test.to_vec();

        Ok(Self::evaluate_regression(&y_true, &y_pred))
    }

    pub fn evaluate_regression(y_true: &[f64], y_pred: &[f64]) -> EvaluationMetrics {
        let y_true_vec: Vec<f64> = y_true.to_vec();
        let y_pred_vec: Vec<f64> = y_pred.to_vec();

        let mse = mean_squared_error(&y_true_vec, &y_pred_vec);
        let metrics = EvaluationMetrics {
            r2: r2(&y_true_vec, &y_pred_vec),
            mae: mean_absolute_error(&y_true_vec, &y_pred_vec),
            rmse: mse.sqrt(),
            median_absolute_error: Self::calculate_median_absolute_error(&y_true_vec, &y_pred_vec),
            n_test: y_true_vec.len(),
            predictions: y_true_vec.into_iter().zip(y_pred_vec).collect(),
        };

        log::info!(
            "Test metrics over {} rows: R2 = {:.4}, MAE = {:.2}, RMSE = {:.2}",
            metrics.n_test,
            metrics.r2,
            metrics.mae,
            metrics.rmse
        );
        metrics
    }

    fn calculate_median_absolute_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
        let mut errors: Vec<f64> = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| (t - p).abs())
            .collect();

        if errors.is_empty() {
            return 0.0;
        }

        errors.sort_by(f64::total_cmp);

        let n = errors.len();
        if n % 2 == 0 {
            (errors[n / 2 - 1] + errors[n / 2]) / 2.0
        } else {
            errors[n / 2]
        }
    }
}
