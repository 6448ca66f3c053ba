use super::feature_selector::{FeatureCorrelationTable, FeatureSelection, FeatureSelector, SelectedFeatureSet};
use crate::error::ConfigError;
use crate::processing::CleanedTable;
use ndarray::{ArrayView1, Axis};

pub const DEFAULT_CORRELATION_THRESHOLD: f64 = 0.06;

/// Keeps the features whose absolute Pearson correlation with the target is at least `threshold`.
/// Columns with no defined correlation (constant) score 0 and are always excluded.
pub struct CorrelationSelector {
    threshold: f64,
}

impl CorrelationSelector {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_CORRELATION_THRESHOLD,
        }
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for CorrelationSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Pearson correlation coefficient. Constant inputs have no defined correlation; 0 is returned.
pub fn pearson_correlation(x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    let n = x.len();
    if n < 2 || n != y.len() || is_constant(x) || is_constant(y) {
        return 0.0;
    }

    let n = n as f64;
    let mean_x = x.sum() / n;
    let mean_y = y.sum() / n;
    let mut num = 0.0;
    let mut den_x = 0.0;
    let mut den_y = 0.0;

    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        num += dx * dy;
        den_x += dx * dx;
        den_y += dy * dy;
    }

    let den = (den_x * den_y).sqrt();
    if den == 0.0 || !den.is_finite() {
        0.0
    } else {
        (num / den).clamp(-1.0, 1.0)
    }
}

fn is_constant(values: ArrayView1<f64>) -> bool {
    values.iter().all(|v| *v == values[0])
}

impl FeatureSelector for CorrelationSelector {
    fn get_name(&self) -> &str {
        "Correlation Filter"
    }

    fn get_metric_name(&self) -> &str {
        "Pearson r"
    }

    fn get_supported_params(&self) -> Vec<&str> {
        vec!["threshold"]
    }

    fn set_param(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "threshold" => {
                let threshold: f64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                    reason: "threshold must be a number",
                })?;
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                        reason: "threshold must lie in [0, 1]",
                    });
                }
                self.threshold = threshold;
                Ok(())
            }
            _ => Err(ConfigError::UnknownParam(key.to_string())),
        }
    }

    fn select(&self, table: &CleanedTable) -> FeatureSelection {
        let target = table.target().view();
        let mut entries = Vec::with_capacity(table.feature_names().len());
        let mut names = Vec::new();
        let mut indices = Vec::new();

        for (j, (name, column)) in table
            .feature_names()
            .iter()
            .zip(table.features().axis_iter(Axis(1)))
            .enumerate()
        {
            let r = pearson_correlation(column, target);
            log::debug!("{name}: r = {r:.4}");
            // r = 0 marks a constant column; never kept, whatever the threshold.
            if r != 0.0 && r.abs() >= self.threshold {
                names.push(name.clone());
                indices.push(j);
            }
            entries.push((name.clone(), r));
        }

        log::info!(
            "{} kept {} of {} features (|r| >= {})",
            self.get_name(),
            names.len(),
            entries.len(),
            self.threshold
        );

        FeatureSelection {
            correlations: FeatureCorrelationTable::new(entries),
            selected: SelectedFeatureSet::new(names, indices),
            threshold: self.threshold,
        }
    }
}
