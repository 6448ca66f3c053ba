//! Read-only views over a trained context for dashboards and the command line.

pub mod heatmap;
pub mod labels;
pub mod summary;

pub use heatmap::{correlation_heatmap, CorrelationMatrix, DEFAULT_HEATMAP_THRESHOLD};
pub use labels::feature_label;
pub use summary::{
    dataset_shares, grade_by_group, grade_histogram, DatasetShare, GroupSummary, HistogramBin,
    DEFAULT_HISTOGRAM_BINS,
};

use crate::error::DegenerateFeature;
use crate::pipeline::TrainedContext;
use crate::processing::CleaningReport;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledScore {
    pub feature: String,
    pub label: String,
    pub value: f64,
}

impl LabelledScore {
    fn new(feature: &str, value: f64) -> Self {
        Self {
            feature: feature.to_string(),
            label: feature_label(feature),
            value,
        }
    }
}

/// Summary of a training run: fit quality, what drove the model and what was left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelReport {
    pub r2: f64,
    pub mae: f64,
    pub rmse: f64,
    pub median_absolute_error: f64,
    pub n_train: usize,
    pub n_test: usize,
    pub intercept: f64,
    pub threshold: f64,
    /// Coefficients ranked by magnitude.
    pub importance: Vec<LabelledScore>,
    /// Features below the correlation threshold, with their r.
    pub excluded: Vec<LabelledScore>,
    pub degenerate: Vec<DegenerateFeature>,
    pub cleaning: CleaningReport,
}

impl ModelReport {
    pub fn from_context(ctx: &TrainedContext) -> Self {
        let evaluation = ctx.evaluation();
        let selection = ctx.selection();
        Self {
            r2: evaluation.r2,
            mae: evaluation.mae,
            rmse: evaluation.rmse,
            median_absolute_error: evaluation.median_absolute_error,
            n_train: ctx.split().train.len(),
            n_test: evaluation.n_test,
            intercept: ctx.model().intercept(),
            threshold: selection.threshold,
            importance: ctx
                .model()
                .importance()
                .into_iter()
                .map(|(feature, coefficient)| LabelledScore::new(feature, coefficient))
                .collect(),
            excluded: selection
                .excluded()
                .into_iter()
                .map(|(feature, r)| LabelledScore::new(feature, r))
                .collect(),
            degenerate: ctx.scaling().degenerate_features(),
            cleaning: ctx.table().report().clone(),
        }
    }
}

impl fmt::Display for ModelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.cleaning;
        writeln!(
            f,
            "Rows: {} loaded, {} with a zero grade removed, {} kept ({} train / {} test)",
            c.input_rows, c.filtered_rows, c.kept_rows, self.n_train, self.n_test
        )?;
        writeln!(f, "Dropped columns: {}", c.dropped_columns.join(", "))?;
        writeln!(f)?;
        writeln!(f, "Mean Absolute Error: {:.2} points", self.mae)?;
        writeln!(f, "R² Score: {:.2}", self.r2)?;
        writeln!(f, "RMSE: {:.2}, median absolute error: {:.2}", self.rmse, self.median_absolute_error)?;
        writeln!(f)?;
        writeln!(f, "Intercept: {:.2}", self.intercept)?;
        writeln!(f, "Feature impact (grade points per standard deviation):")?;
        for score in &self.importance {
            writeln!(f, "  {:>+8.3}  {}", score.value, score.label)?;
        }
        writeln!(f)?;
        writeln!(f, "Excluded features (|r| < {}):", self.threshold)?;
        for score in &self.excluded {
            writeln!(f, "  {:>+8.3}  {}", score.value, score.label)?;
        }
        for degenerate in &self.degenerate {
            writeln!(f, "warning: {degenerate}")?;
        }
        Ok(())
    }
}
