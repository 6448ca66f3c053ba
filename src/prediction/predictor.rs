use super::request::{FeatureContribution, PredictionRequest, PredictionResult};
use crate::data_loading::RawRecord;
use crate::error::{PipelineError, RangeWarning, SchemaError};
use crate::pipeline::TrainedContext;
use crate::processing::{AttributeRule, ColumnRole};

/// Lowest grade on the rescaled target.
pub const GRADE_MINIMUM: f64 = 0.0;

/// Replays the training transforms on a single record and applies the fitted model.
#[derive(Debug, Clone, Copy)]
pub struct Predictor<'a> {
    ctx: &'a TrainedContext,
}

impl<'a> Predictor<'a> {
    pub fn new(ctx: &'a TrainedContext) -> Self {
        Self { ctx }
    }

    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PipelineError> {
        self.predict_record(request.values())
    }

    /// Predicts from a raw record. Target and leakage columns are ignored, so
    /// training rows can be passed through as loaded.
    pub fn predict_record(&self, record: &RawRecord) -> Result<PredictionResult, PipelineError> {
        let schema = self.ctx.schema();
        let layout = self.ctx.table().layout();

        let mut features = RawRecord::with_capacity(record.len());
        for (name, value) in record {
            match schema.column(name).map(|c| c.role) {
                Some(ColumnRole::Feature) if layout.attribute(name).is_some() => {
                    features.insert(name.clone(), value.clone());
                }
                Some(ColumnRole::Target) | Some(ColumnRole::Leakage) => {}
                _ => return Err(SchemaError::UnknownAttribute(name.clone()).into()),
            }
        }

        let (encoded, absent) = layout.encode_partial(&features)?;

        let model = self.ctx.model();
        let scaling = self.ctx.scaling();
        let selected = &self.ctx.selection().selected;
        let mut defaulted: Vec<String> = Vec::new();
        let mut contributions = Vec::with_capacity(selected.len());

        for ((&column, feature), (scale, &coefficient)) in selected
            .indices()
            .iter()
            .zip(selected.names())
            .zip(scaling.scales().iter().zip(model.coefficients()))
        {
            let missing = layout.source_of(column).filter(|s| absent.contains(&s.name));

            let (raw_value, standardized) = if let Some(s) = missing {
                if !defaulted.iter().any(|d| *d == s.name) {
                    defaulted.push(s.name.clone());
                }
                match s.rule {
                    // No level given: every indicator of the attribute is off.
                    AttributeRule::Categorical { .. } => (0.0, scale.standardize(0.0)),
                    _ => (scale.mean, 0.0),
                }
            } else {
                (encoded[column], scale.standardize(encoded[column]))
            };

            contributions.push(FeatureContribution {
                feature: feature.clone(),
                raw_value,
                standardized,
                coefficient,
                contribution: coefficient * standardized,
            });
        }

        let estimate = model.intercept() + contributions.iter().map(|c| c.contribution).sum::<f64>();
        let range_warning = RangeWarning::check(estimate, GRADE_MINIMUM, schema.target_max());
        if let Some(warning) = &range_warning {
            log::warn!("{warning}");
        }
        if !defaulted.is_empty() {
            log::debug!("Not given, defaulted: {defaulted:?}");
        }

        Ok(PredictionResult {
            estimate,
            intercept: model.intercept(),
            contributions,
            defaulted,
            range_warning,
        })
    }
}
