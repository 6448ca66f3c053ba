use crate::data_loading::{RawRecord, RawValue};
use crate::error::RangeWarning;
use serde::Serialize;

/// Calculator-facing input: any subset of the schema's feature attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionRequest {
    values: RawRecord,
}

impl PredictionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, attribute: &str, value: impl Into<RawValue>) -> Self {
        self.set(attribute, value);
        self
    }

    pub fn set(&mut self, attribute: &str, value: impl Into<RawValue>) {
        self.values.insert(attribute.to_string(), value.into());
    }

    pub fn get(&self, attribute: &str) -> Option<&RawValue> {
        self.values.get(attribute)
    }

    pub fn values(&self) -> &RawRecord {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<RawRecord> for PredictionRequest {
    fn from(values: RawRecord) -> Self {
        Self { values }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureContribution {
    pub feature: String,
    /// Encoded value before standardization. When defaulted: the training mean, or 0 for a
    /// category indicator.
    pub raw_value: f64,
    pub standardized: f64,
    pub coefficient: f64,
    /// `coefficient × standardized`, in grade points.
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Unclamped estimate on the 0–100 scale.
    pub estimate: f64,
    pub intercept: f64,
    /// One entry per selected feature, in model order.
    pub contributions: Vec<FeatureContribution>,
    /// Attributes missing from the request. Numbers and binaries took their training mean;
    /// categories got no level.
    pub defaulted: Vec<String>,
    pub range_warning: Option<RangeWarning>,
}

impl PredictionResult {
    pub fn is_in_range(&self) -> bool {
        self.range_warning.is_none()
    }

    /// Estimate clipped into the grade range, for display.
    pub fn clamped(&self, minimum: f64, maximum: f64) -> f64 {
        self.estimate.clamp(minimum, maximum)
    }

    /// Contributions by absolute size, largest first.
    pub fn ranked_contributions(&self) -> Vec<&FeatureContribution> {
        let mut ranked: Vec<&FeatureContribution> = self.contributions.iter().collect();
        ranked.sort_by(|a, b| b.contribution.abs().total_cmp(&a.contribution.abs()));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_style_request() {
        let request = PredictionRequest::new()
            .with("failures", 2)
            .with("higher", "yes")
            .with("absences", 4.0);
        assert_eq!(request.len(), 3);
        assert_eq!(request.get("higher"), Some(&RawValue::from("yes")));
        assert_eq!(request.get("failures"), Some(&RawValue::Number(2.0)));
    }

    #[test]
    fn clamping_is_for_display_only() {
        let result = PredictionResult {
            estimate: 104.2,
            intercept: 60.0,
            contributions: vec![],
            defaulted: vec![],
            range_warning: RangeWarning::check(104.2, 0.0, 100.0),
        };
        assert!(!result.is_in_range());
        assert_eq!(result.clamped(0.0, 100.0), 100.0);
        assert_eq!(result.estimate, 104.2);
    }
}
