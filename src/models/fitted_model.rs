use serde::Serialize;

/// Intercept plus one coefficient per selected feature, all in standardized space.
///
/// A coefficient reads as "grade points gained or lost per standard deviation of the
/// feature", so magnitudes are directly comparable across features.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FittedModel {
    intercept: f64,
    features: Vec<String>,
    coefficients: Vec<f64>,
}

impl FittedModel {
    pub fn new(intercept: f64, features: Vec<String>, coefficients: Vec<f64>) -> Self {
        debug_assert_eq!(features.len(), coefficients.len());
        Self {
            intercept,
            features,
            coefficients,
        }
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn coefficient(&self, feature: &str) -> Option<f64> {
        self.features
            .iter()
            .position(|f| f == feature)
            .map(|i| self.coefficients[i])
    }

    /// Signed contribution `coefficient × z` of each feature, in feature order.
    pub fn contributions(&self, standardized: &[f64]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(standardized)
            .map(|(c, z)| c * z)
            .collect()
    }

    /// `intercept + Σ coefficient × z`
    pub fn predict_standardized(&self, standardized: &[f64]) -> f64 {
        self.intercept + self.contributions(standardized).iter().sum::<f64>()
    }

    /// Features ranked by absolute coefficient, largest first. A reporting view only.
    pub fn importance(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .features
            .iter()
            .map(String::as_str)
            .zip(self.coefficients.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> FittedModel {
        FittedModel::new(
            60.0,
            vec!["failures".into(), "higher".into(), "goout".into()],
            vec![-4.0, 2.5, -1.0],
        )
    }

    #[test]
    fn prediction_is_intercept_plus_contributions() {
        let m = model();
        let z = [1.0, -0.5, 2.0];
        assert_eq!(m.contributions(&z), vec![-4.0, -1.25, -2.0]);
        assert_eq!(m.predict_standardized(&z), 52.75);
        assert_eq!(m.predict_standardized(&[0.0, 0.0, 0.0]), 60.0);
    }

    #[test]
    fn importance_sorts_by_magnitude() {
        let m = model();
        let names: Vec<&str> = m.importance().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["failures", "higher", "goout"]);
        assert_eq!(m.coefficient("higher"), Some(2.5));
        assert_eq!(m.coefficient("age"), None);
    }
}
