use crate::error::DegenerateFeature;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::Serialize;

/// Relative tolerance below which a standard deviation counts as zero.
const DEGENERATE_STD_TOLERANCE: f64 = 1e-10;

/// Mean and population standard deviation of one feature on the training partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureScale {
    pub mean: f64,
    pub std: f64,
}

impl FeatureScale {
    pub fn is_degenerate(&self) -> bool {
        self.std <= DEGENERATE_STD_TOLERANCE * self.mean.abs().max(1.0)
    }

    /// `(x - mean) / std`, or 0 for a degenerate feature.
    pub fn standardize(&self, x: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            (x - self.mean) / self.std
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingParameters {
    features: Vec<String>,
    scales: Vec<FeatureScale>,
}

impl ScalingParameters {
    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn scales(&self) -> &[FeatureScale] {
        &self.scales
    }

    pub fn get(&self, feature: &str) -> Option<&FeatureScale> {
        self.features
            .iter()
            .position(|f| f == feature)
            .map(|i| &self.scales[i])
    }

    pub fn degenerate_features(&self) -> Vec<DegenerateFeature> {
        self.features
            .iter()
            .zip(&self.scales)
            .filter(|(_, s)| s.is_degenerate())
            .map(|(feature, s)| DegenerateFeature {
                feature: feature.clone(),
                std: s.std,
            })
            .collect()
    }

    /// Standardizes a matrix whose columns follow `features()`.
    pub fn transform(&self, data: ArrayView2<f64>) -> Array2<f64> {
        let mut result = data.to_owned();
        for (mut column, scale) in result.axis_iter_mut(Axis(1)).zip(&self.scales) {
            column.mapv_inplace(|x| scale.standardize(x));
        }
        result
    }

    /// Standardizes a single record laid out like `features()`.
    pub fn transform_row(&self, row: ArrayView1<f64>) -> Array1<f64> {
        row.iter()
            .zip(&self.scales)
            .map(|(&x, scale)| scale.standardize(x))
            .collect()
    }
}

/// Z-score standardization fitted on the training partition only.
pub struct StandardScaler;

impl StandardScaler {
    pub fn get_name(&self) -> &str {
        "Standard Scaler"
    }

    pub fn fit(&self, train: ArrayView2<f64>, features: &[String]) -> ScalingParameters {
        debug_assert_eq!(train.ncols(), features.len());
        let rows = train.nrows().max(1) as f64;

        let scales: Vec<FeatureScale> = train
            .axis_iter(Axis(1))
            .map(|col| {
                let mean = col.sum() / rows;
                let var = col.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / rows;
                FeatureScale { mean, std: var.sqrt() }
            })
            .collect();

        let params = ScalingParameters {
            features: features.to_vec(),
            scales,
        };
        for degenerate in params.degenerate_features() {
            log::warn!("{degenerate}");
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{i}")).collect()
    }

    #[test]
    fn standardized_training_columns_have_zero_mean_unit_std() {
        let train = array![[1.0, 10.0], [2.0, 30.0], [3.0, 20.0], [6.0, 60.0]];
        let params = StandardScaler.fit(train.view(), &names(2));
        let z = params.transform(train.view());

        for col in z.axis_iter(Axis(1)) {
            let mean = col.sum() / 4.0;
            let std = (col.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / 4.0).sqrt();
            assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(std, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn constant_feature_standardizes_to_zero() {
        let train = array![[0.1, 1.0], [0.1, 2.0], [0.1, 3.0]];
        let params = StandardScaler.fit(train.view(), &names(2));

        assert_eq!(params.degenerate_features().len(), 1);
        assert_eq!(params.degenerate_features()[0].feature, "f0");
        let z = params.transform(train.view());
        assert!(z.column(0).iter().all(|&v| v == 0.0));
        assert!(z.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn row_and_matrix_transforms_agree_exactly() {
        let train = array![[1.0, 5.0], [4.0, 7.0], [2.0, 9.0]];
        let params = StandardScaler.fit(train.view(), &names(2));
        let z = params.transform(train.view());
        for (i, row) in train.axis_iter(Axis(0)).enumerate() {
            assert_eq!(params.transform_row(row), z.row(i));
        }
    }

    #[test]
    fn lookup_by_feature_name() {
        let train = array![[2.0], [4.0]];
        let params = StandardScaler.fit(train.view(), &["age".to_string()]);
        let scale = params.get("age").unwrap();
        assert_abs_diff_eq!(scale.mean, 3.0);
        assert_abs_diff_eq!(scale.std, 1.0);
        assert!(params.get("absences").is_none());
    }
}
