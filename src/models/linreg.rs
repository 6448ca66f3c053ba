use super::fitted_model::FittedModel;
use crate::error::{ConfigError, FitError};
use ndarray::{ArrayView1, ArrayView2, Axis};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::{
    LinearRegression, LinearRegressionParameters, LinearRegressionSolverName,
};

/// Ordinary least squares with an intercept and no regularization.
///
/// SVD is the default solver: its minimum-norm solution copes with the exact
/// collinearity that full dummy encoding introduces.
pub struct LinRegFitter {
    solver: LinearRegressionSolverName,
}

impl LinRegFitter {
    pub fn new() -> Self {
        Self {
            solver: LinearRegressionSolverName::SVD,
        }
    }

    pub fn get_name(&self) -> &str {
        "Linear Regression (OLS)"
    }

    pub fn set_param(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "solver" => {
                self.solver = match value {
                    "svd" => LinearRegressionSolverName::SVD,
                    "qr" => LinearRegressionSolverName::QR,
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            key: key.to_string(),
                            value: value.to_string(),
                            reason: "supported solvers are qr, svd",
                        })
                    }
                };
                Ok(())
            }
            _ => Err(ConfigError::UnknownParam(key.to_string())),
        }
    }

    /// Fits on standardized training features whose columns follow `features`.
    pub fn fit(
        &self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        features: &[String],
    ) -> Result<FittedModel, FitError> {
        let (rows, cols) = x.dim();
        if cols == 0 {
            return Err(FitError::NoFeatures);
        }
        if rows != y.len() {
            return Err(FitError::ShapeMismatch {
                rows,
                targets: y.len(),
            });
        }
        // The intercept is one more design column.
        if rows < cols + 1 {
            return Err(FitError::RankDeficient {
                rows,
                columns: cols + 1,
            });
        }

        let x_rows: Vec<Vec<f64>> = x.axis_iter(Axis(0)).map(|r| r.to_vec()).collect();
        let matrix = DenseMatrix::from_2d_vec(&x_rows).map_err(|e| FitError::Solver(e.to_string()))?;
        let targets: Vec<f64> = y.to_vec();

        let mut params = LinearRegressionParameters::default();
        params.solver = self.solver.clone();

        let model: LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>> =
            LinearRegression::fit(&matrix, &targets, params).map_err(|e| FitError::Solver(e.to_string()))?;

        let coefficients: Vec<f64> = model.coefficients().iterator(0).copied().collect();
        let intercept = *model.intercept();

        if coefficients.len() != cols {
            return Err(FitError::Solver(format!(
                "expected {cols} coefficients, solver returned {}",
                coefficients.len()
            )));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(FitError::Solver("non-finite coefficients".to_string()));
        }

        log::info!(
            "{} fitted on {rows} rows x {cols} features, intercept {intercept:.3}",
            self.get_name()
        );

        Ok(FittedModel::new(intercept, features.to_vec(), coefficients))
    }
}

impl Default for LinRegFitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2};

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{i}")).collect()
    }

    #[test]
    fn recovers_exact_linear_relationship() {
        let x: Array2<f64> = array![
            [0.0, 1.0],
            [1.0, 0.0],
            [2.0, 1.0],
            [3.0, 3.0],
            [4.0, 2.0],
            [5.0, 5.0]
        ];
        let y: Array1<f64> = x.rows().into_iter().map(|r| 10.0 + 3.0 * r[0] - 2.0 * r[1]).collect();

        for solver in ["svd", "qr"] {
            let mut fitter = LinRegFitter::new();
            fitter.set_param("solver", solver).unwrap();
            let model = fitter.fit(x.view(), y.view(), &names(2)).unwrap();
            assert_abs_diff_eq!(model.intercept(), 10.0, epsilon = 1e-8);
            assert_abs_diff_eq!(model.coefficients()[0], 3.0, epsilon = 1e-8);
            assert_abs_diff_eq!(model.coefficients()[1], -2.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn fewer_rows_than_design_columns_is_rank_deficient() {
        let x = array![[1.0, 2.0, 3.0], [4.0, 5.0, 7.0]];
        let y = array![1.0, 2.0];
        let err = LinRegFitter::new().fit(x.view(), y.view(), &names(3)).unwrap_err();
        assert_eq!(err, FitError::RankDeficient { rows: 2, columns: 4 });
    }

    #[test]
    fn empty_feature_set_and_shape_mismatch() {
        let empty = Array2::<f64>::zeros((5, 0));
        let y = Array1::<f64>::zeros(5);
        assert_eq!(
            LinRegFitter::new().fit(empty.view(), y.view(), &[]).unwrap_err(),
            FitError::NoFeatures
        );

        let x = Array2::<f64>::zeros((5, 1));
        let short = Array1::<f64>::zeros(4);
        assert_eq!(
            LinRegFitter::new().fit(x.view(), short.view(), &names(1)).unwrap_err(),
            FitError::ShapeMismatch { rows: 5, targets: 4 }
        );
    }

    #[test]
    fn unknown_solver_is_rejected() {
        let mut fitter = LinRegFitter::new();
        assert!(fitter.set_param("solver", "cholesky").is_err());
        assert!(fitter.set_param("alpha", "0.1").is_err());
    }
}
