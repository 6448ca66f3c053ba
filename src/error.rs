use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Input table does not match the expected column schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Required column '{0}' was not found in the input table")]
    MissingColumn(String),

    #[error("Column '{0}' is not part of schema version {1}")]
    UnexpectedColumn(String, u32),

    #[error("Row {row} has no value for column '{column}'")]
    MissingValue { row: usize, column: String },

    #[error("Column '{column}' expects a number, found '{found}' (row {row})")]
    NotNumeric {
        column: String,
        found: String,
        row: usize,
    },

    #[error("Target '{column}' value {value} in row {row} is outside 0..={max}")]
    TargetOutOfRange {
        column: String,
        value: f64,
        max: f64,
        row: usize,
    },

    #[error("Attribute '{0}' is not known to the trained schema")]
    UnknownAttribute(String),

    #[error("No rows left after cleaning ({filtered} of {input} rows had a zero grade)")]
    EmptyTable { input: usize, filtered: usize },
}

/// Observed values violate the binary/categorical domain of a column.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodingError {
    #[error("Binary column '{column}' has more than two observed values: {observed:?}")]
    TooManyValues {
        column: String,
        observed: Vec<String>,
    },

    #[error("Value '{value}' of binary column '{column}' is not one of {expected:?}")]
    UnknownBinaryValue {
        column: String,
        value: String,
        expected: [String; 2],
    },

    #[error("Category '{value}' of column '{column}' was not seen during training (known: {known:?})")]
    UnknownCategory {
        column: String,
        value: String,
        known: Vec<String>,
    },
}

/// Least-squares system could not be solved.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("No features to fit")]
    NoFeatures,

    #[error("Feature matrix has {rows} rows but {targets} targets")]
    ShapeMismatch { rows: usize, targets: usize },

    #[error(
        "Feature matrix has {rows} rows for {columns} design columns (features + intercept); the least-squares system is rank deficient"
    )]
    RankDeficient { rows: usize, columns: usize },

    #[error("Test partition is empty; cannot evaluate the model")]
    EmptyTestSet,

    #[error("Least-squares solver failed: {0}")]
    Solver(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for parameter '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: &'static str,
    },

    #[error("Unknown parameter '{0}'")]
    UnknownParam(String),

    #[error("Could not parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Any failure of a training run or a prediction.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Fit(#[from] FitError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A feature whose standard deviation on the training partition is ~0.
/// Its standardized value is defined as 0 instead of dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegenerateFeature {
    pub feature: String,
    pub std: f64,
}

impl fmt::Display for DegenerateFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "feature '{}' has near-zero variance (std = {:e}); standardized to 0",
            self.feature, self.std
        )
    }
}

/// Prediction fell outside the plausible grade range. The estimate itself is kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum RangeWarning {
    BelowMinimum { estimate: f64, minimum: f64 },
    AboveMaximum { estimate: f64, maximum: f64 },
}

impl RangeWarning {
    pub fn check(estimate: f64, minimum: f64, maximum: f64) -> Option<Self> {
        if estimate < minimum {
            Some(Self::BelowMinimum { estimate, minimum })
        } else if estimate > maximum {
            Some(Self::AboveMaximum { estimate, maximum })
        } else {
            None
        }
    }
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowMinimum { estimate, minimum } => {
                write!(f, "estimate {estimate:.2} is below the grade minimum {minimum}")
            }
            Self::AboveMaximum { estimate, maximum } => {
                write!(f, "estimate {estimate:.2} is above the grade maximum {maximum}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_warning_flags_both_sides() {
        assert_eq!(RangeWarning::check(50.0, 0.0, 100.0), None);
        assert_eq!(RangeWarning::check(0.0, 0.0, 100.0), None);
        assert!(matches!(
            RangeWarning::check(-3.0, 0.0, 100.0),
            Some(RangeWarning::BelowMinimum { .. })
        ));
        assert!(matches!(
            RangeWarning::check(104.5, 0.0, 100.0),
            Some(RangeWarning::AboveMaximum { .. })
        ));
    }

    #[test]
    fn errors_carry_context() {
        let err = EncodingError::TooManyValues {
            column: "sex".into(),
            observed: vec!["F".into(), "M".into(), "X".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("sex"));
        assert!(msg.contains("\"X\""));
    }
}
