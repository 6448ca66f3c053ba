use crate::error::ConfigError;
use crate::feature_selection_strategies::DEFAULT_CORRELATION_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables of a training run. Every field has a default, so a TOML file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub correlation_threshold: f64,
    /// Share of cleaned rows held out for evaluation.
    pub test_fraction: f64,
    pub seed: u64,
    /// Least-squares solver: "svd" or "qr".
    pub solver: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            correlation_threshold: DEFAULT_CORRELATION_THRESHOLD,
            test_fraction: 0.2,
            seed: 42,
            solver: "svd".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("Reading pipeline configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn get_supported_params() -> Vec<&'static str> {
        vec!["correlation_threshold", "test_fraction", "seed", "solver"]
    }

    /// String-keyed override, e.g. from `--param key=value` on the command line.
    /// The config is left untouched when the new value is rejected.
    pub fn set_param(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut updated = self.clone();
        let invalid = |reason: &'static str| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        };
        match key {
            "correlation_threshold" | "threshold" => {
                updated.correlation_threshold = value.parse().map_err(|_| invalid("expected a number"))?;
            }
            "test_fraction" => {
                updated.test_fraction = value.parse().map_err(|_| invalid("expected a number"))?;
            }
            "seed" => {
                updated.seed = value.parse().map_err(|_| invalid("expected a non-negative integer"))?;
            }
            "solver" => updated.solver = value.to_string(),
            _ => return Err(ConfigError::UnknownParam(key.to_string())),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.correlation_threshold) {
            return Err(ConfigError::InvalidValue {
                key: "correlation_threshold".to_string(),
                value: self.correlation_threshold.to_string(),
                reason: "threshold must lie in [0, 1]",
            });
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(ConfigError::InvalidValue {
                key: "test_fraction".to_string(),
                value: self.test_fraction.to_string(),
                reason: "test fraction must lie strictly between 0 and 1",
            });
        }
        if !matches!(self.solver.as_str(), "svd" | "qr") {
            return Err(ConfigError::InvalidValue {
                key: "solver".to_string(),
                value: self.solver.clone(),
                reason: "supported solvers are qr, svd",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_analysis() {
        let config = PipelineConfig::default();
        assert_eq!(config.correlation_threshold, 0.06);
        assert_eq!(config.test_fraction, 0.2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.solver, "svd");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = PipelineConfig::from_toml_str("seed = 7\ncorrelation_threshold = 0.1\n").unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.correlation_threshold, 0.1);
        assert_eq!(config.test_fraction, 0.2);
    }

    #[test]
    fn toml_rejects_bad_values_and_unknown_keys() {
        assert!(matches!(
            PipelineConfig::from_toml_str("test_fraction = 1.5"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            PipelineConfig::from_toml_str("alpha = 0.5"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn set_param_overrides_and_validates() {
        let mut config = PipelineConfig::default();
        config.set_param("solver", "qr").unwrap();
        config.set_param("seed", "123").unwrap();
        assert_eq!(config.solver, "qr");
        assert_eq!(config.seed, 123);

        assert!(config.set_param("seed", "-1").is_err());
        assert!(config.set_param("solver", "lu").is_err());
        assert_eq!(config.solver, "qr");
        assert!(matches!(
            config.set_param("epochs", "3"),
            Err(ConfigError::UnknownParam(_))
        ));
    }

    #[test]
    fn every_supported_param_is_settable() {
        let mut config = PipelineConfig::default();
        let values = [("correlation_threshold", "0.1"), ("test_fraction", "0.3"), ("seed", "5"), ("solver", "qr")];
        assert_eq!(PipelineConfig::get_supported_params().len(), values.len());
        for (key, value) in values {
            assert!(PipelineConfig::get_supported_params().contains(&key));
            config.set_param(key, value).unwrap();
        }
        assert_eq!(config.test_fraction, 0.3);
    }
}
