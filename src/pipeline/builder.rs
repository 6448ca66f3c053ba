use super::pipeline::TrainingPipeline;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::feature_selection_strategies::{CorrelationSelector, FeatureSelector};
use crate::models::LinRegFitter;
use crate::processing::{Cleaner, Schema, StandardScaler};

/// Assembles a [`TrainingPipeline`] from a schema, a config and string overrides.
pub struct PipelineBuilder {
    schema: Option<Schema>,
    config: PipelineConfig,
    params: Vec<(String, String)>,
    selector: Option<Box<dyn FeatureSelector>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            schema: None,
            config: PipelineConfig::default(),
            params: Vec::new(),
            selector: None,
        }
    }

    /// Column schema of the input table. Defaults to [`Schema::student_performance`].
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.correlation_threshold = threshold;
        self
    }

    pub fn test_fraction(mut self, test_fraction: f64) -> Self {
        self.config.test_fraction = test_fraction;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn solver(mut self, solver: &str) -> Self {
        self.config.solver = solver.to_string();
        self
    }

    /// Config override applied at build time, in call order.
    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Replaces the default correlation filter. Its own parameters are left as given.
    pub fn feature_selector(mut self, selector: Box<dyn FeatureSelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn build(self) -> Result<TrainingPipeline, PipelineError> {
        let mut config = self.config;
        for (key, value) in &self.params {
            config.set_param(key, value)?;
        }
        config.validate()?;

        let selector = match self.selector {
            Some(selector) => selector,
            None => {
                let mut selector = CorrelationSelector::new();
                selector.set_param("threshold", &config.correlation_threshold.to_string())?;
                Box::new(selector) as Box<dyn FeatureSelector>
            }
        };

        let mut fitter = LinRegFitter::new();
        fitter.set_param("solver", &config.solver)?;

        let schema = self.schema.unwrap_or_else(Schema::student_performance);
        log::debug!(
            "Built pipeline: schema v{} ({} columns), {}, {}, config {:?}",
            schema.version(),
            schema.columns().len(),
            selector.get_name(),
            fitter.get_name(),
            config
        );

        Ok(TrainingPipeline {
            config,
            cleaner: Cleaner::new(schema),
            selector,
            scaler: StandardScaler,
            fitter,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::feature_selection_strategies::{FeatureCorrelationTable, FeatureSelection, SelectedFeatureSet};
    use crate::processing::CleanedTable;

    #[test]
    fn overrides_apply_in_order() {
        let pipeline = PipelineBuilder::new()
            .seed(1)
            .param("seed", "9")
            .solver("qr")
            .build()
            .unwrap();
        assert_eq!(pipeline.config().seed, 9);
        assert_eq!(pipeline.config().solver, "qr");
        assert_eq!(pipeline.schema().target(), "G3");
    }

    #[test]
    fn invalid_config_fails_the_build() {
        let err = PipelineBuilder::new().threshold(2.0).build().err();
        assert!(matches!(
            err,
            Some(PipelineError::Config(ConfigError::InvalidValue { .. }))
        ));

        let err = PipelineBuilder::new().param("learning_rate", "0.1").build().err();
        assert!(matches!(
            err,
            Some(PipelineError::Config(ConfigError::UnknownParam(_)))
        ));
    }

    /// Keeps every column, scoring each as 1.
    struct KeepAll;

    impl FeatureSelector for KeepAll {
        fn get_name(&self) -> &str {
            "Keep All"
        }

        fn get_supported_params(&self) -> Vec<&str> {
            Vec::new()
        }

        fn set_param(&mut self, key: &str, _value: &str) -> Result<(), ConfigError> {
            Err(ConfigError::UnknownParam(key.to_string()))
        }

        fn select(&self, table: &CleanedTable) -> FeatureSelection {
            let names = table.feature_names().to_vec();
            FeatureSelection {
                correlations: FeatureCorrelationTable::new(names.iter().map(|n| (n.clone(), 1.0)).collect()),
                selected: SelectedFeatureSet::new(names.clone(), (0..names.len()).collect()),
                threshold: 0.0,
            }
        }
    }

    #[test]
    fn custom_selector_replaces_the_correlation_filter() {
        let pipeline = PipelineBuilder::new()
            .feature_selector(Box::new(KeepAll))
            .threshold(0.9)
            .build()
            .unwrap();
        let info = pipeline.info();
        assert_eq!(info.selector, "Keep All");
        assert_eq!(info.selection_metric, "Score");
    }
}
