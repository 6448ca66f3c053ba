use super::builder::PipelineBuilder;
use super::split::{train_test_split, TrainTestSplit};
use crate::config::PipelineConfig;
use crate::data_loading::RawTable;
use crate::error::{FitError, PipelineError};
use crate::evaluation::{EvaluationMetrics, ModelEvaluator};
use crate::feature_selection_strategies::{FeatureSelection, FeatureSelector};
use crate::models::{FittedModel, LinRegFitter};
use crate::prediction::Predictor;
use crate::processing::{CleanedTable, Cleaner, ScalingParameters, Schema, StandardScaler};
use ndarray::{Array1, Array2, ArrayView1, Axis};

/// Facade over the whole training run: clean → select → split → scale → fit → evaluate.
pub struct TrainingPipeline {
    pub(crate) config: PipelineConfig,
    pub(crate) cleaner: Cleaner,
    pub(crate) selector: Box<dyn FeatureSelector>,
    pub(crate) scaler: StandardScaler,
    pub(crate) fitter: LinRegFitter,
}

impl TrainingPipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn schema(&self) -> &Schema {
        self.cleaner.schema()
    }

    pub fn info(&self) -> PipelineInfo {
        PipelineInfo {
            cleaner: self.cleaner.get_name().to_string(),
            selector: self.selector.get_name().to_string(),
            selection_metric: self.selector.get_metric_name().to_string(),
            scaler: self.scaler.get_name().to_string(),
            model: self.fitter.get_name().to_string(),
            schema_version: self.cleaner.schema().version(),
        }
    }

    pub fn train(&self, raw: &RawTable) -> Result<TrainedContext, PipelineError> {
        let table = self.cleaner.clean(raw)?;

        let selection = self.selector.select(&table);
        if selection.selected.is_empty() {
            return Err(FitError::NoFeatures.into());
        }
        let names = selection.selected.names().to_vec();
        let selected = table.features().select(Axis(1), selection.selected.indices());

        let split = train_test_split(table.num_rows(), self.config.test_fraction, self.config.seed);
        let x_train = selected.select(Axis(0), &split.train);
        let y_train = table.target().select(Axis(0), &split.train);
        let y_test = table.target().select(Axis(0), &split.test);

        let scaling = self.scaler.fit(x_train.view(), &names);
        let standardized = scaling.transform(selected.view());
        let z_train = standardized.select(Axis(0), &split.train);
        let z_test = standardized.select(Axis(0), &split.test);

        let model = self.fitter.fit(z_train.view(), y_train.view(), &names)?;
        let evaluation = ModelEvaluator::evaluate(&model, z_test.view(), y_test.view())?;

        log::info!(
            "Trained on {} rows with {} features; test R2 = {:.4}",
            split.train.len(),
            names.len(),
            evaluation.r2
        );

        Ok(TrainedContext {
            schema: self.cleaner.schema().clone(),
            table,
            selection,
            split,
            scaling,
            model,
            evaluation,
            standardized,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineInfo {
    pub cleaner: String,
    pub selector: String,
    pub selection_metric: String,
    pub scaler: String,
    pub model: String,
    pub schema_version: u32,
}

/// Everything a training run produced. Immutable; predictors borrow it read-only.
#[derive(Debug, Clone)]
pub struct TrainedContext {
    schema: Schema,
    table: CleanedTable,
    selection: FeatureSelection,
    split: TrainTestSplit,
    scaling: ScalingParameters,
    model: FittedModel,
    evaluation: EvaluationMetrics,
    /// All cleaned rows, selected columns, standardized with the training statistics.
    standardized: Array2<f64>,
}

impl TrainedContext {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn table(&self) -> &CleanedTable {
        &self.table
    }

    pub fn selection(&self) -> &FeatureSelection {
        &self.selection
    }

    pub fn split(&self) -> &TrainTestSplit {
        &self.split
    }

    pub fn scaling(&self) -> &ScalingParameters {
        &self.scaling
    }

    pub fn model(&self) -> &FittedModel {
        &self.model
    }

    pub fn evaluation(&self) -> &EvaluationMetrics {
        &self.evaluation
    }

    pub fn standardized(&self) -> &Array2<f64> {
        &self.standardized
    }

    pub fn standardized_row(&self, row: usize) -> Option<ArrayView1<'_, f64>> {
        (row < self.standardized.nrows()).then(|| self.standardized.row(row))
    }

    /// Model predictions for every cleaned row.
    pub fn fitted_values(&self) -> Array1<f64> {
        self.standardized
            .axis_iter(Axis(0))
            .map(|z| self.model.predict_standardized(&z.to_vec()))
            .collect()
    }

    pub fn predictor(&self) -> Predictor<'_> {
        Predictor::new(self)
    }
}
