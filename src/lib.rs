//! Final-grade regression over the UCI student-performance table.
//!
//! Raw rows are cleaned against an explicit [`Schema`], features are pruned by their
//! Pearson correlation with the grade, standardized, and fitted with ordinary least
//! squares. A [`TrainedContext`] holds every artifact of a run; [`Predictor`] replays
//! the same transforms on a single record and explains the estimate feature by feature.

pub mod config;
pub mod data_loading;
pub mod error;
pub mod evaluation;
pub mod feature_selection_strategies;
pub mod models;
pub mod pipeline;
pub mod prediction;
pub mod processing;
pub mod reporting;

pub use config::PipelineConfig;
pub use data_loading::{CsvDataLoader, DataLoader, DataLoaderFactory, JsonDataLoader, RawRecord, RawTable, RawValue};
pub use error::{ConfigError, DegenerateFeature, EncodingError, FitError, PipelineError, RangeWarning, SchemaError};
pub use evaluation::{EvaluationMetrics, ModelEvaluator};
pub use feature_selection_strategies::{CorrelationSelector, FeatureSelection, FeatureSelector};
pub use models::{FittedModel, LinRegFitter};
pub use pipeline::{PipelineBuilder, TrainedContext, TrainingPipeline};
pub use prediction::{FeatureContribution, PredictionRequest, PredictionResult, Predictor};
pub use processing::{CleanedTable, Cleaner, Schema, StandardScaler};
pub use reporting::ModelReport;
