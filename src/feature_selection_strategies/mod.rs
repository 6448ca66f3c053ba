pub mod feature_selector;
pub mod correlation_selector;

pub use feature_selector::{FeatureCorrelationTable, FeatureSelection, FeatureSelector, SelectedFeatureSet};
pub use correlation_selector::{pearson_correlation, CorrelationSelector, DEFAULT_CORRELATION_THRESHOLD};
