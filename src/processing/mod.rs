//! Raw table → analysis-ready numeric table, and feature standardization.

pub mod schema;
pub mod label_encoder;
pub mod ohencoder;
pub mod cleaner;
pub mod scaler;

pub use schema::{AttributeLayout, AttributeRule, ColumnLayout, ColumnRole, ColumnSpec, Encoding, Schema, SCHEMA_VERSION};
pub use label_encoder::BinaryEncoder;
pub use ohencoder::OneHotEncoder;
pub use cleaner::{drop_zero_targets, CleanedTable, Cleaner, CleaningReport};
pub use scaler::{FeatureScale, ScalingParameters, StandardScaler};
