//! Single-record grade estimates from a trained context.

pub mod predictor;
pub mod request;

pub use predictor::{Predictor, GRADE_MINIMUM};
pub use request::{FeatureContribution, PredictionRequest, PredictionResult};
