pub mod fitted_model;
pub mod linreg;

pub use fitted_model::FittedModel;
pub use linreg::LinRegFitter;
