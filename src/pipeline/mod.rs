pub mod builder;
pub mod pipeline;
pub mod split;

pub use builder::PipelineBuilder;
pub use pipeline::{PipelineInfo, TrainedContext, TrainingPipeline};
pub use split::{train_test_split, TrainTestSplit};
