//! The staged full-replace import.

pub mod pipeline;
pub mod stage;

pub use pipeline::{ImportPipeline, PipelineState, RunSummary, StageFailure};
pub use stage::Stage;
