pub mod config;
mod helpers;
mod orchestrator;
pub mod report;
mod types;

pub use config::{RunConfig, TimelineConfig};
pub use orchestrator::Pipeline;
pub use types::{
    BatchReport, NoOpReporter, PipelineStage, ProgressReporter, SampleOutcome, SampleRun,
};
