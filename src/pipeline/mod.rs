mod builder;
mod config;
mod orchestrator;

pub use builder::PipelineBuilder;
pub use config::{DEFAULT_FONT_NAME, DEFAULT_FONT_PATH, OutputFormat, PipelineConfig};
pub use orchestrator::CaseReportPipeline;
