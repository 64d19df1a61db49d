//! Deterministic Markdown and paginated PDF rendering of incident case reports.
//!
//! `CaseReportPipeline` is the composition root: it owns the shared font
//! cache, the renderers and the `DownloadDispatcher` that saves the results.
//!
//! ```no_run
//! use casedoc::{CaseRecord, OutputFormat, PipelineBuilder, Severity, Status};
//!
//! # async fn run() -> Result<(), casedoc::PipelineError> {
//! let record = CaseRecord::new("Pump failure", "Utilities", Severity::High, Status::Open);
//! let pipeline = PipelineBuilder::new()
//!     .with_font_dir("assets")
//!     .with_output_dir("reports")
//!     .build()?;
//! let saved = pipeline.generate(&record, OutputFormat::Both).await?;
//! # Ok(())
//! # }
//! ```

pub mod dispatch;
mod error;
pub mod pipeline;

pub use casedoc_layout::{FontResourceCache, FontState, LayoutConfig, PageGeometry};
pub use casedoc_render_lopdf::LayoutReport;
pub use casedoc_types::{CaseRecord, Severity, Status};
pub use dispatch::{DispatchError, DownloadDispatcher};
pub use error::PipelineError;
pub use pipeline::{
    CaseReportPipeline, DEFAULT_FONT_NAME, DEFAULT_FONT_PATH, OutputFormat, PipelineBuilder,
    PipelineConfig,
};
