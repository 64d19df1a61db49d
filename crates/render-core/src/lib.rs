//! Core rendering abstractions for the case report.
//!
//! This crate provides what every output format shares:
//! - `DocumentRenderer` trait implemented by each backend
//! - Error types for rendering operations
//! - The canonical section catalog and fallback tokens
//! - Shared value formatting (dates, durations, tags)

mod error;
pub mod sections;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use sections::{
    Field, NARRATIVE_SECTIONS, NO_VERDICT_PLACEHOLDER, NOT_AVAILABLE, NarrativeSection,
    OPERATIONAL_HEADING, VERDICT_HEADING,
};
pub use traits::{DocumentRenderer, validate_record};
