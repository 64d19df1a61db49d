//! Data model shared by every casedoc renderer.
//!
//! The types here carry no rendering behavior; they are the immutable input
//! handed to the renderers by the surrounding application.

pub mod case;
pub mod classification;

pub use case::CaseRecord;
pub use classification::{Severity, Status};
