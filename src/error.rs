// src/error.rs
use crate::dispatch::DispatchError;
use casedoc_render_core::RenderError;
use casedoc_traits::ResourceError;
use thiserror::Error;

/// A comprehensive error type for the case report pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Saving failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Font resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Invalid case record JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
