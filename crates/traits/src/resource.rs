//! FontSource trait for abstracting where the font binary comes from.
//!
//! The renderer never reads the network or the filesystem directly; it asks a
//! `FontSource` for the bytes behind a resource path.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for resource loading operations.
///
/// Cloneable so that one failed fetch can be handed to every caller that was
/// waiting on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),

    #[error("Network error fetching '{path}': {message}")]
    Network { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

/// A source of binary font resources.
///
/// Implementations:
/// - `InMemoryFontSource`: pre-populated bytes (tests, embedded assets)
/// - `FilesystemFontSource` (casedoc-resource): a static asset directory
/// - `HttpFontSource` (casedoc-resource): a static asset URL
///
/// Timeouts are the implementation's concern; callers only see the outcome.
#[async_trait]
pub trait FontSource: Send + Sync + Debug {
    /// Fetch the resource stored under `path`.
    async fn fetch(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    /// Returns a human-readable name for this source (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory font source.
///
/// Resources must be added before they are fetched. Works in any environment.
#[derive(Debug, Default)]
pub struct InMemoryFontSource {
    resources: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryFontSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource to the in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let path_string = path.into();
        let mut resources = self
            .resources
            .write()
            .map_err(|_| ResourceError::LoadFailed {
                path: path_string.clone(),
                message: "resource store lock poisoned".to_string(),
            })?;
        resources.insert(path_string, Arc::new(data));
        Ok(())
    }
}

#[async_trait]
impl FontSource for InMemoryFontSource {
    async fn fetch(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let resources = self
            .resources
            .read()
            .map_err(|_| ResourceError::LoadFailed {
                path: path.to_string(),
                message: "resource store lock poisoned".to_string(),
            })?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn name(&self) -> &'static str {
        "InMemoryFontSource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_source_add_and_fetch() {
        let source = InMemoryFontSource::new();
        source.add("fonts/a.ttf", b"font bytes".to_vec()).unwrap();

        let data = source.fetch("fonts/a.ttf").await.unwrap();
        assert_eq!(&*data, b"font bytes");
    }

    #[tokio::test]
    async fn test_in_memory_source_not_found() {
        let source = InMemoryFontSource::new();
        let result = source.fetch("missing.ttf").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_in_memory_source_overwrite() {
        let source = InMemoryFontSource::new();
        source.add("f.ttf", b"original".to_vec()).unwrap();
        source.add("f.ttf", b"updated".to_vec()).unwrap();
        assert_eq!(&*source.fetch("f.ttf").await.unwrap(), b"updated");
    }

    #[test]
    fn test_resource_error_display() {
        let err = ResourceError::LoadFailed {
            path: "file.ttf".to_string(),
            message: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("file.ttf"));
        assert!(err.to_string().contains("permission denied"));

        let err = ResourceError::Network {
            path: "https://cdn/x.ttf".to_string(),
            message: "HTTP 503".to_string(),
        };
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn test_resource_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let resource_err: ResourceError = io_err.into();
        assert!(matches!(resource_err, ResourceError::Io(_)));
        assert!(resource_err.to_string().contains("file not found"));
    }
}
