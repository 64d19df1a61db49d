//! Filesystem-based font source for native platforms.
//!
//! Fonts are served from a static asset directory, the native stand-in for a
//! web application's public font folder.
//!
//! # Security
//!
//! The source validates that all resolved paths remain within the base path
//! to prevent directory traversal attacks (e.g., `../../../etc/passwd`).

use async_trait::async_trait;
use casedoc_traits::{FontSource, ResourceError, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// A font source that reads fonts from the local filesystem.
#[derive(Debug)]
pub struct FilesystemFontSource {
    base_path: PathBuf,
    /// Canonicalized base path for security checks
    canonical_base: Option<PathBuf>,
}

impl FilesystemFontSource {
    /// Creates a new source rooted at `base_path`.
    ///
    /// The base path is canonicalized up front; it may not exist yet.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    /// Resolves and validates a resource path relative to the base path.
    ///
    /// Returns `None` if the path would escape the base directory.
    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        // A leading slash means "site root", which is our base directory.
        let relative = path.trim_start_matches('/');
        if relative.is_empty() || Path::new(relative).is_absolute() {
            return None;
        }

        if Path::new(relative)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }

        let full_path = self.base_path.join(relative);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        Some(full_path)
    }
}

#[async_trait]
impl FontSource for FilesystemFontSource {
    async fn fetch(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self
            .resolve_path_safe(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (path traversal blocked)", path)))?;

        log::debug!("Reading font resource from {}", full_path.display());
        tokio::fs::read(&full_path)
            .await
            .map(Arc::new)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ResourceError::NotFound(path.to_string())
                } else {
                    ResourceError::LoadFailed {
                        path: path.to_string(),
                        message: e.to_string(),
                    }
                }
            })
    }

    fn name(&self) -> &'static str {
        "FilesystemFontSource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_filesystem_source_reads_existing_file() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("fonts")).unwrap();
        fs::write(dir.path().join("fonts/regular.ttf"), b"ttf").unwrap();

        let source = FilesystemFontSource::new(dir.path());
        let data = source.fetch("fonts/regular.ttf").await.unwrap();
        assert_eq!(&*data, b"ttf");
    }

    #[tokio::test]
    async fn test_filesystem_source_treats_leading_slash_as_root() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("regular.ttf"), b"ttf").unwrap();

        let source = FilesystemFontSource::new(dir.path());
        assert!(source.fetch("/regular.ttf").await.is_ok());
    }

    #[tokio::test]
    async fn test_filesystem_source_not_found() {
        let dir = tempdir().unwrap();
        let source = FilesystemFontSource::new(dir.path());

        let result = source.fetch("missing.ttf").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_filesystem_source_blocks_path_traversal() {
        let dir = tempdir().unwrap();
        let source = FilesystemFontSource::new(dir.path());

        assert!(source.fetch("../../../etc/passwd").await.is_err());
        assert!(source.fetch("fonts/../../secret").await.is_err());
        assert!(source.fetch("..").await.is_err());
    }
}
