//! Saving rendered documents ("downloads") to a target directory.
//!
//! Each payload is written to a temporary file next to its destination and
//! then persisted under the final name, so a reader never observes a partly
//! written document. The temporary file is removed on every error path when
//! its handle drops.

use casedoc_types::CaseRecord;
use chrono::{Local, NaiveDate};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// File name stem used when a record has no public identifier.
const FALLBACK_STEM: &str = "case";

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to persist '{path}': {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

#[derive(Debug, Clone)]
pub struct DownloadDispatcher {
    target_dir: PathBuf,
    generation_date: Option<NaiveDate>,
}

impl DownloadDispatcher {
    pub fn new(target_dir: impl AsRef<Path>) -> Self {
        Self {
            target_dir: target_dir.as_ref().to_path_buf(),
            generation_date: None,
        }
    }

    /// Pins the date used in file names instead of today's local date.
    pub fn with_generation_date(mut self, date: NaiveDate) -> Self {
        self.generation_date = Some(date);
        self
    }

    /// `<public_id>_<YYYY-MM-DD>.<extension>`, or `case_<date>.<extension>`.
    pub fn file_name(&self, record: &CaseRecord, extension: &str) -> String {
        let stem = record
            .public_id
            .as_deref()
            .map(sanitize_stem)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FALLBACK_STEM.to_string());
        let date = self
            .generation_date
            .unwrap_or_else(|| Local::now().date_naive());
        format!("{}_{}.{}", stem, date.format("%Y-%m-%d"), extension)
    }

    /// Atomically writes `payload` to `<target_dir>/<filename>`.
    pub fn save(&self, payload: &[u8], filename: &str) -> Result<PathBuf, DispatchError> {
        fs::create_dir_all(&self.target_dir)?;
        let destination = self.target_dir.join(filename);

        let mut staged = NamedTempFile::new_in(&self.target_dir)?;
        staged.write_all(payload)?;
        staged.as_file().sync_all()?;
        staged
            .persist(&destination)
            .map_err(|source| DispatchError::Persist {
                path: destination.clone(),
                source,
            })?;

        log::info!("Saved {} ({} bytes)", destination.display(), payload.len());
        Ok(destination)
    }
}

/// Replaces path separators, reserved and control characters with `-`.
fn sanitize_stem(id: &str) -> String {
    id.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}
