#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use async_trait::async_trait;
use casedoc_traits::{FontSource, InMemoryFontSource, ResourceError, SharedResourceData};
use lopdf::Document as LopdfDocument;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of one page, 1-based like lopdf's page numbers.
    pub fn page_text(&self, page_number: u32) -> String {
        self.doc.extract_text(&[page_number]).unwrap_or_default()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// A font source that counts fetches and holds each one until released.
#[derive(Debug)]
pub struct GatedFontSource {
    inner: InMemoryFontSource,
    gate: Semaphore,
    fetches: AtomicUsize,
}

impl GatedFontSource {
    /// Starts closed: fetches block until `release` is called.
    pub fn closed() -> Self {
        Self {
            inner: InMemoryFontSource::new(),
            gate: Semaphore::new(0),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Starts open: fetches complete immediately.
    pub fn open() -> Self {
        let source = Self::closed();
        source.release();
        source
    }

    pub fn with_font(self, path: &str, bytes: Vec<u8>) -> Self {
        self.inner.add(path, bytes).unwrap();
        self
    }

    pub fn release(&self) {
        self.gate.add_permits(Semaphore::MAX_PERMITS / 2);
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FontSource for GatedFontSource {
    async fn fetch(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let _permit = self.gate.acquire().await.map_err(|e| ResourceError::LoadFailed {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        self.inner.fetch(path).await
    }

    fn name(&self) -> &'static str {
        "GatedFontSource"
    }
}

/// A font source whose every fetch fails with a network error.
#[derive(Debug, Default)]
pub struct UnreachableFontSource {
    fetches: AtomicUsize,
}

impl UnreachableFontSource {
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FontSource for UnreachableFontSource {
    async fn fetch(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Err(ResourceError::Network {
            path: path.to_string(),
            message: "connection refused".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "UnreachableFontSource"
    }
}

const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Bytes of a TrueType font installed on this machine, if any.
pub fn system_font_bytes() -> Option<Vec<u8>> {
    SYSTEM_FONT_CANDIDATES
        .iter()
        .find_map(|path| std::fs::read(path).ok())
}

pub fn shared<T: FontSource + 'static>(source: T) -> (Arc<T>, Arc<dyn FontSource>) {
    let concrete = Arc::new(source);
    let dynamic: Arc<dyn FontSource> = concrete.clone();
    (concrete, dynamic)
}
