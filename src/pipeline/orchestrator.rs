// src/pipeline/orchestrator.rs
use super::config::{OutputFormat, PipelineConfig};
use crate::dispatch::DownloadDispatcher;
use crate::error::PipelineError;
use casedoc_layout::FontResourceCache;
use casedoc_render_core::DocumentRenderer;
use casedoc_render_lopdf::{LayoutReport, PaginatedDocumentRenderer};
use casedoc_render_markdown::MarkdownRenderer;
use casedoc_types::CaseRecord;
use std::path::PathBuf;
use std::sync::Arc;

/// Renders case records and saves them for download.
///
/// Owns the font cache for its lifetime; the font is fetched on the first PDF
/// render and reused by every later one.
pub struct CaseReportPipeline {
    config: PipelineConfig,
    fonts: Arc<FontResourceCache>,
    dispatcher: DownloadDispatcher,
    markdown: MarkdownRenderer,
}

impl CaseReportPipeline {
    pub(crate) fn new(
        config: PipelineConfig,
        fonts: Arc<FontResourceCache>,
        dispatcher: DownloadDispatcher,
    ) -> Self {
        Self {
            config,
            fonts,
            dispatcher,
            markdown: MarkdownRenderer::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn font_cache(&self) -> &Arc<FontResourceCache> {
        &self.fonts
    }

    pub fn dispatcher(&self) -> &DownloadDispatcher {
        &self.dispatcher
    }

    pub fn render_markdown(&self, record: &CaseRecord) -> String {
        self.markdown.render(record)
    }

    /// A PDF renderer bound to the report font, or to the built-in font when
    /// the report font cannot be loaded.
    pub async fn pdf_renderer(&self) -> PaginatedDocumentRenderer {
        let font = self
            .fonts
            .acquire_or_default(&self.config.font_path, &self.config.font_name)
            .await;
        PaginatedDocumentRenderer::new(font, self.config.layout)
    }

    pub async fn render_pdf(&self, record: &CaseRecord) -> Result<Vec<u8>, PipelineError> {
        Ok(self.pdf_renderer().await.render(record)?)
    }

    pub async fn render_pdf_with_report(
        &self,
        record: &CaseRecord,
    ) -> Result<(Vec<u8>, LayoutReport), PipelineError> {
        Ok(self.pdf_renderer().await.render_with_report(record)?)
    }

    /// Renders with `renderer` and saves under the conventional file name.
    pub fn save_with(
        &self,
        renderer: &dyn DocumentRenderer,
        record: &CaseRecord,
    ) -> Result<PathBuf, PipelineError> {
        let payload = renderer.render(record)?;
        let filename = self.dispatcher.file_name(record, renderer.extension());
        Ok(self.dispatcher.save(&payload, &filename)?)
    }

    pub fn save_markdown(&self, record: &CaseRecord) -> Result<PathBuf, PipelineError> {
        self.save_with(&self.markdown, record)
    }

    pub async fn save_pdf(&self, record: &CaseRecord) -> Result<PathBuf, PipelineError> {
        let renderer = self.pdf_renderer().await;
        self.save_with(&renderer, record)
    }

    /// Produces the requested artifacts and returns the saved paths.
    pub async fn generate(
        &self,
        record: &CaseRecord,
        format: OutputFormat,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        let mut saved = Vec::new();
        if format.includes_markdown() {
            saved.push(self.save_markdown(record)?);
        }
        if format.includes_pdf() {
            saved.push(self.save_pdf(record).await?);
        }
        Ok(saved)
    }
}
