// src/pipeline/builder.rs
use super::config::PipelineConfig;
use super::orchestrator::CaseReportPipeline;
use crate::dispatch::DownloadDispatcher;
use crate::error::PipelineError;
use casedoc_layout::{FontResourceCache, LayoutConfig};
use casedoc_resource::{FilesystemFontSource, HttpFontSource};
use casedoc_traits::FontSource;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;

/// A builder for creating a `CaseReportPipeline`.
#[derive(Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
    font_source: Option<Arc<dyn FontSource>>,
    font_cache: Option<Arc<FontResourceCache>>,
    generation_date: Option<NaiveDate>,
}

impl PipelineBuilder {
    /// Creates a new `PipelineBuilder` with default settings.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the whole configuration, e.g. one deserialized from a file.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Serves fonts from a local directory.
    pub fn with_font_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.font_dir = path.into();
        self.font_source = None;
        self
    }

    /// Serves fonts from a static asset URL.
    pub fn with_font_url(mut self, base_url: impl Into<String>) -> Result<Self, PipelineError> {
        self.font_source = Some(Arc::new(HttpFontSource::new(base_url)?));
        Ok(self)
    }

    /// Uses a caller-supplied font source.
    pub fn with_font_source(mut self, source: Arc<dyn FontSource>) -> Self {
        self.font_source = Some(source);
        self
    }

    /// Shares an existing font cache, so several pipelines fetch the font once.
    ///
    /// Takes precedence over any configured font source.
    pub fn with_font_cache(mut self, cache: Arc<FontResourceCache>) -> Self {
        self.font_cache = Some(cache);
        self
    }

    /// Selects the font resource and the name it is registered under.
    pub fn with_font(mut self, resource_path: impl Into<String>, registered_name: impl Into<String>) -> Self {
        self.config.font_path = resource_path.into();
        self.config.font_name = registered_name.into();
        self
    }

    pub fn with_layout_config(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_dir = path.into();
        self
    }

    /// Pins the date used in saved file names.
    pub fn with_generation_date(mut self, date: NaiveDate) -> Self {
        self.generation_date = Some(date);
        self
    }

    /// Consumes the builder and creates the `CaseReportPipeline`.
    pub fn build(self) -> Result<CaseReportPipeline, PipelineError> {
        if self.config.font_path.trim().is_empty() {
            return Err(PipelineError::Config("font path must not be empty".to_string()));
        }
        let layout = &self.config.layout;
        if layout.page.content_width() <= 0.0 || layout.page.content_height() <= 0.0 {
            return Err(PipelineError::Config(
                "page margins leave no room for content".to_string(),
            ));
        }

        let fonts = match self.font_cache {
            Some(cache) => cache,
            None => {
                let source = self.font_source.unwrap_or_else(|| {
                    log::debug!("Using filesystem font source at {}", self.config.font_dir.display());
                    let source: Arc<dyn FontSource> =
                        Arc::new(FilesystemFontSource::new(&self.config.font_dir));
                    source
                });
                Arc::new(FontResourceCache::new(source))
            }
        };

        let mut dispatcher = DownloadDispatcher::new(&self.config.output_dir);
        if let Some(date) = self.generation_date {
            dispatcher = dispatcher.with_generation_date(date);
        }

        Ok(CaseReportPipeline::new(self.config, fonts, dispatcher))
    }
}
