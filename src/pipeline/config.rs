use casedoc_layout::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Resource path of the report font, relative to the font source root.
pub const DEFAULT_FONT_PATH: &str = "fonts/case-report-regular.ttf";

/// Name the report font is registered under.
pub const DEFAULT_FONT_NAME: &str = "CaseReportSans";

/// Which artifacts a pipeline run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Pdf,
    #[default]
    Both,
}

impl OutputFormat {
    pub fn includes_markdown(self) -> bool {
        matches!(self, OutputFormat::Markdown | OutputFormat::Both)
    }

    pub fn includes_pdf(self) -> bool {
        matches!(self, OutputFormat::Pdf | OutputFormat::Both)
    }
}

/// Settings of a `CaseReportPipeline`. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory served by the default filesystem font source.
    pub font_dir: PathBuf,
    pub font_path: String,
    pub font_name: String,
    /// Directory rendered documents are saved into.
    pub output_dir: PathBuf,
    pub layout: LayoutConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            font_dir: PathBuf::from("assets"),
            font_path: DEFAULT_FONT_PATH.to_string(),
            font_name: DEFAULT_FONT_NAME.to_string(),
            output_dir: PathBuf::from("."),
            layout: LayoutConfig::default(),
        }
    }
}
