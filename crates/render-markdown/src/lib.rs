//! Markdown rendering of case reports.
//!
//! The document always carries every field: absent values print as `N/A`, so
//! the Markdown output has a fixed shape regardless of how complete the
//! record is.

use casedoc_render_core::sections::{metadata_fields, operational_fields, verdict_parts};
use casedoc_render_core::{
    DocumentRenderer, Field, NARRATIVE_SECTIONS, NO_VERDICT_PLACEHOLDER, NOT_AVAILABLE,
    OPERATIONAL_HEADING, RenderError, VERDICT_HEADING, validate_record,
};
use casedoc_types::CaseRecord;
use regex::Regex;
use std::sync::LazyLock;

// A newline followed by three or more blank (whitespace-only) lines.
static RE_EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n){3,}").unwrap());

/// Renders a `CaseRecord` as a Markdown document.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, record: &CaseRecord) -> String {
        let mut out = String::new();

        out.push_str(&format!("# {}\n\n", record.title.trim()));
        push_fields(&mut out, &metadata_fields(record));
        out.push_str("\n---\n\n");

        for section in NARRATIVE_SECTIONS {
            let body = section.text(record).map(str::trim).unwrap_or(NOT_AVAILABLE);
            push_section(&mut out, section.heading(), body);
        }

        let parts = verdict_parts(record);
        let verdict_body = if parts.is_empty() {
            NO_VERDICT_PLACEHOLDER.to_string()
        } else {
            parts
                .iter()
                .map(|(label, text)| format!("**{}:** {}", label, text.trim()))
                .collect::<Vec<_>>()
                .join("\n\n")
        };
        push_section(&mut out, VERDICT_HEADING, &verdict_body);

        out.push_str(&format!("## {}\n\n", OPERATIONAL_HEADING));
        push_fields(&mut out, &operational_fields(record));

        finalize(&out)
    }
}

fn push_fields(out: &mut String, fields: &[Field]) {
    for field in fields {
        out.push_str(&format!("- **{}:** {}\n", field.label, field.value_or_na()));
    }
}

fn push_section(out: &mut String, heading: &str, body: &str) {
    out.push_str(&format!("## {}\n\n{}\n\n", heading, body));
}

/// Collapses excess blank lines and ends the document with one newline.
fn finalize(raw: &str) -> String {
    let collapsed = RE_EXCESS_BLANK_LINES.replace_all(raw, "\n\n\n");
    let mut out = collapsed.trim_end().to_string();
    out.push('\n');
    out
}

impl DocumentRenderer for MarkdownRenderer {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn mime_type(&self) -> &'static str {
        "text/markdown"
    }

    fn render(&self, record: &CaseRecord) -> Result<Vec<u8>, RenderError> {
        validate_record(record)?;
        let markdown = MarkdownRenderer::render(self, record);
        log::debug!("Rendered Markdown report ({} bytes)", markdown.len());
        Ok(markdown.into_bytes())
    }
}
