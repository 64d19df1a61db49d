use crate::helpers::{self, FONT_RESOURCE_NAME, OutlineEntry, PageContext};
use crate::report::{BlockKind, BlockPlacement, LayoutReport, PageReport};
use crate::writer::StreamingPdfWriter;
use casedoc_layout::{FontHandle, LayoutConfig, LayoutCursor, TextLayoutEngine};
use casedoc_render_core::sections::{metadata_fields, operational_fields, verdict_parts};
use casedoc_render_core::{
    DocumentRenderer, NARRATIVE_SECTIONS, NO_VERDICT_PLACEHOLDER, OPERATIONAL_HEADING, RenderError,
    VERDICT_HEADING, validate_record,
};
use casedoc_types::CaseRecord;
use chrono::{DateTime, Utc};
use lopdf::{Object, dictionary};
use std::io::Cursor;

const DEFAULT_PRODUCER: &str = concat!("casedoc ", env!("CARGO_PKG_VERSION"));

/// Lays a case record out on fixed-size pages and writes it as a PDF.
///
/// The font is resolved before construction, so rendering itself never waits
/// on I/O and never changes font midway through a document.
#[derive(Debug, Clone)]
pub struct PaginatedDocumentRenderer {
    font: FontHandle,
    config: LayoutConfig,
    creation_date: Option<DateTime<Utc>>,
}

impl PaginatedDocumentRenderer {
    pub fn new(font: FontHandle, config: LayoutConfig) -> Self {
        Self {
            font,
            config,
            creation_date: None,
        }
    }

    /// Pins the `CreationDate` written to the `Info` dictionary.
    pub fn with_creation_date(mut self, at: DateTime<Utc>) -> Self {
        self.creation_date = Some(at);
        self
    }

    /// Renders the record and reports where each block was placed.
    pub fn render_with_report(&self, record: &CaseRecord) -> Result<(Vec<u8>, LayoutReport), RenderError> {
        validate_record(record)?;

        let mut composer = PageComposer::new(&self.font, &self.config);
        composer.title_block(record.title.trim());

        for field in metadata_fields(record) {
            if let Some(value) = &field.value {
                composer.metadata_pair_block(field.label, value);
            }
        }

        for section in NARRATIVE_SECTIONS {
            if let Some(text) = section.text(record) {
                composer.section_block(section.heading(), text);
            }
        }

        let parts = verdict_parts(record);
        let verdict_body = if parts.is_empty() {
            NO_VERDICT_PLACEHOLDER.to_string()
        } else {
            parts
                .iter()
                .map(|(label, text)| format!("{}: {}", label, text.trim()))
                .collect::<Vec<_>>()
                .join("\n\n")
        };
        composer.section_block(VERDICT_HEADING, &verdict_body);

        composer.heading_block(OPERATIONAL_HEADING);
        for field in operational_fields(record) {
            if let Some(value) = &field.value {
                composer.context_pair_block(field.label, value);
            }
        }

        let laid_out = composer.finish();
        log::debug!(
            "Laid out '{}' on {} page(s) using {}",
            record.title.trim(),
            laid_out.pages.len(),
            self.font.base_font_name()
        );

        let report = LayoutReport {
            pages: laid_out.reports,
            font_name: self.font.base_font_name().to_string(),
            used_fallback_font: self.font.is_builtin(),
        };
        let bytes = self.write_pdf(record, laid_out.pages, &laid_out.outline)?;
        Ok((bytes, report))
    }

    fn write_pdf(
        &self,
        record: &CaseRecord,
        pages: Vec<PageContext>,
        outline: &[OutlineEntry],
    ) -> Result<Vec<u8>, RenderError> {
        let geometry = self.config.page;
        let mut writer = StreamingPdfWriter::new(Cursor::new(Vec::new()), "1.7")?;

        let font_dict = helpers::font_dictionary(&mut writer, &self.font);
        writer.set_resources(dictionary! {
            "Font" => dictionary! { FONT_RESOURCE_NAME => font_dict },
        });

        let (pages_id, resources_id) = (writer.pages_id, writer.resources_id);
        let mut page_ids = Vec::with_capacity(pages.len());
        for page in pages {
            let content_id = writer.buffer_content_stream(page.finish())?;
            let page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.0.into(), 0.0.into(), geometry.width.into(), geometry.height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            };
            page_ids.push(writer.buffer_object(Object::Dictionary(page_dict)));
        }

        let outline_root = helpers::build_outlines(&mut writer, outline, &page_ids, geometry.height);
        writer.set_outline_root_id(outline_root);

        let created = self.creation_date.unwrap_or_else(Utc::now);
        writer.set_info(helpers::info_dictionary(record, DEFAULT_PRODUCER, created));
        writer.set_page_ids(page_ids);

        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }
}

impl DocumentRenderer for PaginatedDocumentRenderer {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn mime_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, record: &CaseRecord) -> Result<Vec<u8>, RenderError> {
        self.render_with_report(record).map(|(bytes, _)| bytes)
    }
}

struct LaidOutDocument {
    pages: Vec<PageContext>,
    reports: Vec<PageReport>,
    outline: Vec<OutlineEntry>,
}

/// Per-render layout state: the cursor plus the content accumulated so far.
struct PageComposer<'a> {
    engine: TextLayoutEngine,
    config: &'a LayoutConfig,
    cursor: LayoutCursor,
    pages: Vec<PageContext>,
    reports: Vec<PageReport>,
    outline: Vec<OutlineEntry>,
}

impl<'a> PageComposer<'a> {
    fn new(font: &FontHandle, config: &'a LayoutConfig) -> Self {
        Self {
            engine: TextLayoutEngine::new(font.clone(), config.line_height_factor),
            config,
            cursor: LayoutCursor::new(config.page),
            pages: Vec::new(),
            reports: Vec::new(),
            outline: Vec::new(),
        }
    }

    fn left(&self) -> f32 {
        self.config.page.margin_left
    }

    fn content_width(&self) -> f32 {
        self.config.page.content_width()
    }

    fn page(&mut self) -> &mut PageContext {
        let index = self.cursor.page_index();
        while self.pages.len() <= index {
            self.pages.push(PageContext::new(self.config.page.height));
            self.reports.push(PageReport::default());
        }
        &mut self.pages[index]
    }

    fn place(&mut self, kind: BlockKind) {
        self.page();
        let y = self.cursor.y();
        if let Some(report) = self.reports.get_mut(self.cursor.page_index()) {
            report.blocks.push(BlockPlacement { kind, y });
        }
    }

    fn block_height(&self, lines: usize, font_size: f32) -> f32 {
        lines as f32 * self.config.line_height(font_size)
    }

    /// Draws lines top to bottom, continuing on a new page whenever the next
    /// line would cross the bottom margin.
    fn draw_lines(&mut self, lines: &[String], x: f32, font_size: f32) {
        let line_height = self.config.line_height(font_size);
        for line in lines {
            self.cursor.ensure_space(line_height);
            let top = self.cursor.y();
            self.page().draw_text(line, x, top, font_size);
            self.cursor.advance(line_height);
        }
    }

    fn title_block(&mut self, title: &str) {
        let size = self.config.title_font_size;
        let lines = self.engine.wrap(title, self.content_width(), size);
        self.cursor.ensure_space(self.block_height(lines.len(), size));
        self.place(BlockKind::Title);
        self.draw_lines(&lines, self.left(), size);
        self.cursor.advance(self.config.title_gap);
    }

    /// A label at the left margin with its value wrapped in the remaining width.
    fn metadata_pair_block(&mut self, label: &str, value: &str) {
        let size = self.config.metadata_font_size;
        let label_text = format!("{}:", label);
        let label_width = self.engine.measure_width(&label_text, size);
        let value_x = self.left() + label_width + self.config.label_gap;
        let value_width = (self.content_width() - label_width - self.config.label_gap).max(size);
        let value_lines = self.engine.wrap(value, value_width, size);

        let rows = value_lines.len().max(1);
        self.cursor.ensure_space(self.block_height(rows, size));
        self.place(BlockKind::Metadata(label.to_string()));

        let top = self.cursor.y();
        let left = self.left();
        self.page().draw_text(&label_text, left, top, size);
        if value_lines.is_empty() {
            self.cursor.advance(self.config.line_height(size));
        } else {
            self.draw_lines(&value_lines, value_x, size);
        }
        self.cursor.advance(self.config.metadata_spacing);
    }

    /// A subtitle on its own page-break check. The heading may end a page;
    /// whatever follows gets a check of its own.
    fn heading_block(&mut self, heading: &str) {
        let size = self.config.subtitle_font_size;
        let lines = self.engine.wrap(heading, self.content_width(), size);
        self.cursor.ensure_space(self.block_height(lines.len(), size));

        self.place(BlockKind::Section(heading.to_string()));
        self.outline.push(OutlineEntry {
            title: heading.to_string(),
            page_index: self.cursor.page_index(),
            y: self.cursor.y(),
        });
        self.draw_lines(&lines, self.left(), size);
        self.cursor.advance(self.config.subtitle_gap);
    }

    /// A heading, then its body sized as one block at content width.
    fn section_block(&mut self, heading: &str, body: &str) {
        self.heading_block(heading);

        let size = self.config.body_font_size;
        let lines = self.engine.wrap(body, self.content_width(), size);
        self.cursor.ensure_space(self.block_height(lines.len(), size));
        self.place(BlockKind::SectionBody(heading.to_string()));
        self.draw_lines(&lines, self.left(), size);
        self.cursor.advance(self.config.section_gap);
    }

    /// `Label: value` as a single run from the left margin. Only a run wider
    /// than the content area wraps, and then at the full content width.
    fn context_pair_block(&mut self, label: &str, value: &str) {
        let size = self.config.metadata_font_size;
        let text = format!("{}: {}", label, value.trim());
        let lines = self.engine.wrap(&text, self.content_width(), size);
        self.cursor.ensure_space(self.block_height(lines.len().max(1), size));
        self.place(BlockKind::ContextField(label.to_string()));
        self.draw_lines(&lines, self.left(), size);
        self.cursor.advance(self.config.metadata_spacing);
    }

    fn finish(mut self) -> LaidOutDocument {
        self.page();
        LaidOutDocument {
            pages: self.pages,
            reports: self.reports,
            outline: self.outline,
        }
    }
}
