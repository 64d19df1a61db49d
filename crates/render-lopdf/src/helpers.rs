//! Standalone helpers for the PDF structures around the page content: font
//! resources, the document outline and the `Info` dictionary.

use crate::writer::StreamingPdfWriter;
use casedoc_layout::fonts::{FIRST_CHAR, LAST_CHAR, encode_win_ansi};
use casedoc_layout::{EmbeddedFont, FontHandle};
use casedoc_render_core::utils::{flip_y, format_tags};
use casedoc_types::CaseRecord;
use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};
use std::io::{Seek, Write};

/// Resource name of the single document font.
pub const FONT_RESOURCE_NAME: &str = "F1";

// Baseline offset below the top of a line box, as a fraction of the font size.
const BASELINE_RATIO: f32 = 0.8;

// Nonsymbolic, per the PDF font descriptor flag bits.
const FLAG_NONSYMBOLIC: i64 = 1 << 5;

pub fn win_ansi_string(s: &str) -> Object {
    Object::String(encode_win_ansi(s), StringFormat::Literal)
}

/// Builds the font dictionary for `font`, buffering any objects it refers to.
pub fn font_dictionary<W: Write + Seek>(writer: &mut StreamingPdfWriter<W>, font: &FontHandle) -> Dictionary {
    match font {
        FontHandle::Builtin => dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font_name(),
            "Encoding" => "WinAnsiEncoding",
        },
        FontHandle::Embedded(embedded) => embedded_font_dictionary(writer, embedded),
    }
}

fn embedded_font_dictionary<W: Write + Seek>(writer: &mut StreamingPdfWriter<W>, font: &EmbeddedFont) -> Dictionary {
    let file = Stream::new(
        dictionary! { "Length1" => font.data.len() as i64 },
        font.data.to_vec(),
    );
    let file_id = writer.buffer_object(Object::Stream(file));

    let m = &font.metrics;
    let descriptor = dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => font.postscript_name.as_str(),
        "Flags" => FLAG_NONSYMBOLIC,
        "FontBBox" => m.bbox.iter().map(|v| Object::Integer(v.round() as i64)).collect::<Vec<_>>(),
        "ItalicAngle" => 0,
        "Ascent" => m.ascent.round() as i64,
        "Descent" => m.descent.round() as i64,
        "CapHeight" => m.cap_height.round() as i64,
        "StemV" => 80,
        "FontFile2" => file_id,
    };
    let descriptor_id = writer.buffer_object(descriptor.into());

    dictionary! {
        "Type" => "Font",
        "Subtype" => "TrueType",
        "BaseFont" => font.postscript_name.as_str(),
        "FirstChar" => FIRST_CHAR as i64,
        "LastChar" => LAST_CHAR as i64,
        "Widths" => font.widths().iter().map(|w| Object::Integer(w.round() as i64)).collect::<Vec<_>>(),
        "Encoding" => "WinAnsiEncoding",
        "FontDescriptor" => descriptor_id,
    }
}

/// `D:YYYYMMDDHHmmSSZ`
pub fn pdf_date(at: DateTime<Utc>) -> String {
    at.format("D:%Y%m%d%H%M%SZ").to_string()
}

pub fn info_dictionary(record: &CaseRecord, producer: &str, created: DateTime<Utc>) -> Dictionary {
    let mut info = dictionary! {
        "Title" => win_ansi_string(record.title.trim()),
        "Producer" => win_ansi_string(producer),
        "CreationDate" => Object::String(pdf_date(created).into_bytes(), StringFormat::Literal),
    };
    if let Some(id) = record.public_id.as_deref().filter(|id| !id.trim().is_empty()) {
        info.set("Subject", win_ansi_string(id));
    }
    if let Some(tags) = format_tags(&record.tags) {
        info.set("Keywords", win_ansi_string(&tags));
    }
    info
}

/// An outline entry pointing at a y offset (top-down) on a page.
#[derive(Debug, Clone)]
pub struct OutlineEntry {
    pub title: String,
    pub page_index: usize,
    pub y: f32,
}

/// Creates a flat document outline (bookmarks), one item per entry.
///
/// Returns the `ObjectId` of the root `Outlines` dictionary, or `None` when
/// no entry resolves to a page.
pub fn build_outlines<W: Write + Seek>(
    writer: &mut StreamingPdfWriter<W>,
    entries: &[OutlineEntry],
    page_ids: &[ObjectId],
    page_height: f32,
) -> Option<ObjectId> {
    let items: Vec<(ObjectId, &OutlineEntry, ObjectId)> = entries
        .iter()
        .filter_map(|entry| page_ids.get(entry.page_index).map(|page_id| (entry, *page_id)))
        .map(|(entry, page_id)| (writer.new_object_id(), entry, page_id))
        .collect();

    let (first, last) = (items.first()?.0, items.last()?.0);
    let outline_root_id = writer.new_object_id();
    writer.buffer_object_at_id(
        outline_root_id,
        dictionary! {
            "Type" => "Outlines", "First" => first, "Last" => last, "Count" => items.len() as i64,
        }
        .into(),
    );

    for (i, (id, entry, page_id)) in items.iter().enumerate() {
        let dest = vec![
            Object::Reference(*page_id),
            "FitH".into(),
            flip_y(entry.y, page_height).into(),
        ];
        let mut dict = dictionary! {
            "Title" => win_ansi_string(&entry.title),
            "Parent" => outline_root_id,
            "Dest" => dest,
        };
        if i > 0 {
            dict.set("Prev", items[i - 1].0);
        }
        if let Some(next) = items.get(i + 1) {
            dict.set("Next", next.0);
        }
        writer.buffer_object_at_id(*id, dict.into());
    }
    Some(outline_root_id)
}

// --- Internal Page Drawing Context ---

#[derive(Default)]
struct PageState {
    font_size: Option<f32>,
}

/// Accumulates the content stream of one page.
pub struct PageContext {
    page_height: f32,
    content: Content,
    state: PageState,
}

impl PageContext {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: Vec::new() },
            state: PageState::default(),
        }
    }

    pub fn finish(self) -> Content {
        self.content
    }

    fn set_font(&mut self, font_size: f32) {
        if self.state.font_size != Some(font_size) {
            self.content.operations.push(Operation::new(
                "Tf",
                vec![Object::Name(FONT_RESOURCE_NAME.as_bytes().to_vec()), font_size.into()],
            ));
            self.state.font_size = Some(font_size);
        }
    }

    /// Draws one line of text whose line box starts at `top` (top-down).
    pub fn draw_text(&mut self, text: &str, x: f32, top: f32, font_size: f32) {
        if text.trim().is_empty() {
            return;
        }
        self.content.operations.push(Operation::new("BT", vec![]));
        self.set_font(font_size);
        let pdf_y = flip_y(top + font_size * BASELINE_RATIO, self.page_height);
        self.content.operations.push(Operation::new("Td", vec![x.into(), pdf_y.into()]));
        self.content
            .operations
            .push(Operation::new("Tj", vec![win_ansi_string(text)]));
        self.content.operations.push(Operation::new("ET", vec![]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casedoc_types::{Severity, Status};
    use chrono::TimeZone;

    #[test]
    fn test_pdf_date_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(pdf_date(at), "D:20240309140507Z");
    }

    #[test]
    fn test_info_dictionary_skips_absent_subject_and_keywords() {
        let record = CaseRecord::new("Pump failure", "Utilities", Severity::High, Status::Open);
        let info = info_dictionary(&record, "casedoc", Utc::now());
        assert!(info.get(b"Title").is_ok());
        assert!(info.get(b"Subject").is_err());
        assert!(info.get(b"Keywords").is_err());

        let record = record.with_public_id("CASE-1").with_tags(["a"]);
        let info = info_dictionary(&record, "casedoc", Utc::now());
        assert!(info.get(b"Subject").is_ok());
        assert!(info.get(b"Keywords").is_ok());
    }

    #[test]
    fn test_page_context_emits_font_once_per_size() {
        let mut page = PageContext::new(800.0);
        page.draw_text("one", 10.0, 10.0, 11.0);
        page.draw_text("two", 10.0, 30.0, 11.0);
        page.draw_text("   ", 10.0, 50.0, 11.0);
        page.draw_text("three", 10.0, 70.0, 14.0);

        let ops = page.finish().operations;
        let tf_count = ops.iter().filter(|op| op.operator == "Tf").count();
        let tj_count = ops.iter().filter(|op| op.operator == "Tj").count();
        assert_eq!(tf_count, 2);
        assert_eq!(tj_count, 3);
    }
}
