//! PDF content assertion helpers for integration tests.
//!
//! Text extraction goes through lopdf, so assertions should only name strings
//! that the renderer keeps on a single line.

use lopdf::{Document, Object};

/// Extract all text content from a PDF document, one entry per page.
pub fn extract_text(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .keys()
        .map(|page_num| doc.extract_text(&[*page_num]).unwrap_or_default())
        .collect()
}

/// Check if the PDF contains specific text on any page.
pub fn contains_text(doc: &Document, needle: &str) -> bool {
    extract_text(doc).iter().any(|text| text.contains(needle))
}

/// Zero-based indices of the pages whose text contains `needle`.
pub fn pages_containing(doc: &Document, needle: &str) -> Vec<usize> {
    extract_text(doc)
        .iter()
        .enumerate()
        .filter(|(_, text)| text.contains(needle))
        .map(|(i, _)| i)
        .collect()
}

/// `BaseFont` names referenced by the page resources.
pub fn extract_font_names(doc: &Document) -> Vec<String> {
    let mut names = Vec::new();
    for page_id in doc.get_pages().values() {
        let Ok(page) = doc.get_dictionary(*page_id) else {
            continue;
        };
        let Ok(resources) = page.get(b"Resources").and_then(|r| resolve_dict(doc, r)) else {
            continue;
        };
        let Ok(fonts) = resources.get(b"Font").and_then(|f| resolve_dict(doc, f)) else {
            continue;
        };
        for (_, font_ref) in fonts.iter() {
            let Ok(font) = resolve_dict(doc, font_ref) else {
                continue;
            };
            if let Ok(Object::Name(name)) = font.get(b"BaseFont") {
                let name = String::from_utf8_lossy(name).to_string();
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
    }
    names
}

fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> lopdf::Result<&'a lopdf::Dictionary> {
    match obj {
        Object::Reference(id) => doc.get_dictionary(*id),
        other => other.as_dict(),
    }
}

/// Assert that the PDF contains the given text.
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        assert!(
            $crate::common::pdf_assertions::contains_text(&$pdf.doc, $text),
            "PDF does not contain expected text: '{}'\nActual text: {:?}",
            $text,
            $crate::common::pdf_assertions::extract_text(&$pdf.doc)
        );
    };
}

/// Assert that the PDF does not contain the given text.
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        assert!(
            !$crate::common::pdf_assertions::contains_text(&$pdf.doc, $text),
            "PDF unexpectedly contains text: '{}'",
            $text
        );
    };
}

/// Assert the exact page count of the PDF.
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert the PDF has at least the given number of pages.
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}

/// Assert that the PDF references a font by `BaseFont` name.
#[macro_export]
macro_rules! assert_pdf_has_font {
    ($pdf:expr, $font:expr) => {
        let fonts = $crate::common::pdf_assertions::extract_font_names(&$pdf.doc);
        assert!(
            fonts.iter().any(|f| f.contains($font)),
            "PDF does not use font '{}'. Fonts found: {:?}",
            $font,
            fonts
        );
    };
}
