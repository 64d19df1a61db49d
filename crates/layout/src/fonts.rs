//! Font handles used for measurement and PDF embedding.
//!
//! A render works with exactly one regular-weight font. It is either a
//! TrueType font decoded from fetched bytes (`EmbeddedFont`) or the built-in
//! base-14 Helvetica that needs no resource at all.
//!
//! All text is drawn in WinAnsi encoding, so widths are tabulated per encoded
//! byte (32..=255) in glyph-space units (1/1000 em).

use casedoc_traits::{ResourceError, SharedResourceData};
use std::sync::Arc;

/// First encoded byte with a width entry.
pub const FIRST_CHAR: u8 = 32;
/// Last encoded byte with a width entry.
pub const LAST_CHAR: u8 = 255;

const WIDTH_COUNT: usize = (LAST_CHAR - FIRST_CHAR) as usize + 1;

/// Base font name of the fallback font.
pub const BUILTIN_FONT_NAME: &str = "Helvetica";

/// Helvetica AFM advance widths for WinAnsi bytes 32..=255.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; WIDTH_COUNT] = [
    // 32..=47
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 48..=57
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // 58..=64
    278, 278, 584, 584, 584, 556, 1015,
    // 65..=90
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // 91..=96
    278, 278, 278, 469, 556, 333,
    // 97..=122
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // 123..=127
    334, 260, 334, 584, 556,
    // 128..=159
    556, 556, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 556, 611, 556,
    556, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 556, 500, 667,
    // 160..=191
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 192..=223
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 224..=255
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Unicode code points of WinAnsi bytes 0x80..=0x9F (`None` = undefined).
const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// Encodes text as WinAnsi bytes. Characters outside the code page become `?`.
pub fn encode_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(encode_win_ansi_char).collect()
}

fn encode_win_ansi_char(c: char) -> u8 {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => code as u8,
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|mapped| *mapped == Some(c))
            .map(|i| 0x80 + i as u8)
            .unwrap_or(b'?'),
    }
}

/// Decodes one WinAnsi byte back to its character, if it has one.
pub fn decode_win_ansi(byte: u8) -> Option<char> {
    match byte {
        0x20..=0x7E | 0xA0..=0xFF => Some(byte as char),
        0x80..=0x9F => WIN_ANSI_HIGH[(byte - 0x80) as usize],
        _ => None,
    }
}

/// Vertical metrics in glyph-space units, used for the font descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub cap_height: f32,
    pub bbox: [f32; 4],
}

/// A TrueType font decoded from fetched bytes.
pub struct EmbeddedFont {
    /// Name the font was registered under by the caller.
    pub registered_name: String,
    /// PostScript name read from the font's `name` table.
    pub postscript_name: String,
    /// Raw font program, embedded verbatim as `FontFile2`.
    pub data: SharedResourceData,
    pub metrics: FontMetrics,
    widths: Vec<f32>,
    missing_width: f32,
}

impl std::fmt::Debug for EmbeddedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedFont")
            .field("registered_name", &self.registered_name)
            .field("postscript_name", &self.postscript_name)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl EmbeddedFont {
    /// Parses `data` and tabulates the WinAnsi advance widths.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::InvalidFormat` if the bytes are not a font
    /// ttf-parser can read.
    pub fn decode(data: SharedResourceData, registered_name: &str) -> Result<Self, ResourceError> {
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| {
            ResourceError::InvalidFormat(format!("font '{}': {}", registered_name, e))
        })?;

        let units_per_em = face.units_per_em();
        if units_per_em == 0 {
            return Err(ResourceError::InvalidFormat(format!(
                "font '{}' declares zero units per em",
                registered_name
            )));
        }
        let scale = 1000.0 / units_per_em as f32;

        let advance = |c: char| -> Option<f32> {
            let glyph = face.glyph_index(c)?;
            face.glyph_hor_advance(glyph).map(|w| w as f32 * scale)
        };

        let missing_width = advance(' ').unwrap_or(500.0);
        let widths = (FIRST_CHAR..=LAST_CHAR)
            .map(|byte| decode_win_ansi(byte).and_then(advance).unwrap_or(missing_width))
            .collect();

        let bbox = face.global_bounding_box();
        let metrics = FontMetrics {
            ascent: face.ascender() as f32 * scale,
            descent: face.descender() as f32 * scale,
            cap_height: face
                .capital_height()
                .map(|h| h as f32 * scale)
                .unwrap_or(face.ascender() as f32 * scale),
            bbox: [
                bbox.x_min as f32 * scale,
                bbox.y_min as f32 * scale,
                bbox.x_max as f32 * scale,
                bbox.y_max as f32 * scale,
            ],
        };

        let postscript_name = extract_postscript_name(&face)
            .unwrap_or_else(|| registered_name.replace(' ', ""));

        Ok(Self {
            registered_name: registered_name.to_string(),
            postscript_name,
            data: data.clone(),
            metrics,
            widths,
            missing_width,
        })
    }

    /// Advance width of an encoded byte in 1/1000 em.
    pub fn byte_width(&self, byte: u8) -> f32 {
        if byte < FIRST_CHAR {
            return self.missing_width;
        }
        self.widths
            .get((byte - FIRST_CHAR) as usize)
            .copied()
            .unwrap_or(self.missing_width)
    }

    pub fn widths(&self) -> &[f32] {
        &self.widths
    }
}

/// Extracts the PostScript name, falling back to the full and family names.
fn extract_postscript_name(face: &ttf_parser::Face<'_>) -> Option<String> {
    let find = |id: u16| {
        face.names()
            .into_iter()
            .find(|n| n.name_id == id)
            .and_then(|n| n.to_string())
    };

    if let Some(ps_name) = find(ttf_parser::name_id::POST_SCRIPT_NAME) {
        return Some(ps_name);
    }
    if let Some(full_name) = find(ttf_parser::name_id::FULL_NAME) {
        log::debug!("Using full name as PostScript name: {}", full_name);
        return Some(full_name.replace(' ', ""));
    }
    if let Some(family) = find(ttf_parser::name_id::FAMILY) {
        log::debug!("Using family name as PostScript name: {}", family);
        return Some(family.replace(' ', ""));
    }

    log::warn!("Could not extract any usable name from font data");
    None
}

/// The font a render measures and draws with.
///
/// Cheap to clone; embedded fonts are shared behind an `Arc`.
#[derive(Debug, Clone)]
pub enum FontHandle {
    Embedded(Arc<EmbeddedFont>),
    /// Base-14 Helvetica, used when the font resource is unavailable.
    Builtin,
}

impl FontHandle {
    /// The fallback font.
    pub fn builtin() -> Self {
        FontHandle::Builtin
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, FontHandle::Builtin)
    }

    /// Name used as the PDF `BaseFont`.
    pub fn base_font_name(&self) -> &str {
        match self {
            FontHandle::Embedded(font) => &font.postscript_name,
            FontHandle::Builtin => BUILTIN_FONT_NAME,
        }
    }

    /// Advance width of an encoded byte in 1/1000 em.
    pub fn byte_width(&self, byte: u8) -> f32 {
        match self {
            FontHandle::Embedded(font) => font.byte_width(byte),
            FontHandle::Builtin => {
                if byte < FIRST_CHAR {
                    return 0.0;
                }
                HELVETICA_WIDTHS[(byte - FIRST_CHAR) as usize] as f32
            }
        }
    }
}
