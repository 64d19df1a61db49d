use serde::{Deserialize, Serialize};

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
}

impl PageGeometry {
    /// A4 portrait with 20mm margins.
    pub fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margin_top: 56.69,
            margin_right: 56.69,
            margin_bottom: 56.69,
            margin_left: 56.69,
        }
    }

    pub fn content_width(&self) -> f32 {
        (self.width - self.margin_left - self.margin_right).max(0.0)
    }

    /// Lowest y (measured from the top edge) that content may reach.
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin_bottom
    }

    pub fn content_height(&self) -> f32 {
        (self.bottom_limit() - self.margin_top).max(0.0)
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Font sizes and vertical spacing for the paginated report.
///
/// All distances are in points. Deserializable so a deployment can tune the
/// report without a rebuild; missing keys keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page: PageGeometry,

    pub title_font_size: f32,
    pub subtitle_font_size: f32,
    pub body_font_size: f32,
    pub metadata_font_size: f32,

    /// Line height as a multiple of the font size.
    pub line_height_factor: f32,

    /// Space below the title block.
    pub title_gap: f32,
    /// Space between consecutive metadata pairs.
    pub metadata_spacing: f32,
    /// Horizontal space between a label and its value.
    pub label_gap: f32,
    /// Space between a section heading and its body.
    pub subtitle_gap: f32,
    /// Space below each narrative section.
    pub section_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page: PageGeometry::a4(),
            title_font_size: 20.0,
            subtitle_font_size: 14.0,
            body_font_size: 11.0,
            metadata_font_size: 10.0,
            line_height_factor: 1.15,
            title_gap: 10.0,
            metadata_spacing: 3.0,
            label_gap: 6.0,
            subtitle_gap: 4.0,
            section_gap: 12.0,
        }
    }
}

impl LayoutConfig {
    pub fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.line_height_factor
    }
}
