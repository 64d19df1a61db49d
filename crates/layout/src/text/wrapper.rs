use crate::fonts::{FontHandle, encode_win_ansi};

/// Measures and greedily wraps plain text against one font.
///
/// Widths are additive over encoded bytes (no kerning), so the width of a
/// wrapped line always equals the sum of its tokens and joining spaces.
#[derive(Debug, Clone)]
pub struct TextLayoutEngine {
    font: FontHandle,
    line_height_factor: f32,
}

impl TextLayoutEngine {
    pub fn new(font: FontHandle, line_height_factor: f32) -> Self {
        Self {
            font,
            line_height_factor,
        }
    }

    /// Width of `text` in points at `font_size`.
    pub fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        let units: f32 = encode_win_ansi(text)
            .into_iter()
            .map(|b| self.font.byte_width(b))
            .sum();
        units * font_size / 1000.0
    }

    pub fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.line_height_factor
    }

    /// Splits `text` into lines no wider than `max_width`.
    ///
    /// Breaks only at whitespace. A single token wider than `max_width` is
    /// placed alone on its own line. Explicit newlines are kept as hard breaks
    /// and an empty paragraph yields an empty line. Blank lines at either end
    /// of the text are dropped.
    pub fn wrap(&self, text: &str, max_width: f32, font_size: f32) -> Vec<String> {
        let space_width = self.measure_width(" ", font_size);
        let mut lines = Vec::new();

        for paragraph in text.trim().lines() {
            let mut current = String::new();
            let mut current_width = 0.0;

            for token in paragraph.split_whitespace() {
                let token_width = self.measure_width(token, font_size);
                if current.is_empty() {
                    current.push_str(token);
                    current_width = token_width;
                    continue;
                }

                let candidate = current_width + space_width + token_width;
                if candidate > max_width {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(token);
                    current_width = token_width;
                } else {
                    current.push(' ');
                    current.push_str(token);
                    current_width = candidate;
                }
            }

            lines.push(current);
        }

        lines
    }
}
