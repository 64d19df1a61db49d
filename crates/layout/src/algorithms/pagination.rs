use crate::config::PageGeometry;

// Tolerance for floating point noise when comparing against the bottom limit.
const EPSILON: f32 = 0.01;

pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Checks whether a block of `needed` height fits below `cursor_y`.
///
/// * `cursor_y`: current position measured from the top edge of the page.
/// * `needed`: the required height for the block.
/// * `bottom_limit`: lowest y content may reach (page height minus bottom margin).
pub fn check_fit(cursor_y: f32, needed: f32, bottom_limit: f32) -> BreakAnalysis {
    let available = (bottom_limit - cursor_y).max(0.0);
    BreakAnalysis {
        should_break: needed > available + EPSILON,
        remaining_height: available,
    }
}

/// Vertical write position across a sequence of pages.
///
/// y grows downward from the top edge of the page. A break resets the cursor to
/// the top margin of the next page.
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    geometry: PageGeometry,
    y: f32,
    page_index: usize,
}

impl LayoutCursor {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            y: geometry.margin_top,
            page_index: 0,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// True when nothing has been placed on the current page yet.
    pub fn at_page_top(&self) -> bool {
        self.y <= self.geometry.margin_top + EPSILON
    }

    pub fn fits(&self, needed: f32) -> bool {
        !check_fit(self.y, needed, self.geometry.bottom_limit()).should_break
    }

    pub fn new_page(&mut self) {
        self.page_index += 1;
        self.y = self.geometry.margin_top;
    }

    /// Starts a new page if `needed` does not fit below the cursor.
    ///
    /// A fresh page is never abandoned: a block taller than a whole page starts
    /// at the top and is continued line by line by the caller. Returns whether
    /// a break happened.
    pub fn ensure_space(&mut self, needed: f32) -> bool {
        if self.fits(needed) || self.at_page_top() {
            return false;
        }
        self.new_page();
        true
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }
}
