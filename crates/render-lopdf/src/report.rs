/// What a placed block is, for diagnostics and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Title,
    /// A metadata label/value pair, by label.
    Metadata(String),
    /// A section heading, by heading.
    Section(String),
    /// The first line of a section body, by heading.
    SectionBody(String),
    /// A label/value pair inside the operational context section.
    ContextField(String),
}

/// A block and the y offset (top-down, points) at which it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockPlacement {
    pub kind: BlockKind,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageReport {
    pub blocks: Vec<BlockPlacement>,
}

/// Where the paginated renderer placed each block.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutReport {
    pub pages: Vec<PageReport>,
    /// `BaseFont` name of the font the document was drawn with.
    pub font_name: String,
    pub used_fallback_font: bool,
}

impl LayoutReport {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Zero-based page index on which the first block of `kind` starts.
    pub fn page_of(&self, kind: &BlockKind) -> Option<usize> {
        self.pages
            .iter()
            .position(|page| page.blocks.iter().any(|b| &b.kind == kind))
    }

    /// Block kinds in placement order, ignoring pages.
    pub fn block_sequence(&self) -> Vec<&BlockKind> {
        self.pages
            .iter()
            .flat_map(|page| page.blocks.iter().map(|b| &b.kind))
            .collect()
    }
}
