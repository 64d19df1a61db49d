//! Paginated PDF rendering of case reports using lopdf.
//!
//! Layout happens in one pass against a `LayoutCursor`; the resulting page
//! content streams are then serialized by `StreamingPdfWriter`.

mod helpers;
mod renderer;
mod report;
mod writer;

pub use helpers::{FONT_RESOURCE_NAME, OutlineEntry, pdf_date};
pub use renderer::PaginatedDocumentRenderer;
pub use report::{BlockKind, BlockPlacement, LayoutReport, PageReport};
pub use writer::StreamingPdfWriter;
