//! Measurement, wrapping, and pagination primitives for the case report.
//!
//! - `fonts`: the font a render draws with (embedded TrueType or built-in).
//! - `cache`: process-wide single-flight font loading.
//! - `text`: width measurement and greedy line wrapping.
//! - `algorithms::pagination`: the vertical cursor and page-break check.

pub mod algorithms;
pub mod cache;
pub mod config;
pub mod fonts;
pub mod text;

pub use self::algorithms::pagination::{BreakAnalysis, LayoutCursor, check_fit};
pub use self::cache::{FontResourceCache, FontState};
pub use self::config::{LayoutConfig, PageGeometry};
pub use self::fonts::{BUILTIN_FONT_NAME, EmbeddedFont, FontHandle, FontMetrics};
pub use self::text::TextLayoutEngine;
