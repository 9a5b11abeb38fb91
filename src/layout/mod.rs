//! Layout reconstruction.
//!
//! Turns decoded pages into positioned text regions and graphic elements:
//! token normalization, line grouping, region building and graphics
//! extraction, orchestrated per page by the analyzer.

mod analyzer;
mod graphics;
mod lines;
mod options;
mod regions;
mod tokens;

pub use analyzer::{analyze_page, analyze_pages, validate_page, PageAnalysis};
pub use graphics::{extract_graphics, GraphicsState};
pub use lines::{group_into_lines, TextLine};
pub use options::AnalyzeOptions;
pub use regions::{build_regions, bullet_char, classify_alignment, PageFrame};
pub use tokens::{normalize_tokens, Token};
