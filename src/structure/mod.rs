//! Document structure: section headings, entry formats and the mapping of
//! regions to sections.

pub mod formats;
pub mod keywords;
pub mod mapper;
pub mod sections;

pub use formats::{default_entry_format, infer_entry_format, infer_entry_formats};
pub use keywords::{is_header_candidate, match_header};
pub use mapper::map_sections;
pub use sections::{detect_sections, DetectedHeader, DetectionStrategy, SectionDetection};
