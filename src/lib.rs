//! # resume-layout
//!
//! Layout reconstruction and style inference for resume PDFs.
//!
//! The library takes pages already decoded by an external PDF decoder
//! (positioned text runs plus the graphics operator list) and rebuilds a
//! structured description of the document: text regions in reading order,
//! separator lines and boxes, the fonts in use and their roles, a color
//! palette, the section order and per-section entry formats.
//!
//! ## Quick Start
//!
//! ```no_run
//! use resume_layout::source::JsonPageSource;
//! use resume_layout::{render, ResumeLayout};
//!
//! fn main() -> resume_layout::Result<()> {
//!     let source = JsonPageSource::open("resume.pages.json")?;
//!     let result = ResumeLayout::new().analyze_source(&source)?;
//!
//!     println!("{}", result.to_json(render::JsonFormat::Pretty)?);
//!     println!("{:?}", result.suggestions().resume_type);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Region building**: line grouping and gap-based region splitting
//! - **Typography**: font deduplication, family mapping, heading/body roles
//! - **Palette**: primary, text and muted color selection
//! - **Structure**: section detection, entry formats, region-to-section mapping
//! - **Parallel processing**: Uses Rayon for multi-page documents

pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod source;
pub mod structure;
pub mod style;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::AnalyzeOptions;
pub use model::{
    Alignment, BoundingBox, ColorPalette, EntryFormat, FieldName, FontDescriptor, FontRoles,
    GraphicElement, HexColor, LayoutDocument, Operator, OperatorCode, PageInput, PageLayout,
    RawTextToken, Region, SectionGroup, SectionKey, SectionName, SectionStructure,
};
pub use render::JsonFormat;
pub use source::{JsonPageSource, PageSource};
pub use style::{ResumeType, StylePalette, Suggestions};

/// Analyze decoded pages with default options.
///
/// # Example
///
/// ```
/// use resume_layout::{analyze, PageInput, RawTextToken, SectionName};
///
/// let mut page = PageInput::letter();
/// page.push_token(RawTextToken::new("EXPERIENCE", 72.0, 740.0, 14.0, "F1"));
///
/// let doc = analyze(&[page]).unwrap();
/// assert_eq!(doc.section_structure.sections_order, vec![SectionName::Experience]);
/// ```
pub fn analyze(pages: &[PageInput]) -> Result<LayoutDocument> {
    analyze_with_options(pages, &AnalyzeOptions::default())
}

/// Analyze decoded pages with custom options.
///
/// # Example
///
/// ```
/// use resume_layout::{analyze_with_options, AnalyzeOptions, PageInput};
///
/// let options = AnalyzeOptions::new().with_region_gap(40.0).sequential();
/// let doc = analyze_with_options(&[PageInput::letter()], &options).unwrap();
/// assert_eq!(doc.page_count(), 1);
/// ```
pub fn analyze_with_options(pages: &[PageInput], options: &AnalyzeOptions) -> Result<LayoutDocument> {
    layout::analyze_pages(pages, options)
}

/// Analyze the pages of a source.
///
/// A decoder failure reported by the source is returned as-is, before any
/// analysis runs.
pub fn analyze_source<S: PageSource + ?Sized>(source: &S) -> Result<LayoutDocument> {
    ResumeLayout::new()
        .analyze_source(source)
        .map(|result| result.document)
}

/// Derive quick style suggestions from an analyzed document.
pub fn suggest(document: &LayoutDocument) -> Suggestions {
    style::suggest(document)
}

/// Builder-style API for layout analysis.
///
/// # Example
///
/// ```no_run
/// use resume_layout::{JsonPageSource, ResumeLayout};
///
/// let outline = ResumeLayout::new()
///     .with_line_tolerance(3.0)
///     .sequential()
///     .analyze_source(&JsonPageSource::open("resume.pages.json")?)?
///     .to_text()?;
/// # Ok::<(), resume_layout::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResumeLayout {
    options: AnalyzeOptions,
}

impl ResumeLayout {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options at once.
    pub fn with_options(mut self, options: AnalyzeOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the vertical tolerance for grouping tokens into lines.
    pub fn with_line_tolerance(mut self, tolerance: f64) -> Self {
        self.options = self.options.with_line_tolerance(tolerance);
        self
    }

    /// Set the horizontal gap that splits a line into regions.
    pub fn with_region_gap(mut self, gap: f64) -> Self {
        self.options = self.options.with_region_gap(gap);
        self
    }

    /// Set the gap above which a space is inserted between tokens.
    pub fn with_space_gap(mut self, gap: f64) -> Self {
        self.options = self.options.with_space_gap(gap);
        self
    }

    /// Set the maximum length of a section heading.
    pub fn with_header_max_len(mut self, len: usize) -> Self {
        self.options = self.options.with_header_max_len(len);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Current options.
    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    /// Analyze in-memory pages.
    pub fn analyze(self, pages: &[PageInput]) -> Result<AnalysisResult> {
        let document = layout::analyze_pages(pages, &self.options)?;
        Ok(AnalysisResult { document })
    }

    /// Pull pages from a source and analyze them.
    pub fn analyze_source<S: PageSource + ?Sized>(self, source: &S) -> Result<AnalysisResult> {
        let pages = source.pages()?;
        log::debug!("{}: {} pages decoded", source.name(), pages.len());
        self.analyze(&pages)
    }
}

/// Result of analyzing a document.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// The analyzed document
    pub document: LayoutDocument,
}

impl AnalysisResult {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Render the section outline.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document)
    }

    /// Quick style suggestions.
    pub fn suggestions(&self) -> Suggestions {
        style::suggest(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &LayoutDocument {
        &self.document
    }
}
