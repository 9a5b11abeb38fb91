//! Analysis options and configuration.

/// Options for analyzing decoded resume pages.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeOptions {
    /// Vertical tolerance for grouping tokens into lines (page units)
    pub line_tolerance: f64,

    /// Horizontal gap at or above which a line splits into separate regions
    pub region_gap: f64,

    /// Horizontal gap above which a space is inserted between merged tokens
    pub space_gap: f64,

    /// Maximum length of a section heading candidate (characters)
    pub header_max_len: usize,

    /// Regions before the first heading that may still count as contact info
    pub contact_region_limit: u32,

    /// Font size a pre-heading region must exceed to count as contact info
    pub contact_min_font_size: f64,

    /// Whether to analyze pages on the rayon pool
    pub parallel: bool,
}

impl AnalyzeOptions {
    /// Create new analyze options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line grouping tolerance.
    pub fn with_line_tolerance(mut self, tolerance: f64) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Set the region split gap.
    pub fn with_region_gap(mut self, gap: f64) -> Self {
        self.region_gap = gap;
        self
    }

    /// Set the space insertion gap.
    pub fn with_space_gap(mut self, gap: f64) -> Self {
        self.space_gap = gap;
        self
    }

    /// Set the maximum heading length.
    pub fn with_header_max_len(mut self, len: usize) -> Self {
        self.header_max_len = len;
        self
    }

    /// Set the contact-info heuristics.
    pub fn with_contact_heuristics(mut self, region_limit: u32, min_font_size: f64) -> Self {
        self.contact_region_limit = region_limit;
        self.contact_min_font_size = min_font_size;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            line_tolerance: 2.0,
            region_gap: 50.0,
            space_gap: 2.0,
            header_max_len: 50,
            contact_region_limit: 5,
            contact_min_font_size: 16.0,
            parallel: true,
        }
    }
}
