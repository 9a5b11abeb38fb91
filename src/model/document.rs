//! Document-level output types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FontStyle, FontWeight, GraphicElement, HexColor, Region};

/// The structured model of an analyzed resume.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    /// Pages in document order
    pub pages: Vec<PageLayout>,

    /// Distinct fonts, in order of first appearance
    pub fonts: Vec<FontDescriptor>,

    /// Heading/body font assignment
    pub font_roles: FontRoles,

    /// Detected section order and heading labels
    pub section_structure: SectionStructure,

    /// Entry layout hints for education, experience and projects
    pub entry_formats: BTreeMap<SectionName, EntryFormat>,

    /// Representative colors
    pub color_palette: ColorPalette,

    /// Region-to-section grouping in reading order
    pub sections: Vec<SectionGroup>,
}

impl LayoutDocument {
    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Check if the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All regions in reading order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.pages.iter().flat_map(|p| p.text_regions.iter())
    }

    /// Look up a region by its document-wide index.
    pub fn region(&self, index: u32) -> Option<&Region> {
        self.regions().find(|r| r.index == index)
    }

    /// Look up a font by raw id.
    pub fn font(&self, raw_id: &str) -> Option<&FontDescriptor> {
        self.fonts.iter().find(|f| f.raw_id == raw_id)
    }

    /// The group a section's regions were mapped into.
    pub fn section(&self, key: SectionKey) -> Option<&SectionGroup> {
        self.sections.iter().find(|g| g.key == key)
    }

    /// Plain text of the whole document, one region per line.
    pub fn plain_text(&self) -> String {
        self.regions()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One analyzed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points
    pub width: f64,

    /// Page height in points
    pub height: f64,

    /// Text regions in reading order
    pub text_regions: Vec<Region>,

    /// Painted shapes in emission order
    pub graphics: Vec<GraphicElement>,
}

impl PageLayout {
    /// Create an empty page.
    pub fn new(number: u32, width: f64, height: f64) -> Self {
        Self {
            number,
            width,
            height,
            text_regions: Vec::new(),
            graphics: Vec::new(),
        }
    }

    /// Horizontal rules on the page (section separators).
    pub fn separators(&self) -> impl Iterator<Item = &GraphicElement> {
        self.graphics.iter().filter(|g| g.is_horizontal_rule())
    }
}

/// A distinct font seen in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDescriptor {
    /// Reference as emitted by the decoder
    pub raw_id: String,
    /// Name after subset/generic prefix removal, or `"unknown"`
    pub cleaned_name: String,
    /// Size at first sighting
    pub size: f64,
    /// Weight inferred from the name
    pub weight: FontWeight,
    /// Style inferred from the name
    pub style: FontStyle,
    /// CSS font-family stack
    pub mapped_family: String,
}

/// Heading and body font choices, by raw id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontRoles {
    /// Font used for headings
    pub heading: Option<String>,
    /// Font used for body text
    pub body: Option<String>,
}

/// Canonical resume sections.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SectionName {
    /// Summary / profile / objective
    Summary,
    /// Work experience
    Experience,
    /// Skills
    Skills,
    /// Education
    Education,
    /// Projects
    Projects,
    /// Awards and honors
    Awards,
    /// Certifications
    Certifications,
}

impl SectionName {
    /// All sections in table order.
    pub const ALL: [SectionName; 7] = [
        SectionName::Summary,
        SectionName::Experience,
        SectionName::Skills,
        SectionName::Education,
        SectionName::Projects,
        SectionName::Awards,
        SectionName::Certifications,
    ];

    /// Order used when nothing can be detected.
    pub const DEFAULT_ORDER: [SectionName; 5] = [
        SectionName::Summary,
        SectionName::Experience,
        SectionName::Skills,
        SectionName::Education,
        SectionName::Projects,
    ];

    /// Lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Summary => "summary",
            SectionName::Experience => "experience",
            SectionName::Skills => "skills",
            SectionName::Education => "education",
            SectionName::Projects => "projects",
            SectionName::Awards => "awards",
            SectionName::Certifications => "certifications",
        }
    }

    /// Heading label used when the document provides none.
    pub fn title(&self) -> &'static str {
        match self {
            SectionName::Summary => "Summary",
            SectionName::Experience => "Experience",
            SectionName::Skills => "Skills",
            SectionName::Education => "Education",
            SectionName::Projects => "Projects",
            SectionName::Awards => "Awards",
            SectionName::Certifications => "Certifications",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detected section order and literal headings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStructure {
    /// Sections in document order
    pub sections_order: Vec<SectionName>,
    /// Heading text as written in the document
    pub section_names: BTreeMap<SectionName, String>,
}

impl SectionStructure {
    /// Position of a section in the detected order.
    pub fn position(&self, section: SectionName) -> Option<usize> {
        self.sections_order.iter().position(|s| *s == section)
    }

    /// Check whether a section was detected.
    pub fn contains(&self, section: SectionName) -> bool {
        self.position(section).is_some()
    }
}

/// A field within a repeated section entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    /// Degree name
    Degree,
    /// School or university
    Institution,
    /// Job or project title
    Title,
    /// Employer
    Company,
    /// Technology list
    Technologies,
    /// `City, ST`
    Location,
    /// Date range
    Dates,
    /// Grade average
    Gpa,
    /// Free-text description
    Description,
    /// Bullet list
    Bullets,
}

/// Inferred layout convention of one section's entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryFormat {
    /// Fields in the order they appear within an entry
    pub field_order: Vec<FieldName>,
    /// Dates are set flush right, beside other text
    pub dates_on_right: bool,
    /// Entries use bullet lists
    pub has_bullets: bool,
    /// Bullet glyph
    pub bullet_char: char,
    /// The title line also carries a secondary column (technologies, company)
    pub title_with_secondary_on_same_line: bool,
    /// Location follows the institution (education only)
    pub location_after_institution: bool,
    /// Left offset of the first bullet relative to the section's left edge
    pub bullet_indent: Option<f64>,
}

/// Palette as detected; absent buckets stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    /// Accent color
    pub primary: Option<HexColor>,
    /// Body text color
    pub text: Option<HexColor>,
    /// Secondary text color
    pub muted: Option<HexColor>,
}

/// Grouping key produced by the section mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    /// Name and contact block before the first heading
    ContactInfo,
    /// Summary section
    Summary,
    /// Experience section
    Experience,
    /// Skills section
    Skills,
    /// Education section
    Education,
    /// Projects section
    Projects,
    /// Awards section
    Awards,
    /// Certifications section
    Certifications,
    /// Anything that could not be placed
    Other,
}

impl SectionKey {
    /// Identifier as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::ContactInfo => "contactInfo",
            SectionKey::Summary => "summary",
            SectionKey::Experience => "experience",
            SectionKey::Skills => "skills",
            SectionKey::Education => "education",
            SectionKey::Projects => "projects",
            SectionKey::Awards => "awards",
            SectionKey::Certifications => "certifications",
            SectionKey::Other => "other",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SectionName> for SectionKey {
    fn from(section: SectionName) -> Self {
        match section {
            SectionName::Summary => SectionKey::Summary,
            SectionName::Experience => SectionKey::Experience,
            SectionName::Skills => SectionKey::Skills,
            SectionName::Education => SectionKey::Education,
            SectionName::Projects => SectionKey::Projects,
            SectionName::Awards => SectionKey::Awards,
            SectionName::Certifications => SectionKey::Certifications,
        }
    }
}

/// Regions assigned to one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionGroup {
    /// Section key
    pub key: SectionKey,
    /// Member regions in reading order
    pub regions: Vec<MappedRegion>,
}

/// A region reference inside a section group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedRegion {
    /// Region index
    pub index: u32,
    /// The region is the section's heading
    pub is_header: bool,
}
