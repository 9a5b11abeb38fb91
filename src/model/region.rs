//! Text region types.

use serde::{Deserialize, Serialize};

use super::HexColor;

/// A merged, bounding-boxed group of tokens representing one text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Position in document reading order (0-based, contiguous)
    pub index: u32,

    /// Page the region was found on (1-indexed)
    pub page_number: u32,

    /// Combined text of the merged tokens
    pub text: String,

    /// Bounding box in screen space
    pub bbox: BoundingBox,

    /// Dominant font
    pub font: RegionFont,

    /// Dominant fill color
    pub color: HexColor,

    /// Text starts with a bullet glyph followed by a space
    pub is_bullet: bool,

    /// The bullet glyph, when `is_bullet` is set
    pub bullet_char: Option<char>,

    /// Bold by font name or by size
    pub is_bold: bool,

    /// Italic by font name
    pub is_italic: bool,

    /// Horizontal alignment on the page
    pub alignment: Alignment,

    /// Vertical distance from the previous region's `bbox.y`
    pub spacing_from_previous: Option<f64>,
}

impl Region {
    /// Trimmed text.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Check whether the region has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Check whether two regions share a baseline.
    ///
    /// Compares `bbox.bottom` (page height minus baseline), which does not
    /// depend on font size the way the top edge does.
    pub fn same_line_as(&self, other: &Region, tolerance: f64) -> bool {
        self.page_number == other.page_number
            && (self.bbox.bottom - other.bbox.bottom).abs() <= tolerance
    }
}

/// Axis-aligned box in screen space (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent (the first token's font size)
    pub height: f64,
    /// Same as `x`
    pub left: f64,
    /// `x + width`
    pub right: f64,
    /// Same as `y`
    pub top: f64,
    /// `y + height`
    pub bottom: f64,
}

impl BoundingBox {
    /// Build a box from its left/top corner and extents.
    ///
    /// Negative extents are clamped to zero so `right >= left` always holds.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        Self {
            x,
            y,
            width,
            height,
            left: x,
            right: x + width,
            top: y,
            bottom: y + height,
        }
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Font attributes attached to a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionFont {
    /// Cleaned font name
    pub name: String,
    /// Reference of the font in the document font list
    pub font_ref: String,
    /// Font size in points
    pub size: f64,
    /// Weight inferred from the name
    pub weight: FontWeight,
    /// Style inferred from the name
    pub style: FontStyle,
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight
    #[default]
    Normal,
    /// Bold or heavier
    Bold,
}

/// Font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright
    #[default]
    Normal,
    /// Italic or oblique
    Italic,
}

/// Horizontal alignment of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left-aligned
    #[default]
    Left,
    /// Centered on the page
    Center,
    /// Right-aligned
    Right,
}
