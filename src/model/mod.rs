//! Data model for layout analysis.
//!
//! Input types describe what the external PDF decoder hands over; output
//! types form the `LayoutDocument` consumed by template rendering. All of
//! them serialize to camelCase JSON.

mod color;
mod document;
mod graphics;
mod input;
mod region;

pub use color::{HexColor, Rgb};
pub use document::{
    ColorPalette, EntryFormat, FieldName, FontDescriptor, FontRoles, LayoutDocument,
    MappedRegion, PageLayout, SectionGroup, SectionKey, SectionName, SectionStructure,
};
pub use graphics::{GraphicElement, Point};
pub use input::{Operator, OperatorCode, PageInput, PaintTarget, RawFont, RawTextToken};
pub use region::{Alignment, BoundingBox, FontStyle, FontWeight, Region, RegionFont};
