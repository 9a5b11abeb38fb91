//! Style inference: fonts, colors and the suggestions built from them.

pub mod colors;
pub mod fonts;
mod suggest;

pub use colors::ColorTally;
pub use fonts::{assign_font_roles, clean_font_name, map_font_family, FontCatalog};
pub use suggest::{suggest, ResumeType, StylePalette, Suggestions};
