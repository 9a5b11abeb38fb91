//! Quick style suggestions derived from an analyzed document.

use serde::{Deserialize, Serialize};

use super::fonts::DEFAULT_FAMILY;
use crate::model::{HexColor, LayoutDocument, SectionName, SectionStructure};

/// Accent used when no primary color was detected (sage green).
pub fn default_primary() -> HexColor {
    HexColor::from_bytes(0x8a, 0x9a, 0x5b)
}

/// Body text color used when none was detected.
pub fn default_text() -> HexColor {
    HexColor::from_bytes(0x1a, 0x1a, 0x1a)
}

/// Secondary text color used when none was detected.
pub fn default_muted() -> HexColor {
    HexColor::from_bytes(0x6b, 0x72, 0x80)
}

/// Lightweight style summary for previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    /// CSS family stack of the heading font
    pub heading_font: String,
    /// CSS family stack of the body font
    pub body_font: String,
    /// Palette with defaults filled in
    pub palette: StylePalette,
    /// Resume organization
    pub resume_type: ResumeType,
}

/// A complete three-color palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePalette {
    /// Accent color
    pub primary: HexColor,
    /// Body text color
    pub text: HexColor,
    /// Secondary text color
    pub muted: HexColor,
}

impl Default for StylePalette {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            text: default_text(),
            muted: default_muted(),
        }
    }
}

/// How a resume is organized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeType {
    /// Experience leads
    #[default]
    Chronological,
    /// Skills only, no experience section
    Functional,
    /// Skills ahead of experience
    Hybrid,
}

impl ResumeType {
    /// Infer the type from the detected section order.
    pub fn from_structure(structure: &SectionStructure) -> Self {
        let skills = structure.position(SectionName::Skills);
        let experience = structure.position(SectionName::Experience);
        match (skills, experience) {
            (Some(s), Some(e)) if s < e => ResumeType::Hybrid,
            (Some(_), None) => ResumeType::Functional,
            _ => ResumeType::Chronological,
        }
    }
}

/// Build suggestions for a document.
pub fn suggest(document: &LayoutDocument) -> Suggestions {
    let family = |raw_id: Option<&String>| {
        raw_id
            .and_then(|id| document.font(id))
            .map(|f| f.mapped_family.clone())
            .unwrap_or_else(|| DEFAULT_FAMILY.to_string())
    };

    let detected = &document.color_palette;
    Suggestions {
        heading_font: family(document.font_roles.heading.as_ref()),
        body_font: family(document.font_roles.body.as_ref()),
        palette: StylePalette {
            primary: detected.primary.clone().unwrap_or_else(default_primary),
            text: detected.text.clone().unwrap_or_else(default_text),
            muted: detected.muted.clone().unwrap_or_else(default_muted),
        },
        resume_type: ResumeType::from_structure(&document.section_structure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorPalette, FontRoles};
    use crate::style::fonts::describe_font;

    fn structure(order: &[SectionName]) -> SectionStructure {
        SectionStructure {
            sections_order: order.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn test_resume_type() {
        use SectionName::*;
        assert_eq!(
            ResumeType::from_structure(&structure(&[Summary, Skills, Experience])),
            ResumeType::Hybrid
        );
        assert_eq!(
            ResumeType::from_structure(&structure(&[Skills, Projects])),
            ResumeType::Functional
        );
        assert_eq!(
            ResumeType::from_structure(&structure(&[Experience, Skills])),
            ResumeType::Chronological
        );
        assert_eq!(
            ResumeType::from_structure(&structure(&SectionName::DEFAULT_ORDER)),
            ResumeType::Chronological
        );
    }

    #[test]
    fn test_defaults_for_empty_document() {
        let suggestions = suggest(&LayoutDocument::default());
        assert_eq!(suggestions.heading_font, DEFAULT_FAMILY);
        assert_eq!(suggestions.body_font, DEFAULT_FAMILY);
        assert_eq!(suggestions.palette, StylePalette::default());
        assert_eq!(suggestions.palette.primary.as_str(), "#8a9a5b");
        assert_eq!(suggestions.resume_type, ResumeType::Chronological);
    }

    #[test]
    fn test_detected_values_win() {
        let document = LayoutDocument {
            fonts: vec![
                describe_font("h", "ABCDEF+Montserrat-Bold", 16.0),
                describe_font("b", "ABCDEF+Lato-Regular", 10.0),
            ],
            font_roles: FontRoles {
                heading: Some("h".to_string()),
                body: Some("b".to_string()),
            },
            color_palette: ColorPalette {
                primary: HexColor::parse("#336699"),
                ..Default::default()
            },
            ..Default::default()
        };

        let suggestions = suggest(&document);
        assert_eq!(suggestions.heading_font, "Montserrat, Arial, sans-serif");
        assert_eq!(suggestions.body_font, "Lato, Arial, sans-serif");
        assert_eq!(suggestions.palette.primary.as_str(), "#336699");
        assert_eq!(suggestions.palette.text, default_text());
    }
}
