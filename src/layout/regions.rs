//! Region building.
//!
//! Each line is split into regions wherever the horizontal gap between
//! tokens reaches the region gap. A region carries its combined text, a
//! screen-space bounding box, the style of its dominant token, alignment and
//! the bullet/bold/italic flags.

use lazy_static::lazy_static;
use regex::Regex;

use super::lines::TextLine;
use super::options::AnalyzeOptions;
use super::tokens::Token;
use crate::model::{Alignment, BoundingBox, FontStyle, FontWeight, HexColor, Region, RegionFont};
use crate::style::fonts::{
    clean_font_name, is_bold_name, is_italic_name, is_unknown_font, UNKNOWN_FONT,
};

/// Text larger than this is treated as bold whatever the font says.
const BOLD_SIZE_THRESHOLD: f64 = 14.0;

/// Left edge inside this share of the page width means left-aligned.
const LEFT_MARGIN_RATIO: f64 = 0.1;

/// Right edge beyond this share of the page width means right-aligned.
const RIGHT_MARGIN_RATIO: f64 = 0.9;

/// Maximum distance between region and page centers for centered text.
const CENTER_TOLERANCE: f64 = 20.0;

lazy_static! {
    static ref BULLET_PREFIX: Regex = Regex::new(r"^([●•\-*])\s").unwrap();
}

/// Page geometry needed to place regions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFrame {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page width
    pub width: f64,
    /// Page height
    pub height: f64,
}

/// Build the regions of one page, in reading order.
///
/// Indices and vertical spacing are left at their defaults; they are only
/// known once every page has been built.
pub fn build_regions(
    lines: &[TextLine],
    page: PageFrame,
    options: &AnalyzeOptions,
) -> Vec<Region> {
    let regions: Vec<Region> = lines
        .iter()
        .flat_map(|line| split_at_gaps(line, options.region_gap))
        .filter_map(|group| build_region(&group, page, options.space_gap))
        .collect();

    log::debug!(
        "Page {}: built {} regions from {} lines",
        page.number,
        regions.len(),
        lines.len()
    );

    regions
}

/// Split a line's tokens at gaps of at least `region_gap`.
///
/// The gap is measured from the rightmost edge reached so far, so a token
/// overlapping its predecessor never opens a new region.
fn split_at_gaps(line: &TextLine, region_gap: f64) -> Vec<Vec<&Token>> {
    let mut groups: Vec<Vec<&Token>> = Vec::new();
    let mut max_right = f64::NEG_INFINITY;

    for token in &line.tokens {
        match groups.last_mut() {
            Some(group) if token.x - max_right < region_gap => {
                group.push(token);
                max_right = max_right.max(token.right());
            }
            _ => {
                groups.push(vec![token]);
                max_right = token.right();
            }
        }
    }

    groups
}

fn build_region(tokens: &[&Token], page: PageFrame, space_gap: f64) -> Option<Region> {
    let (first, _) = tokens.split_first()?;
    let dominant = dominant_token(tokens)?;

    let left = first.x;
    let right = tokens
        .iter()
        .map(|t| t.right())
        .fold(f64::NEG_INFINITY, f64::max);
    let height = first.height;
    let top = page.height - first.y - height;
    let bbox = BoundingBox::new(left, top, right - left, height);

    let text = join_text(tokens, space_gap);
    let bullet_char = bullet_char(&text);

    let cleaned = clean_font_name(&dominant.font_name);
    let name = if is_unknown_font(&cleaned) {
        UNKNOWN_FONT.to_string()
    } else {
        cleaned
    };
    let size = dominant.height;
    let is_bold = is_bold_name(&name) || size > BOLD_SIZE_THRESHOLD;
    let is_italic = is_italic_name(&name);

    let color = dominant
        .color
        .map(|c| c.to_hex())
        .unwrap_or_else(HexColor::black);

    Some(Region {
        index: 0,
        page_number: page.number,
        alignment: classify_alignment(&bbox, page.width),
        text,
        bbox,
        font: RegionFont {
            name,
            font_ref: dominant.font_ref.clone(),
            size,
            weight: if is_bold {
                FontWeight::Bold
            } else {
                FontWeight::Normal
            },
            style: if is_italic {
                FontStyle::Italic
            } else {
                FontStyle::Normal
            },
        },
        color,
        is_bullet: bullet_char.is_some(),
        bullet_char,
        is_bold,
        is_italic,
        spacing_from_previous: None,
    })
}

/// Concatenate token text, inserting one space across gaps wider than
/// `space_gap` unless whitespace is already there.
fn join_text(tokens: &[&Token], space_gap: f64) -> String {
    let mut text = String::new();
    let mut previous: Option<&Token> = None;

    for token in tokens {
        if let Some(prev) = previous {
            let gap = token.x - prev.right();
            let has_space =
                text.ends_with(char::is_whitespace) || token.text.starts_with(char::is_whitespace);
            if gap > space_gap && !has_space {
                text.push(' ');
            }
        }
        text.push_str(&token.text);
        previous = Some(token);
    }

    text
}

/// The token contributing the most characters; the first one wins ties.
fn dominant_token<'a>(tokens: &[&'a Token]) -> Option<&'a Token> {
    tokens
        .iter()
        .copied()
        .fold(None::<&Token>, |best, t| match best {
            Some(b) if b.char_count() >= t.char_count() => Some(b),
            _ => Some(t),
        })
}

/// The bullet glyph a text starts with, if it is followed by a space.
pub fn bullet_char(text: &str) -> Option<char> {
    BULLET_PREFIX
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
}

/// Classify the horizontal alignment of a box on a page of `page_width`.
///
/// Left uses the left edge, Center the box centre and Right the right edge.
pub fn classify_alignment(bbox: &BoundingBox, page_width: f64) -> Alignment {
    if page_width <= 0.0 {
        return Alignment::Left;
    }

    if bbox.left < page_width * LEFT_MARGIN_RATIO {
        Alignment::Left
    } else if (bbox.center_x() - page_width / 2.0).abs() <= CENTER_TOLERANCE {
        Alignment::Center
    } else if bbox.right > page_width * RIGHT_MARGIN_RATIO {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::lines::group_into_lines;
    use crate::model::Rgb;

    const LETTER: PageFrame = PageFrame {
        number: 1,
        width: 612.0,
        height: 792.0,
    };

    fn regions_for(tokens: Vec<Token>) -> Vec<Region> {
        let lines = group_into_lines(tokens, 2.0);
        build_regions(&lines, LETTER, &AnalyzeOptions::default())
    }

    #[test]
    fn test_close_tokens_merge_with_spaces() {
        let regions = regions_for(vec![
            Token::new("Senior", 10.0, 700.0, 10.0, "F1"),
            Token::new("Data", 60.0, 700.0, 10.0, "F1"),
            Token::new("Engineer", 110.0, 700.0, 10.0, "F1"),
        ]);

        assert_eq!(regions.len(), 1);
        let region = &regions[0];
        assert_eq!(region.text, "Senior Data Engineer");
        assert_eq!(region.bbox.left, 10.0);
        assert_eq!(region.bbox.right, 150.0);
        assert!(region.bbox.right >= region.bbox.left);
    }

    #[test]
    fn test_adjacent_tokens_join_without_space() {
        let regions = regions_for(vec![
            Token::new("Res", 72.0, 700.0, 10.0, "F1").with_width(15.0),
            Token::new("ume", 88.0, 700.0, 10.0, "F1").with_width(15.0),
        ]);
        assert_eq!(regions[0].text, "Resume");
    }

    #[test]
    fn test_wide_gap_starts_new_region() {
        let regions = regions_for(vec![
            Token::new("Acme Corp", 72.0, 700.0, 10.0, "F1").with_width(45.0),
            Token::new("2019 - 2022", 480.0, 700.0, 10.0, "F1").with_width(80.0),
        ]);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].text, "Acme Corp");
        assert_eq!(regions[1].text, "2019 - 2022");
        assert_eq!(regions[1].alignment, Alignment::Right);
    }

    #[test]
    fn test_bullet_detection() {
        let regions = regions_for(vec![Token::new("• Built a pipeline", 90.0, 600.0, 10.0, "F1")]);
        assert!(regions[0].is_bullet);
        assert_eq!(regions[0].bullet_char, Some('•'));

        assert_eq!(bullet_char("- item"), Some('-'));
        assert_eq!(bullet_char("  * item"), Some('*'));
        assert_eq!(bullet_char("-item"), None);
        assert_eq!(bullet_char("2019 - 2022"), None);
    }

    #[test]
    fn test_screen_space_box() {
        let regions = regions_for(vec![Token::new("Name", 72.0, 700.0, 20.0, "F1")]);
        let bbox = regions[0].bbox;
        assert_eq!(bbox.top, 72.0);
        assert_eq!(bbox.y, bbox.top);
        assert_eq!(bbox.height, 20.0);
        assert_eq!(bbox.bottom, 92.0);
    }

    #[test]
    fn test_alignment_rules() {
        assert_eq!(
            classify_alignment(&BoundingBox::new(40.0, 0.0, 100.0, 10.0), 612.0),
            Alignment::Left
        );
        assert_eq!(
            classify_alignment(&BoundingBox::new(256.0, 0.0, 100.0, 10.0), 612.0),
            Alignment::Center
        );
        assert_eq!(
            classify_alignment(&BoundingBox::new(480.0, 0.0, 80.0, 10.0), 612.0),
            Alignment::Right
        );
        assert_eq!(
            classify_alignment(&BoundingBox::new(200.0, 0.0, 50.0, 10.0), 612.0),
            Alignment::Left
        );
    }

    #[test]
    fn test_formatting_flags() {
        let regions = regions_for(vec![
            Token::new("JANE DOE", 72.0, 750.0, 24.0, "ABCDEF+Georgia"),
            Token::new("Company", 72.0, 700.0, 10.0, "ABCDEF+Georgia-Bold"),
            Token::new("Remote", 72.0, 680.0, 10.0, "ABCDEF+Georgia-Italic"),
            Token::new("Plain", 72.0, 660.0, 10.0, "ABCDEF+Georgia"),
        ]);

        assert!(regions[0].is_bold);
        assert_eq!(regions[0].font.name, "Georgia");
        assert!(regions[1].is_bold);
        assert_eq!(regions[1].font.weight, FontWeight::Bold);
        assert!(regions[2].is_italic);
        assert_eq!(regions[2].font.style, FontStyle::Italic);
        assert!(!regions[3].is_bold && !regions[3].is_italic);
    }

    #[test]
    fn test_dominant_style_by_characters() {
        let mut accent = Token::new("Skills:", 72.0, 600.0, 10.0, "F2").with_width(30.0);
        accent.color = Some(Rgb::new(0.2, 0.4, 0.6));
        let body = Token::new("Rust, Python, SQL", 104.0, 600.0, 10.0, "F1");

        let regions = regions_for(vec![accent, body]);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].font.font_ref, "F1");
        assert_eq!(regions[0].color, HexColor::black());
    }
}
