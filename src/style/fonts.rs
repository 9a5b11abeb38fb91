//! Font classification.
//!
//! Cleans raw font identifiers, infers weight and style from the name, maps
//! the name to a CSS font-family stack, and ranks the fonts of a document
//! into heading and body roles.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::layout::Token;
use crate::model::{FontDescriptor, FontRoles, FontStyle, FontWeight};

/// Cleaned name reported for generic or unreadable identifiers.
pub const UNKNOWN_FONT: &str = "unknown";

/// Family stack used when nothing better can be inferred.
pub const DEFAULT_FAMILY: &str = "Arial, Helvetica, sans-serif";

/// Known family keywords (lowercase substrings) and their CSS stacks.
///
/// Order matters: the first matching keyword wins.
const FAMILY_TABLE: &[(&str, &str)] = &[
    ("helvetica", "Helvetica, Arial, sans-serif"),
    ("arial", "Arial, Helvetica, sans-serif"),
    ("times", "'Times New Roman', Times, serif"),
    ("courier", "'Courier New', Courier, monospace"),
    ("georgia", "Georgia, 'Times New Roman', serif"),
    ("garamond", "Garamond, Georgia, serif"),
    ("calibri", "Calibri, Carlito, 'Segoe UI', sans-serif"),
    ("cambria", "Cambria, Caladea, Georgia, serif"),
    ("verdana", "Verdana, Geneva, sans-serif"),
    ("tahoma", "Tahoma, Verdana, sans-serif"),
    ("trebuchet", "'Trebuchet MS', Helvetica, sans-serif"),
    ("palatino", "'Palatino Linotype', Palatino, 'Book Antiqua', serif"),
    ("bookantiqua", "'Book Antiqua', Palatino, serif"),
    ("opensans", "'Open Sans', Arial, sans-serif"),
    ("roboto", "Roboto, Arial, sans-serif"),
    ("lato", "Lato, Arial, sans-serif"),
    ("montserrat", "Montserrat, Arial, sans-serif"),
    ("sourcesans", "'Source Sans Pro', Arial, sans-serif"),
    ("raleway", "Raleway, Arial, sans-serif"),
    ("merriweather", "Merriweather, Georgia, serif"),
    ("lmroman", "'Latin Modern Roman', 'Computer Modern', serif"),
    ("cmr", "'Latin Modern Roman', 'Computer Modern', serif"),
];

/// Name fragments that indicate a bold weight.
const BOLD_MARKERS: &[&str] = &["bold", "black", "heavy", "semibold", "demi"];

lazy_static! {
    static ref SUBSET_PREFIX: Regex = Regex::new(r"^[A-Za-z]{1,6}\+").unwrap();
    static ref GENERIC_PREFIX: Regex = Regex::new(r"^[A-Za-z]_d\d+_f\d+_").unwrap();
    static ref GENERIC_ID: Regex = Regex::new(r"^g_d\d+_f\d+$").unwrap();
    static ref ITALIC_MARKER: Regex = Regex::new(r"(?i)(italic|oblique|-it$|boldit$)").unwrap();
    static ref LETTERS_ONLY: Regex = Regex::new(r"^[A-Za-z]+$").unwrap();
}

/// Strip subset prefixes (`ABCDEF+`), generic prefixes (`g_d0_f1_`) and
/// whitespace from a raw font identifier.
///
/// Prefixes are removed until none remain, so cleaning is idempotent.
pub fn clean_font_name(raw: &str) -> String {
    let mut name: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    loop {
        let stripped = if let Some(m) = SUBSET_PREFIX.find(&name) {
            name[m.end()..].to_string()
        } else if let Some(m) = GENERIC_PREFIX.find(&name) {
            name[m.end()..].to_string()
        } else {
            break;
        };
        name = stripped;
    }

    name
}

/// Check whether a cleaned name carries no usable family information.
pub fn is_unknown_font(cleaned: &str) -> bool {
    cleaned.is_empty()
        || cleaned.chars().count() < 3
        || GENERIC_ID.is_match(cleaned)
        || cleaned == UNKNOWN_FONT
}

/// Check whether a font name indicates a bold weight.
pub fn is_bold_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    BOLD_MARKERS.iter().any(|m| lower.contains(m))
}

/// Check whether a font name indicates an italic or oblique style.
pub fn is_italic_name(name: &str) -> bool {
    ITALIC_MARKER.is_match(name)
}

/// Weight inferred from the font name.
pub fn infer_weight(name: &str) -> FontWeight {
    if is_bold_name(name) {
        FontWeight::Bold
    } else {
        FontWeight::Normal
    }
}

/// Style inferred from the font name.
pub fn infer_style(name: &str) -> FontStyle {
    if is_italic_name(name) {
        FontStyle::Italic
    } else {
        FontStyle::Normal
    }
}

/// Map a cleaned font name to a CSS font-family stack.
pub fn map_font_family(cleaned: &str) -> String {
    if is_unknown_font(cleaned) {
        return DEFAULT_FAMILY.to_string();
    }

    let lower = cleaned.to_lowercase();
    if let Some((_, family)) = FAMILY_TABLE.iter().find(|(kw, _)| lower.contains(kw)) {
        return family.to_string();
    }

    let base = cleaned
        .split(|c| c == '-' || c == ',' || c == '_')
        .next()
        .unwrap_or_default();
    if LETTERS_ONLY.is_match(base) {
        return format!("'{}', sans-serif", title_case_family(base));
    }

    DEFAULT_FAMILY.to_string()
}

/// Split a CamelCase family into words and title-case each one.
fn title_case_family(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() && prev_lower {
            words.push(String::new());
        }
        if words.is_empty() {
            words.push(String::new());
        }
        if let Some(word) = words.last_mut() {
            word.push(c);
        }
        prev_lower = c.is_lowercase();
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Build the descriptor for one font.
pub fn describe_font(raw_id: &str, name: &str, size: f64) -> FontDescriptor {
    let cleaned = clean_font_name(name);
    let cleaned_name = if is_unknown_font(&cleaned) {
        UNKNOWN_FONT.to_string()
    } else {
        cleaned
    };

    FontDescriptor {
        raw_id: raw_id.to_string(),
        weight: infer_weight(&cleaned_name),
        style: infer_style(&cleaned_name),
        mapped_family: map_font_family(&cleaned_name),
        cleaned_name,
        size,
    }
}

/// Deduplicating collection of fonts keyed by raw id, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    fonts: IndexMap<String, FontDescriptor>,
}

impl FontCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the font of a token. Only the first sighting of a raw id counts.
    pub fn observe(&mut self, token: &Token) {
        if !self.fonts.contains_key(&token.font_ref) {
            let descriptor = describe_font(&token.font_ref, &token.font_name, token.height);
            self.fonts.insert(token.font_ref.clone(), descriptor);
        }
    }

    /// Record the fonts of a set of tokens.
    pub fn observe_all<'a>(&mut self, tokens: impl IntoIterator<Item = &'a Token>) {
        for token in tokens {
            self.observe(token);
        }
    }

    /// Fold another catalog (a later page) into this one.
    pub fn merge(&mut self, other: FontCatalog) {
        for (id, descriptor) in other.fonts {
            self.fonts.entry(id).or_insert(descriptor);
        }
    }

    /// Number of distinct fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Check if no fonts were seen.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Descriptors in first-seen order.
    pub fn into_descriptors(self) -> Vec<FontDescriptor> {
        self.fonts.into_values().collect()
    }
}

/// Assign heading and body roles.
///
/// The largest font is the heading font and the smallest the body font,
/// unless some font is bold by name: then the largest bold font takes the
/// heading role. A single font fills both roles.
pub fn assign_font_roles(fonts: &[FontDescriptor]) -> FontRoles {
    let bold_heading = largest_font(fonts.iter().filter(|f| f.weight == FontWeight::Bold));
    let heading = bold_heading.or_else(|| largest_font(fonts.iter()));
    let body = smallest_font(fonts.iter());

    log::debug!("Font roles: heading={:?}, body={:?}", heading, body);

    FontRoles { heading, body }
}

fn largest_font<'a>(fonts: impl Iterator<Item = &'a FontDescriptor>) -> Option<String> {
    fonts
        .fold(None::<&FontDescriptor>, |best, f| match best {
            Some(b) if b.size >= f.size => Some(b),
            _ => Some(f),
        })
        .map(|f| f.raw_id.clone())
}

fn smallest_font<'a>(fonts: impl Iterator<Item = &'a FontDescriptor>) -> Option<String> {
    fonts
        .fold(None::<&FontDescriptor>, |best, f| match best {
            Some(b) if b.size <= f.size => Some(b),
            _ => Some(f),
        })
        .map(|f| f.raw_id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_prefixes() {
        assert_eq!(clean_font_name("ABCDEF+Calibri-Bold"), "Calibri-Bold");
        assert_eq!(clean_font_name("g_d0_f2_Roboto"), "Roboto");
        assert_eq!(clean_font_name("Open Sans"), "OpenSans");
        assert_eq!(clean_font_name("AB+CD+Lato"), "Lato");
    }

    #[test]
    fn test_clean_is_idempotent() {
        for raw in [
            "ABCDEF+Calibri-Bold",
            "g_d0_f2_Roboto",
            "g_d12_f3",
            "x+y+Georgia Italic",
            "",
            "Times New Roman",
            "a_d1_f1_ABC+Lato",
        ] {
            let once = clean_font_name(raw);
            assert_eq!(clean_font_name(&once), once, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_unknown_fonts() {
        assert!(is_unknown_font(""));
        assert!(is_unknown_font("F1"));
        assert!(is_unknown_font("g_d0_f1"));
        assert!(!is_unknown_font("Calibri"));

        let descriptor = describe_font("g_d0_f1", "g_d0_f1", 11.0);
        assert_eq!(descriptor.cleaned_name, UNKNOWN_FONT);
        assert_eq!(descriptor.mapped_family, DEFAULT_FAMILY);
    }

    #[test]
    fn test_family_mapping() {
        assert_eq!(map_font_family("Helvetica-Bold"), "Helvetica, Arial, sans-serif");
        assert_eq!(map_font_family("TimesNewRomanPSMT"), "'Times New Roman', Times, serif");
        assert_eq!(map_font_family("OpenSans-Regular"), "'Open Sans', Arial, sans-serif");
        assert_eq!(map_font_family("CustomFont-Bold"), "'Custom Font', sans-serif");
        assert_eq!(map_font_family("QUIRKY"), "'Quirky', sans-serif");
        assert_eq!(map_font_family("Font123"), DEFAULT_FAMILY);
    }

    #[test]
    fn test_weight_and_style() {
        assert_eq!(infer_weight("Calibri-Bold"), FontWeight::Bold);
        assert_eq!(infer_weight("Lato-Black"), FontWeight::Bold);
        assert_eq!(infer_weight("Lato-Regular"), FontWeight::Normal);
        assert_eq!(infer_style("Helvetica-Oblique"), FontStyle::Italic);
        assert_eq!(infer_style("SourceSansPro-It"), FontStyle::Italic);
        assert_eq!(infer_style("Georgia"), FontStyle::Normal);
    }

    #[test]
    fn test_catalog_dedup_and_merge() {
        let mut first = FontCatalog::new();
        first.observe(&Token::new("A", 0.0, 0.0, 20.0, "F1"));
        first.observe(&Token::new("B", 0.0, 0.0, 10.0, "F1"));

        let mut second = FontCatalog::new();
        second.observe(&Token::new("C", 0.0, 0.0, 9.0, "F2"));
        second.observe(&Token::new("D", 0.0, 0.0, 30.0, "F1"));

        first.merge(second);
        let fonts = first.into_descriptors();
        assert_eq!(fonts.len(), 2);
        assert_eq!(fonts[0].raw_id, "F1");
        assert_eq!(fonts[0].size, 20.0);
        assert_eq!(fonts[1].raw_id, "F2");
    }

    #[test]
    fn test_font_roles_by_size() {
        let fonts = vec![
            describe_font("a", "Georgia", 11.0),
            describe_font("b", "Georgia", 22.0),
            describe_font("c", "Georgia", 9.0),
        ];
        let roles = assign_font_roles(&fonts);
        assert_eq!(roles.heading.as_deref(), Some("b"));
        assert_eq!(roles.body.as_deref(), Some("c"));
    }

    #[test]
    fn test_bold_font_overrides_heading() {
        let fonts = vec![
            describe_font("name", "Georgia", 24.0),
            describe_font("head", "Georgia-Bold", 12.0),
            describe_font("body", "Georgia", 10.0),
        ];
        let roles = assign_font_roles(&fonts);
        assert_eq!(roles.heading.as_deref(), Some("head"));
        assert_eq!(roles.body.as_deref(), Some("body"));
    }

    #[test]
    fn test_single_font_fills_both_roles() {
        let fonts = vec![describe_font("only", "Arial", 11.0)];
        let roles = assign_font_roles(&fonts);
        assert_eq!(roles.heading.as_deref(), Some("only"));
        assert_eq!(roles.body.as_deref(), Some("only"));
        assert_eq!(assign_font_roles(&[]), FontRoles::default());
    }
}
