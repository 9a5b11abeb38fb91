//! Section heading keywords.
//!
//! A fixed table maps every canonical section to the heading synonyms seen
//! in resumes. Matching works on a normalized form of the heading: lowercase,
//! punctuation other than `&` turned into spaces, whitespace collapsed.

use crate::model::SectionName;

/// Heading synonyms per section, in table order.
pub const SECTION_KEYWORDS: &[(SectionName, &[&str])] = &[
    (
        SectionName::Summary,
        &[
            "summary",
            "professional summary",
            "career summary",
            "executive summary",
            "profile",
            "professional profile",
            "objective",
            "career objective",
            "about me",
            "about",
            "overview",
        ],
    ),
    (
        SectionName::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "relevant experience",
            "employment",
            "employment history",
            "work history",
            "career history",
            "internships",
        ],
    ),
    (
        SectionName::Skills,
        &[
            "skills",
            "technical skills",
            "core skills",
            "key skills",
            "skills & interests",
            "core competencies",
            "competencies",
            "technologies",
            "technical expertise",
            "expertise",
        ],
    ),
    (
        SectionName::Education,
        &[
            "education",
            "academic background",
            "academics",
            "education & training",
            "academic history",
        ],
    ),
    (
        SectionName::Projects,
        &[
            "projects",
            "personal projects",
            "selected projects",
            "key projects",
            "side projects",
            "academic projects",
            "project experience",
        ],
    ),
    (
        SectionName::Awards,
        &[
            "awards",
            "honors",
            "honors & awards",
            "awards & honors",
            "achievements",
            "accomplishments",
        ],
    ),
    (
        SectionName::Certifications,
        &[
            "certifications",
            "certification",
            "certificates",
            "licenses",
            "licenses & certifications",
        ],
    ),
];

/// Separators allowed in a heading besides letters and spaces.
const HEADING_SEPARATORS: &[char] = &['&', '/', ',', ':', '-'];

/// Normalize heading text for keyword comparison.
pub fn normalize_heading(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '&' { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check whether `needle` occurs in `haystack` as whole words.
///
/// Both arguments must already be normalized.
pub(crate) fn contains_words(haystack: &str, needle: &str) -> bool {
    format!(" {} ", haystack).contains(&format!(" {} ", needle))
}

/// Match heading text against the keyword table.
///
/// An exact synonym match anywhere in the table wins; otherwise the first
/// section (in table order) with a synonym contained as whole words.
pub fn match_header(text: &str) -> Option<SectionName> {
    let normalized = normalize_heading(text);
    if normalized.is_empty() {
        return None;
    }

    let exact = SECTION_KEYWORDS
        .iter()
        .find(|(_, synonyms)| synonyms.iter().any(|s| *s == normalized));
    if let Some((section, _)) = exact {
        return Some(*section);
    }

    SECTION_KEYWORDS
        .iter()
        .find(|(_, synonyms)| synonyms.iter().any(|s| contains_words(&normalized, s)))
        .map(|(section, _)| *section)
}

/// Check whether text has the shape of a section heading: short, and either
/// fully uppercase or made of letters and a few separators only.
pub fn is_header_candidate(text: &str, max_len: usize) -> bool {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    if len == 0 || len >= max_len {
        return false;
    }

    if !trimmed.chars().any(char::is_alphabetic) {
        return false;
    }

    let wordy = trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || HEADING_SEPARATORS.contains(&c));
    let uppercase = trimmed.chars().all(|c| !c.is_lowercase());

    wordy || uppercase
}
