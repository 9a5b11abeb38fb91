//! Section detection.
//!
//! Detection is a cascade of strategies tried in order, each returning
//! `Option`: a structural scan for heading-shaped regions, a keyword search
//! over the full document text, and finally a fixed default order.

use std::collections::BTreeMap;

use super::keywords::{is_header_candidate, match_header, normalize_heading, SECTION_KEYWORDS};
use crate::layout::AnalyzeOptions;
use crate::model::{Region, SectionName, SectionStructure};

/// How the section order was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionStrategy {
    /// Heading-shaped regions matched the keyword table
    Structural,
    /// Keywords found somewhere in the document text
    FullText,
    /// Nothing found; fixed order
    Default,
}

/// A section heading located in the region list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedHeader {
    /// Canonical section
    pub section: SectionName,
    /// Index of the region holding the heading, when known
    pub position: Option<usize>,
    /// Heading text as written
    pub text: String,
}

/// Result of section detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDetection {
    /// Strategy that produced the headers
    pub strategy: DetectionStrategy,
    /// Headers in document order, one per section
    pub headers: Vec<DetectedHeader>,
}

impl SectionDetection {
    /// The section order and literal names.
    pub fn structure(&self) -> SectionStructure {
        let sections_order = self.headers.iter().map(|h| h.section).collect();
        let section_names: BTreeMap<SectionName, String> = self
            .headers
            .iter()
            .map(|h| (h.section, h.text.clone()))
            .collect();
        SectionStructure {
            sections_order,
            section_names,
        }
    }

    /// Range of region positions belonging to each located section, from the
    /// region after its heading up to the next heading.
    pub fn spans(&self, region_count: usize) -> Vec<(SectionName, std::ops::Range<usize>)> {
        let located: Vec<(SectionName, usize)> = self
            .headers
            .iter()
            .filter_map(|h| h.position.map(|p| (h.section, p)))
            .collect();

        located
            .iter()
            .enumerate()
            .map(|(i, (section, start))| {
                let end = located
                    .get(i + 1)
                    .map(|(_, next)| *next)
                    .unwrap_or(region_count);
                (*section, (start + 1).min(end)..end)
            })
            .collect()
    }
}

type Strategy = fn(&[Region], &AnalyzeOptions) -> Option<Vec<DetectedHeader>>;

const STRATEGIES: [(DetectionStrategy, Strategy); 2] = [
    (DetectionStrategy::Structural, structural_scan),
    (DetectionStrategy::FullText, full_text_search),
];

/// Detect the sections of a document from its regions in reading order.
pub fn detect_sections(regions: &[Region], options: &AnalyzeOptions) -> SectionDetection {
    let detection = STRATEGIES
        .iter()
        .find_map(|(strategy, run)| {
            run(regions, options).map(|headers| SectionDetection {
                strategy: *strategy,
                headers,
            })
        })
        .unwrap_or_else(default_sections);

    log::debug!(
        "Sections via {:?}: {:?}",
        detection.strategy,
        detection.headers.iter().map(|h| h.section).collect::<Vec<_>>()
    );

    detection
}

/// The section a region opens, if it is a heading.
///
/// The last region of a page never counts as a heading, unless it is the
/// only region on that page.
pub fn header_section(
    regions: &[Region],
    position: usize,
    options: &AnalyzeOptions,
) -> Option<SectionName> {
    let region = regions.get(position)?;
    let same_page = |other: &Region| other.page_number == region.page_number;

    let last_on_page = !regions.get(position + 1).is_some_and(same_page);
    let alone_on_page = position
        .checked_sub(1)
        .and_then(|prev| regions.get(prev))
        .map_or(true, |prev| !same_page(prev));
    if last_on_page && !alone_on_page {
        return None;
    }

    if !is_header_candidate(&region.text, options.header_max_len) {
        return None;
    }
    match_header(&region.text)
}

/// Heading-shaped regions that match the keyword table, first occurrence of
/// each section only.
pub fn structural_scan(
    regions: &[Region],
    options: &AnalyzeOptions,
) -> Option<Vec<DetectedHeader>> {
    let mut headers: Vec<DetectedHeader> = Vec::new();

    for position in 0..regions.len() {
        let Some(section) = header_section(regions, position, options) else {
            continue;
        };
        if headers.iter().any(|h| h.section == section) {
            continue;
        }
        headers.push(DetectedHeader {
            section,
            position: Some(position),
            text: regions[position].trimmed().to_string(),
        });
    }

    (!headers.is_empty()).then_some(headers)
}

/// First whole-word occurrence of any synonym in the document text, per
/// section, ordered by where it occurs.
pub fn full_text_search(
    regions: &[Region],
    _options: &AnalyzeOptions,
) -> Option<Vec<DetectedHeader>> {
    let mut offsets: Vec<usize> = Vec::with_capacity(regions.len());
    let mut text = String::new();
    for region in regions {
        offsets.push(text.len());
        text.push_str(&normalize_heading(&region.text));
        text.push('\n');
    }

    let mut found: Vec<(usize, DetectedHeader)> = SECTION_KEYWORDS
        .iter()
        .filter_map(|(section, synonyms)| {
            let offset = synonyms
                .iter()
                .filter_map(|s| find_words(&text, s))
                .min()?;
            let position = offsets.partition_point(|&start| start <= offset).saturating_sub(1);
            Some((
                offset,
                DetectedHeader {
                    section: *section,
                    position: Some(position),
                    text: section.title().to_string(),
                },
            ))
        })
        .collect();

    found.sort_by_key(|(offset, _)| *offset);
    let headers: Vec<DetectedHeader> = found.into_iter().map(|(_, h)| h).collect();
    (!headers.is_empty()).then_some(headers)
}

/// Byte offset of the first whole-word occurrence of `needle`.
fn find_words(haystack: &str, needle: &str) -> Option<usize> {
    haystack.match_indices(needle).map(|(i, _)| i).find(|&i| {
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// The fixed fallback order.
pub fn default_sections() -> SectionDetection {
    SectionDetection {
        strategy: DetectionStrategy::Default,
        headers: SectionName::DEFAULT_ORDER
            .iter()
            .map(|section| DetectedHeader {
                section: *section,
                position: None,
                text: section.title().to_string(),
            })
            .collect(),
    }
}
