//! Entry format inference.
//!
//! Education, experience and project sections repeat the same entry layout.
//! The first lines of a section are scanned for recognizable fields (degree,
//! institution, title, company, location, dates, bullets...) and the order
//! in which fields first appear becomes the section's field order.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use super::sections::SectionDetection;
use crate::model::{Alignment, EntryFormat, FieldName, Region, SectionName};

/// Sections whose entries get a format.
pub const ENTRY_SECTIONS: [SectionName; 3] = [
    SectionName::Education,
    SectionName::Experience,
    SectionName::Projects,
];

/// Vertical tolerance when regrouping a section's regions into lines.
const LINE_TOLERANCE: f64 = 2.0;

/// Default bullet glyph.
pub const DEFAULT_BULLET: char = '•';

/// Unmatched text at least this long reads as a description.
const PROSE_MIN_LEN: usize = 80;

lazy_static! {
    static ref DEGREE: Regex = Regex::new(
        r"(?i)\b(?:(?:bachelors?|masters?|associates?|doctorate|doctor of|mba|bsc|msc|b\.?eng|m\.?eng|b\.?tech|m\.?tech|b\.?s|m\.?s|diploma|degree)\b|ph\.?\s?d|b\.a\.|m\.a\.)"
    )
    .unwrap();
    static ref INSTITUTION: Regex =
        Regex::new(r"(?i)\b(?:university|college|institute|school|academy|polytechnic)\b").unwrap();
    static ref LOCATION: Regex =
        Regex::new(r"\b[A-Z][A-Za-z.]+(?:\s+[A-Z][A-Za-z.]+)*,\s*[A-Z]{2}\b|\bRemote\b").unwrap();
    static ref DATE: Regex = Regex::new(
        r"(?i)\b(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+)?(?:19|20)\d{2}\b"
    )
    .unwrap();
    static ref GPA: Regex = Regex::new(r"(?i)\b(?:c?gpa)\b").unwrap();
    static ref TITLE_WORDS: Regex = Regex::new(
        r"(?i)\b(?:engineer|developer|manager|analyst|intern|designer|consultant|scientist|architect|lead|director|specialist|assistant|coordinator|administrator|researcher|officer|founder|technician)s?\b"
    )
    .unwrap();
    static ref COMPANY_MARKERS: Regex = Regex::new(
        r"(?i)\b(?:inc|llc|ltd|corp|corporation|company|co|group|labs|gmbh|plc|solutions|systems)\b"
    )
    .unwrap();
    static ref TITLE_WITH_TECH: Regex = Regex::new(r"\S\s*\|\s*\S").unwrap();
}

/// The format assumed when a section shows no recognizable pattern.
pub fn default_entry_format(section: SectionName) -> EntryFormat {
    use FieldName::*;

    let (field_order, has_bullets) = match section {
        SectionName::Education => (vec![Institution, Degree, Location, Dates], false),
        SectionName::Projects => (vec![Title, Technologies, Dates, Bullets], true),
        _ => (vec![Title, Company, Location, Dates, Bullets], true),
    };

    EntryFormat {
        field_order,
        dates_on_right: true,
        has_bullets,
        bullet_char: DEFAULT_BULLET,
        title_with_secondary_on_same_line: false,
        location_after_institution: section == SectionName::Education,
        bullet_indent: None,
    }
}

/// Lines scanned per section.
fn scan_window(section: SectionName) -> usize {
    match section {
        SectionName::Education => 15,
        _ => 20,
    }
}

/// Infer formats for the entry sections.
///
/// Sections without a located heading get the default format.
pub fn infer_entry_formats(
    regions: &[Region],
    detection: &SectionDetection,
) -> BTreeMap<SectionName, EntryFormat> {
    let spans = detection.spans(regions.len());

    ENTRY_SECTIONS
        .iter()
        .map(|&section| {
            let format = spans
                .iter()
                .find(|(s, _)| *s == section)
                .map(|(_, range)| infer_entry_format(section, &regions[range.clone()]))
                .unwrap_or_else(|| default_entry_format(section));
            (section, format)
        })
        .collect()
}

/// Infer the entry format of one section from its regions (heading excluded).
pub fn infer_entry_format(section: SectionName, regions: &[Region]) -> EntryFormat {
    let defaults = default_entry_format(section);
    let lines: Vec<Vec<&Region>> = group_region_lines(regions)
        .into_iter()
        .take(scan_window(section))
        .collect();

    let left_edge = lines
        .iter()
        .flatten()
        .map(|r| r.bbox.left)
        .fold(f64::INFINITY, f64::min);

    let mut order: Vec<FieldName> = Vec::new();
    let mut dates_on_right: Option<bool> = None;
    let mut first_bullet: Option<&Region> = None;
    let mut paired_on_line = false;

    for (line_no, line) in lines.iter().enumerate() {
        let mut line_fields: Vec<FieldName> = Vec::new();

        for (column, region) in line.iter().enumerate() {
            let fields = if region.is_bullet {
                if first_bullet.is_none() {
                    first_bullet = Some(*region);
                }
                vec![FieldName::Bullets]
            } else {
                let found = classify_text(section, region.trimmed());
                if found.is_empty() {
                    fallback_field(section, region.trimmed(), line_no, &order)
                        .into_iter()
                        .collect()
                } else {
                    found
                }
            };

            if dates_on_right.is_none() && fields.contains(&FieldName::Dates) {
                let trailing = column > 0 && column + 1 == line.len();
                dates_on_right = Some(region.alignment == Alignment::Right || trailing);
            }

            for field in fields {
                line_fields.push(field);
                if !order.contains(&field) {
                    order.push(field);
                }
            }
        }

        paired_on_line |= has_primary_and_secondary(&line_fields);
    }

    if order.is_empty() {
        log::debug!("No entry fields recognized in {}, using defaults", section);
        return defaults;
    }

    let location_after_institution = match (
        order.iter().position(|f| *f == FieldName::Institution),
        order.iter().position(|f| *f == FieldName::Location),
    ) {
        (Some(institution), Some(location)) => location > institution,
        _ => defaults.location_after_institution,
    };

    let format = EntryFormat {
        dates_on_right: dates_on_right.unwrap_or(defaults.dates_on_right),
        has_bullets: first_bullet.is_some(),
        bullet_char: first_bullet
            .and_then(|r| r.bullet_char)
            .unwrap_or(DEFAULT_BULLET),
        title_with_secondary_on_same_line: paired_on_line,
        location_after_institution,
        bullet_indent: first_bullet.map(|r| (r.bbox.left - left_edge).max(0.0)),
        field_order: order,
    };

    log::debug!("Entry format for {}: {:?}", section, format.field_order);
    format
}

/// Regroup regions into visual lines, left to right.
fn group_region_lines(regions: &[Region]) -> Vec<Vec<&Region>> {
    let mut lines: Vec<Vec<&Region>> = Vec::new();

    for region in regions.iter().filter(|r| !r.is_empty()) {
        match lines.last_mut() {
            Some(line) if line[0].same_line_as(region, LINE_TOLERANCE) => line.push(region),
            _ => lines.push(vec![region]),
        }
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.bbox.x.total_cmp(&b.bbox.x));
    }
    lines
}

/// Fields recognized in a piece of text, in the order they occur.
fn classify_text(section: SectionName, text: &str) -> Vec<FieldName> {
    let patterns: Vec<(&Regex, FieldName)> = match section {
        SectionName::Education => vec![
            (&*DEGREE, FieldName::Degree),
            (&*INSTITUTION, FieldName::Institution),
            (&*LOCATION, FieldName::Location),
            (&*DATE, FieldName::Dates),
            (&*GPA, FieldName::Gpa),
        ],
        SectionName::Experience => vec![
            (&*TITLE_WORDS, FieldName::Title),
            (&*COMPANY_MARKERS, FieldName::Company),
            (&*LOCATION, FieldName::Location),
            (&*DATE, FieldName::Dates),
        ],
        SectionName::Projects => vec![(&*DATE, FieldName::Dates)],
        _ => Vec::new(),
    };

    let mut found: Vec<(usize, FieldName)> = patterns
        .iter()
        .filter_map(|(re, field)| re.find(text).map(|m| (m.start(), *field)))
        .collect();

    if section == SectionName::Projects {
        if let Some(m) = TITLE_WITH_TECH.find(text) {
            found.push((0, FieldName::Title));
            found.push((m.end(), FieldName::Technologies));
        }
    }

    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, field)| field).collect()
}

/// Field for text no pattern recognized: prose becomes a description, short
/// text near the top of the section fills the first missing primary field.
fn fallback_field(
    section: SectionName,
    text: &str,
    line_no: usize,
    order: &[FieldName],
) -> Option<FieldName> {
    let prose = text.chars().count() >= PROSE_MIN_LEN || text.ends_with('.');
    if prose {
        return (section != SectionName::Education).then_some(FieldName::Description);
    }
    if line_no >= 2 {
        return None;
    }

    let primaries: &[FieldName] = match section {
        SectionName::Education => &[FieldName::Institution, FieldName::Degree],
        SectionName::Experience => &[FieldName::Title, FieldName::Company],
        _ => &[FieldName::Title],
    };
    primaries.iter().copied().find(|f| !order.contains(f))
}

fn has_primary_and_secondary(fields: &[FieldName]) -> bool {
    let primary = fields
        .iter()
        .any(|f| matches!(f, FieldName::Title | FieldName::Degree));
    let secondary = fields.iter().any(|f| {
        matches!(
            f,
            FieldName::Company | FieldName::Technologies | FieldName::Institution
        )
    });
    primary && secondary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, HexColor, RegionFont};
    use FieldName::*;

    fn region(text: &str, x: f64, y: f64) -> Region {
        let alignment = if x > 400.0 {
            Alignment::Right
        } else {
            Alignment::Left
        };
        let bullet_char = crate::layout::bullet_char(text);
        Region {
            index: 0,
            page_number: 1,
            text: text.to_string(),
            bbox: BoundingBox::new(x, y, 60.0, 10.0),
            font: RegionFont {
                name: "Calibri".to_string(),
                font_ref: "F1".to_string(),
                size: 10.0,
                weight: Default::default(),
                style: Default::default(),
            },
            color: HexColor::black(),
            is_bullet: bullet_char.is_some(),
            bullet_char,
            is_bold: false,
            is_italic: false,
            alignment,
            spacing_from_previous: None,
        }
    }

    #[test]
    fn test_institution_first_education() {
        let regions = vec![
            region("State University", 72.0, 100.0),
            region("Boston, MA", 480.0, 100.0),
            region("B.S. in Computer Science", 72.0, 114.0),
            region("2016 - 2020", 480.0, 114.0),
        ];
        let format = infer_entry_format(SectionName::Education, &regions);
        assert_eq!(format.field_order, vec![Institution, Location, Degree, Dates]);
        assert!(format.dates_on_right);
        assert!(format.location_after_institution);
        assert!(!format.has_bullets);
        assert!(!format.title_with_secondary_on_same_line);
    }

    #[test]
    fn test_degree_first_education() {
        let regions = vec![
            region("Master of Science, Data Science", 72.0, 100.0),
            region("May 2021", 72.0, 114.0),
            region("Riverside College", 72.0, 128.0),
            region("GPA: 3.9", 72.0, 142.0),
        ];
        let format = infer_entry_format(SectionName::Education, &regions);
        assert_eq!(format.field_order, vec![Degree, Dates, Institution, Gpa]);
        assert!(!format.dates_on_right);
    }

    #[test]
    fn test_experience_with_bullets() {
        let regions = vec![
            region("Software Engineer", 72.0, 100.0),
            region("Jan 2020 - Present", 450.0, 100.0),
            region("Acme Inc.", 72.0, 114.0),
            region("Austin, TX", 480.0, 114.0),
            region("• Built a pipeline", 90.0, 128.0),
            region("• Cut costs by 30%", 90.0, 142.0),
        ];
        let format = infer_entry_format(SectionName::Experience, &regions);
        assert_eq!(format.field_order, vec![Title, Dates, Company, Location, Bullets]);
        assert!(format.dates_on_right);
        assert!(format.has_bullets);
        assert_eq!(format.bullet_char, '•');
        assert_eq!(format.bullet_indent, Some(18.0));
    }

    #[test]
    fn test_mixed_sizes_share_a_line() {
        // 13pt title beside 10pt company and dates on one baseline (page y=700).
        let sized = |text: &str, x: f64, size: f64| {
            let mut r = region(text, x, 0.0);
            r.bbox = BoundingBox::new(x, 792.0 - 700.0 - size, 100.0, size);
            r.alignment = Alignment::Left;
            r
        };
        let regions = vec![
            sized("Software Engineer", 72.0, 13.0),
            sized("Acme Inc", 260.0, 10.0),
            sized("Jan 2020 - Present", 400.0, 10.0),
        ];
        let format = infer_entry_format(SectionName::Experience, &regions);
        assert_eq!(format.field_order, vec![Title, Company, Dates]);
        assert!(format.dates_on_right);
        assert!(format.title_with_secondary_on_same_line);
    }

    #[test]
    fn test_project_title_with_technologies() {
        let regions = vec![
            region("Resume Parser | Rust, serde", 72.0, 100.0),
            region("2023", 500.0, 100.0),
            region("- Parsed ten thousand documents", 84.0, 114.0),
        ];
        let format = infer_entry_format(SectionName::Projects, &regions);
        assert_eq!(format.field_order, vec![Title, Technologies, Dates, Bullets]);
        assert!(format.title_with_secondary_on_same_line);
        assert_eq!(format.bullet_char, '-');
    }

    #[test]
    fn test_defaults_when_nothing_recognized() {
        assert_eq!(
            infer_entry_format(SectionName::Experience, &[]),
            default_entry_format(SectionName::Experience)
        );
        let education = default_entry_format(SectionName::Education);
        assert_eq!(education.field_order, vec![Institution, Degree, Location, Dates]);
        assert_eq!(education.bullet_char, '•');
    }
}
