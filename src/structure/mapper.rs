//! Region-to-section mapping.

use indexmap::IndexMap;

use super::sections::header_section;
use crate::layout::AnalyzeOptions;
use crate::model::{MappedRegion, Region, SectionGroup, SectionKey};

/// Assign every region to a section.
///
/// A heading switches the current section and is itself placed in it with
/// `is_header` set. Regions before the first heading go to `contactInfo`
/// when they are among the first few regions and set in a large font, and
/// to `other` otherwise. Groups are ordered by first appearance.
pub fn map_sections(regions: &[Region], options: &AnalyzeOptions) -> Vec<SectionGroup> {
    let mut groups: IndexMap<SectionKey, Vec<MappedRegion>> = IndexMap::new();
    let mut current: Option<SectionKey> = None;

    for (position, region) in regions.iter().enumerate() {
        let header = header_section(regions, position, options).map(SectionKey::from);
        if header.is_some() {
            current = header;
        }

        let key = current.unwrap_or_else(|| pre_heading_key(region, options));
        groups.entry(key).or_default().push(MappedRegion {
            index: region.index,
            is_header: header.is_some(),
        });
    }

    log::debug!(
        "Mapped {} regions into {} section groups",
        regions.len(),
        groups.len()
    );

    groups
        .into_iter()
        .map(|(key, regions)| SectionGroup { key, regions })
        .collect()
}

fn pre_heading_key(region: &Region, options: &AnalyzeOptions) -> SectionKey {
    if region.index < options.contact_region_limit
        && region.font.size > options.contact_min_font_size
    {
        SectionKey::ContactInfo
    } else {
        SectionKey::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, BoundingBox, HexColor, RegionFont};

    fn region(index: u32, text: &str, size: f64) -> Region {
        Region {
            index,
            page_number: 1,
            text: text.to_string(),
            bbox: BoundingBox::new(72.0, 60.0 + index as f64 * 16.0, 120.0, size),
            font: RegionFont {
                name: "Lato".to_string(),
                font_ref: "F1".to_string(),
                size,
                weight: Default::default(),
                style: Default::default(),
            },
            color: HexColor::black(),
            is_bullet: false,
            bullet_char: None,
            is_bold: false,
            is_italic: false,
            alignment: Alignment::Left,
            spacing_from_previous: None,
        }
    }

    fn keys(groups: &[SectionGroup]) -> Vec<SectionKey> {
        groups.iter().map(|g| g.key).collect()
    }

    #[test]
    fn test_regions_follow_latest_heading() {
        let regions = vec![
            region(0, "Jane Doe", 24.0),
            region(1, "jane@example.com", 10.0),
            region(2, "Skills", 12.0),
            region(3, "Rust, Go", 10.0),
            region(4, "Experience", 12.0),
            region(5, "Engineer, Acme", 10.0),
            region(6, "Skills", 12.0),
            region(7, "SQL", 10.0),
        ];

        let groups = map_sections(&regions, &AnalyzeOptions::default());
        assert_eq!(
            keys(&groups),
            vec![
                SectionKey::ContactInfo,
                SectionKey::Other,
                SectionKey::Skills,
                SectionKey::Experience
            ]
        );

        let skills = &groups[2].regions;
        assert_eq!(
            skills.iter().map(|m| m.index).collect::<Vec<_>>(),
            vec![2, 3, 6, 7]
        );
        assert!(skills[0].is_header && !skills[1].is_header && skills[2].is_header);
    }

    #[test]
    fn test_every_region_mapped_once() {
        let regions: Vec<Region> = (0..12)
            .map(|i| region(i, if i % 4 == 1 { "EDUCATION" } else { "text" }, 10.0))
            .collect();
        let groups = map_sections(&regions, &AnalyzeOptions::default());
        let mut indices: Vec<u32> = groups
            .iter()
            .flat_map(|g| g.regions.iter().map(|m| m.index))
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_contact_heuristic_limits() {
        let regions = vec![region(0, "Big Name", 18.0), region(1, "Small", 10.0)];
        let groups = map_sections(&regions, &AnalyzeOptions::default());
        assert_eq!(keys(&groups), vec![SectionKey::ContactInfo, SectionKey::Other]);

        let strict = AnalyzeOptions::default().with_contact_heuristics(0, 16.0);
        let groups = map_sections(&regions, &strict);
        assert_eq!(keys(&groups), vec![SectionKey::Other]);
    }
}
