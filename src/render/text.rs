//! Plain text rendering: the section outline of a document.

use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::model::{LayoutDocument, Region, SectionGroup};

/// Render the region-to-section grouping as an indented outline.
///
/// Each group opens with `[key]`; heading regions are prefixed with `#`,
/// other regions are indented by two spaces.
pub fn to_text(doc: &LayoutDocument) -> Result<String> {
    let mut output = String::new();
    // Indices are contiguous and 0-based, so position equals index.
    let regions: Vec<&Region> = doc.regions().collect();

    for (i, group) in doc.sections.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        write_group(&mut output, &regions, group)
            .map_err(|e| Error::Render(format!("text rendering error: {}", e)))?;
    }

    Ok(output.trim_end().to_string())
}

fn write_group(output: &mut String, regions: &[&Region], group: &SectionGroup) -> std::fmt::Result {
    writeln!(output, "[{}]", group.key)?;
    for mapped in &group.regions {
        let Some(region) = regions.get(mapped.index as usize) else {
            continue;
        };
        if mapped.is_header {
            writeln!(output, "# {}", region.trimmed())?;
        } else {
            writeln!(output, "  {}", region.trimmed())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::AnalyzeOptions;
    use crate::model::{PageInput, RawTextToken};

    #[test]
    fn test_outline() {
        let mut page = PageInput::letter();
        page.push_token(RawTextToken::new("Jane Doe", 72.0, 740.0, 22.0, "F2"));
        page.push_token(RawTextToken::new("EXPERIENCE", 72.0, 700.0, 12.0, "F1"));
        page.push_token(RawTextToken::new("Engineer at Acme", 72.0, 684.0, 10.0, "F1"));

        let doc = crate::layout::analyze_pages(&[page], &AnalyzeOptions::default()).unwrap();
        let text = to_text(&doc).unwrap();
        assert_eq!(
            text,
            "[contactInfo]\n  Jane Doe\n\n[experience]\n# EXPERIENCE\n  Engineer at Acme"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_text(&LayoutDocument::default()).unwrap(), "");
    }
}
