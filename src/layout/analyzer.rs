//! Document analysis pipeline.
//!
//! Every page runs the same independent stage (normalize, group lines, build
//! regions, extract graphics, collect fonts and colors). Pages may run on the
//! rayon pool; their results are merged strictly in page order, after which
//! region indices, spacing, font roles, palette and document structure are
//! computed over the whole document.

use super::graphics::extract_graphics;
use super::lines::group_into_lines;
use super::options::AnalyzeOptions;
use super::regions::{build_regions, PageFrame};
use super::tokens::normalize_tokens;
use crate::error::{Error, Result};
use crate::model::{LayoutDocument, PageInput, PageLayout, Region};
use crate::structure::{detect_sections, infer_entry_formats, map_sections};
use crate::style::{assign_font_roles, ColorTally, FontCatalog};

/// Output of the per-page stage.
#[derive(Debug, Clone)]
pub struct PageAnalysis {
    /// Regions (not yet numbered) and graphics of the page
    pub layout: PageLayout,
    /// Fonts first seen on the page
    pub fonts: FontCatalog,
    /// Colors counted on the page
    pub colors: ColorTally,
}

/// Check that a page has usable dimensions.
pub fn validate_page(page: &PageInput, number: u32) -> Result<()> {
    for (name, value) in [("width", page.width), ("height", page.height)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::InvalidPage {
                page: number,
                reason: format!("{} must be a positive number, got {}", name, value),
            });
        }
    }
    Ok(())
}

/// Run the per-page stage on one page.
pub fn analyze_page(
    page: &PageInput,
    number: u32,
    options: &AnalyzeOptions,
) -> Result<PageAnalysis> {
    validate_page(page, number)?;

    let tokens = normalize_tokens(&page.text_tokens, number);

    let mut fonts = FontCatalog::new();
    fonts.observe_all(&tokens);

    let mut colors = ColorTally::new();
    colors.observe_tokens(&tokens);
    colors.observe_operators(&page.operators);

    let frame = PageFrame {
        number,
        width: page.width,
        height: page.height,
    };
    let lines = group_into_lines(tokens, options.line_tolerance);
    let regions = build_regions(&lines, frame, options);
    let graphics = extract_graphics(&page.operators);

    log::debug!(
        "Page {}: {} lines, {} regions, {} graphic elements",
        number,
        lines.len(),
        regions.len(),
        graphics.len()
    );

    let mut layout = PageLayout::new(number, page.width, page.height);
    layout.text_regions = regions;
    layout.graphics = graphics;

    Ok(PageAnalysis {
        layout,
        fonts,
        colors,
    })
}

/// Analyze decoded pages into a layout document.
pub fn analyze_pages(pages: &[PageInput], options: &AnalyzeOptions) -> Result<LayoutDocument> {
    let analyses: Vec<PageAnalysis> = if options.parallel && pages.len() > 1 {
        use rayon::prelude::*;
        pages
            .par_iter()
            .enumerate()
            .map(|(i, page)| analyze_page(page, i as u32 + 1, options))
            .collect::<Result<Vec<_>>>()?
    } else {
        pages
            .iter()
            .enumerate()
            .map(|(i, page)| analyze_page(page, i as u32 + 1, options))
            .collect::<Result<Vec<_>>>()?
    };

    Ok(assemble(analyses, options))
}

/// Merge per-page results in page order and run the document-level stages.
fn assemble(analyses: Vec<PageAnalysis>, options: &AnalyzeOptions) -> LayoutDocument {
    let mut fonts = FontCatalog::new();
    let mut colors = ColorTally::new();
    let mut pages: Vec<PageLayout> = Vec::with_capacity(analyses.len());

    for analysis in analyses {
        fonts.merge(analysis.fonts);
        colors.merge(analysis.colors);
        pages.push(analysis.layout);
    }

    number_regions(&mut pages);

    let regions: Vec<Region> = pages
        .iter()
        .flat_map(|p| p.text_regions.iter().cloned())
        .collect();

    let detection = detect_sections(&regions, options);
    let entry_formats = infer_entry_formats(&regions, &detection);
    let sections = map_sections(&regions, options);

    let fonts = fonts.into_descriptors();
    let font_roles = assign_font_roles(&fonts);

    log::debug!(
        "Analyzed {} pages: {} regions, {} fonts",
        pages.len(),
        regions.len(),
        fonts.len()
    );

    LayoutDocument {
        pages,
        fonts,
        font_roles,
        section_structure: detection.structure(),
        entry_formats,
        color_palette: colors.palette(),
        sections,
    }
}

/// Assign document-wide indices and the vertical distance to the previous
/// region's `bbox.y`.
fn number_regions(pages: &mut [PageLayout]) {
    let mut previous_y: Option<f64> = None;
    let regions = pages.iter_mut().flat_map(|p| p.text_regions.iter_mut());

    for (index, region) in regions.enumerate() {
        region.index = index as u32;
        region.spacing_from_previous = previous_y.map(|y| (region.bbox.y - y).abs());
        previous_y = Some(region.bbox.y);
    }
}
