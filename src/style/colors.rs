//! Color classification.
//!
//! Every color set by a fill/stroke operator (and every token fill color) is
//! tallied into three independent buckets by hex value: primary (accent),
//! text and muted. Achromatic colors (black, white, pure greys) are default
//! ink and never counted.

use indexmap::IndexMap;

use crate::layout::Token;
use crate::model::{ColorPalette, HexColor, Operator, Rgb};

/// Minimum channel spread for a color to count as chromatic enough to be an
/// accent. Keeps the text and primary buckets disjoint.
const MIN_PRIMARY_SPREAD: f64 = 0.08;

/// Ideal saturation band for an accent color.
const IDEAL_SATURATION: (f64, f64) = (0.3, 0.8);

/// Ideal brightness band for an accent color.
const IDEAL_BRIGHTNESS: (f64, f64) = (0.3, 0.6);

/// Distance from an ideal band that still earns a neutral score.
const BAND_TOLERANCE: f64 = 0.15;

/// Accent color: saturated, mid brightness, not grey.
pub fn is_primary_color(color: &Rgb) -> bool {
    let brightness = color.brightness();
    color.saturation() > 0.15
        && brightness > 0.2
        && brightness < 0.8
        && color.spread() >= MIN_PRIMARY_SPREAD
}

/// Body text color: dark and nearly unsaturated.
pub fn is_text_color(color: &Rgb) -> bool {
    color.brightness() < 0.4 && color.saturation() < 0.2
}

/// Secondary text color: mid brightness, low saturation.
pub fn is_muted_color(color: &Rgb) -> bool {
    let brightness = color.brightness();
    (0.3..=0.7).contains(&brightness) && color.saturation() < 0.3
}

fn band_score(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if (lo..=hi).contains(&value) {
        2.0
    } else if (value - lo).abs().min((value - hi).abs()) <= BAND_TOLERANCE {
        1.0
    } else {
        0.5
    }
}

/// How close a color sits to the ideal accent ranges (0.25 to 4.0).
pub fn primary_score(color: &Rgb) -> f64 {
    band_score(color.saturation(), IDEAL_SATURATION)
        * band_score(color.brightness(), IDEAL_BRIGHTNESS)
}

/// Occurrence counts per bucket, keyed by hex in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ColorTally {
    primary: IndexMap<HexColor, usize>,
    text: IndexMap<HexColor, usize>,
    muted: IndexMap<HexColor, usize>,
}

impl ColorTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one color occurrence.
    pub fn observe(&mut self, color: Rgb) {
        let hex = color.to_hex();
        if hex.is_achromatic() {
            return;
        }

        // Classify the rounded value so the bucket matches the key.
        let rounded = hex.to_rgb();
        let mut counted = false;
        for (matches, bucket) in [
            (is_primary_color(&rounded), &mut self.primary),
            (is_text_color(&rounded), &mut self.text),
            (is_muted_color(&rounded), &mut self.muted),
        ] {
            if matches {
                *bucket.entry(hex.clone()).or_insert(0) += 1;
                counted = true;
            }
        }

        if !counted {
            log::trace!("Color {} matches no bucket", hex);
        }
    }

    /// Count every well-formed color operator in a stream.
    pub fn observe_operators(&mut self, operators: &[Operator]) {
        for (_, color) in operators.iter().filter_map(Operator::paint_color) {
            self.observe(color);
        }
    }

    /// Count token fill colors.
    pub fn observe_tokens<'a>(&mut self, tokens: impl IntoIterator<Item = &'a Token>) {
        for color in tokens.into_iter().filter_map(|t| t.color) {
            self.observe(color);
        }
    }

    /// Fold another tally (a later page) into this one.
    pub fn merge(&mut self, other: ColorTally) {
        for (mine, theirs) in [
            (&mut self.primary, other.primary),
            (&mut self.text, other.text),
            (&mut self.muted, other.muted),
        ] {
            for (hex, count) in theirs {
                *mine.entry(hex).or_insert(0) += count;
            }
        }
    }

    /// Check whether nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.text.is_empty() && self.muted.is_empty()
    }

    /// Pick the representative of each bucket.
    pub fn palette(&self) -> ColorPalette {
        let palette = ColorPalette {
            primary: select_primary(&self.primary),
            text: most_frequent(&self.text),
            muted: most_frequent(&self.muted),
        };
        log::debug!(
            "Palette: primary={:?}, text={:?}, muted={:?}",
            palette.primary,
            palette.text,
            palette.muted
        );
        palette
    }
}

/// Highest `count × score`; the earliest color wins ties.
fn select_primary(bucket: &IndexMap<HexColor, usize>) -> Option<HexColor> {
    let mut best: Option<(&HexColor, f64)> = None;
    for (hex, count) in bucket {
        let weight = *count as f64 * primary_score(&hex.to_rgb());
        if best.map_or(true, |(_, w)| weight > w) {
            best = Some((hex, weight));
        }
    }
    best.map(|(hex, _)| hex.clone())
}

/// Highest count; the earliest color wins ties.
fn most_frequent(bucket: &IndexMap<HexColor, usize>) -> Option<HexColor> {
    let mut best: Option<(&HexColor, usize)> = None;
    for (hex, count) in bucket {
        if best.map_or(true, |(_, c)| *count > c) {
            best = Some((hex, *count));
        }
    }
    best.map(|(hex, _)| hex.clone())
}
