//! Token normalization.
//!
//! Converts decoder text runs into [`Token`]s with page-space coordinates,
//! a usable width and height, a resolved font reference and a normalized
//! color. Malformed runs are dropped here so later stages never see them.

use unicode_normalization::UnicodeNormalization;

use crate::model::{RawTextToken, Rgb};

/// Width of an average glyph relative to the font size, used when the
/// decoder gives no advance width.
const AVG_GLYPH_WIDTH: f64 = 0.5;

/// A positioned text run in page space (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// NFC-normalized text
    pub text: String,
    /// Origin X (left edge)
    pub x: f64,
    /// Origin Y (baseline)
    pub y: f64,
    /// Advance width
    pub width: f64,
    /// Height, approximately the font size
    pub height: f64,
    /// Font reference used for deduplication
    pub font_ref: String,
    /// Best available font name for family inference
    pub font_name: String,
    /// Fill color
    pub color: Option<Rgb>,
}

impl Token {
    /// Create a token with an estimated width.
    pub fn new(text: impl Into<String>, x: f64, y: f64, size: f64, font: impl Into<String>) -> Self {
        let text = text.into();
        let font = font.into();
        let width = estimate_width(&text, size);
        Self {
            text,
            x,
            y,
            width,
            height: size,
            font_ref: font.clone(),
            font_name: font,
            color: None,
        }
    }

    /// Set the width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Number of characters, used as a weight when picking dominant styles.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Normalize all text runs of a page, skipping malformed ones.
pub fn normalize_tokens(raw: &[RawTextToken], page_number: u32) -> Vec<Token> {
    let tokens: Vec<Token> = raw
        .iter()
        .enumerate()
        .filter_map(|(i, token)| normalize_token(token, page_number, i))
        .collect();

    log::debug!(
        "Page {}: normalized {} of {} text tokens",
        page_number,
        tokens.len(),
        raw.len()
    );

    tokens
}

fn normalize_token(raw: &RawTextToken, page_number: u32, position: usize) -> Option<Token> {
    let Some(text) = raw.text.as_deref() else {
        log::warn!(
            "Page {}: skipping token #{} without text",
            page_number,
            position
        );
        return None;
    };

    let Some(transform) = raw.transform.filter(|t| t.iter().all(|v| v.is_finite())) else {
        log::warn!(
            "Page {}: skipping token #{} with missing or non-finite transform",
            page_number,
            position
        );
        return None;
    };

    if text.trim().is_empty() {
        log::trace!("Page {}: dropping whitespace token #{}", page_number, position);
        return None;
    }

    let text: String = text.nfc().collect();
    let [a, _b, c, d, x, y] = transform;

    let mut height = c.hypot(d);
    if height <= 0.0 {
        height = a.abs();
    }

    let width = match raw.width {
        Some(w) if w.is_finite() && w >= 0.0 => w,
        _ => estimate_width(&text, height),
    };

    let (font_ref, font_name) = match &raw.font {
        Some(font) => (font.id().to_string(), font.display_name().to_string()),
        None => (String::new(), String::new()),
    };

    let color = raw
        .color
        .and_then(|[r, g, b]| Rgb::from_channels(r, g, b));

    Some(Token {
        text,
        x,
        y,
        width,
        height,
        font_ref,
        font_name,
        color,
    })
}

fn estimate_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * AVG_GLYPH_WIDTH
}
