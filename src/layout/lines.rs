//! Line grouping.
//!
//! Tokens are bucketed by `round(y / tolerance)`, sorted left to right inside
//! each bucket, and the buckets are emitted top of page first.

use std::collections::BTreeMap;

use super::tokens::Token;

/// Tokens sharing a baseline, sorted by X.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Tokens, left to right
    pub tokens: Vec<Token>,
    /// Baseline of the leftmost token (page space)
    pub y: f64,
}

impl TextLine {
    fn from_tokens(mut tokens: Vec<Token>) -> Self {
        tokens.sort_by(|a, b| a.x.total_cmp(&b.x));
        let y = tokens.first().map(|t| t.y).unwrap_or(0.0);
        Self { tokens, y }
    }

    /// Number of tokens on the line.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the line has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Group tokens into lines in reading order.
///
/// Every input token ends up in exactly one line; a token without siblings
/// becomes a one-token line.
pub fn group_into_lines(tokens: Vec<Token>, tolerance: f64) -> Vec<TextLine> {
    let tolerance = if tolerance > 0.0 { tolerance } else { 2.0 };

    let mut buckets: BTreeMap<i64, Vec<Token>> = BTreeMap::new();
    for token in tokens {
        let key = (token.y / tolerance).round() as i64;
        buckets.entry(key).or_default().push(token);
    }

    buckets
        .into_values()
        .rev()
        .map(TextLine::from_tokens)
        .collect()
}
