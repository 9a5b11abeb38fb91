//! Error types for resume-layout.

use std::io;
use thiserror::Error;

/// Result type alias for resume-layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during layout analysis.
///
/// Heuristic shortfalls (no headers, no colors, unreadable tokens) are never
/// errors; they degrade to defaults. Only caller mistakes and failures of the
/// upstream decoder surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a decoder dump.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The upstream decoder failed before any tokens were produced.
    #[error("PDF decoding error: {0}")]
    Decode(String),

    /// Page metadata is unusable (non-finite or non-positive dimensions).
    #[error("Invalid page {page}: {reason}")]
    InvalidPage {
        /// Page number (1-indexed)
        page: u32,
        /// What was wrong
        reason: String,
    },

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Decode("xref table missing".to_string());
        assert_eq!(err.to_string(), "PDF decoding error: xref table missing");

        let err = Error::InvalidPage {
            page: 2,
            reason: "width is -1".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid page 2: width is -1");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
