//! Page sources: the seam to the external PDF decoder.
//!
//! Layout analysis never decodes PDF containers itself. Anything that can
//! hand over materialized pages implements [`PageSource`]; the crate ships
//! implementations for in-memory pages and for JSON decoder dumps.
//!
//! # Example
//!
//! ```no_run
//! use resume_layout::source::{JsonPageSource, PageSource};
//!
//! fn main() -> resume_layout::Result<()> {
//!     let source = JsonPageSource::open("resume.pages.json")?;
//!     let pages = source.pages()?;
//!     println!("{} pages", pages.len());
//!     Ok(())
//! }
//! ```

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::PageInput;

/// A provider of decoded pages.
pub trait PageSource: Send + Sync {
    /// Name used in log messages.
    fn name(&self) -> &str {
        "pages"
    }

    /// Materialize all pages in document order.
    ///
    /// A decoder failure is reported once, as [`Error::Decode`].
    fn pages(&self) -> Result<Vec<PageInput>>;
}

impl PageSource for [PageInput] {
    fn pages(&self) -> Result<Vec<PageInput>> {
        Ok(self.to_vec())
    }
}

impl PageSource for Vec<PageInput> {
    fn pages(&self) -> Result<Vec<PageInput>> {
        Ok(self.clone())
    }
}

/// Shapes a decoder dump may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum DecoderDump {
    /// A bare list of pages
    Pages(Vec<PageInput>),
    /// An envelope, possibly carrying the decoder's failure
    Envelope {
        #[serde(default)]
        pages: Vec<PageInput>,
        #[serde(default)]
        error: Option<String>,
    },
}

/// Pages serialized by an external decoder as JSON.
///
/// Accepts either a list of pages or an object `{"pages": [...]}`. An
/// object with an `"error"` string records a failed decode.
#[derive(Debug, Clone)]
pub struct JsonPageSource {
    name: String,
    data: Vec<u8>,
}

impl JsonPageSource {
    /// Wrap JSON text or bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: "json".to_string(),
            data: data.into(),
        }
    }

    /// Read a dump from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::new(data))
    }

    /// Read a dump from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        Ok(Self {
            name: path.display().to_string(),
            data,
        })
    }

    /// Size of the raw dump in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the dump is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl PageSource for JsonPageSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn pages(&self) -> Result<Vec<PageInput>> {
        let dump: DecoderDump = serde_json::from_slice(&self.data)?;
        match dump {
            DecoderDump::Pages(pages) => Ok(pages),
            DecoderDump::Envelope {
                error: Some(message),
                ..
            } => {
                log::warn!("{}: decoder reported failure: {}", self.name, message);
                Err(Error::Decode(message))
            }
            DecoderDump::Envelope { pages, error: None } => Ok(pages),
        }
    }
}
