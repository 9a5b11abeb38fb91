//! Decoder-facing input types.
//!
//! These mirror what an external PDF decoder hands over per page: positioned
//! text runs, the graphics operator list and the page size. Every field that a
//! decoder may omit is optional here; the layout stages decide what to do
//! with incomplete records instead of failing deserialization.

use serde::{Deserialize, Serialize};

use super::Rgb;

/// One decoded page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInput {
    /// Page width in page units (points)
    pub width: f64,

    /// Page height in page units (points)
    pub height: f64,

    /// Text runs in emission order
    #[serde(default)]
    pub text_tokens: Vec<RawTextToken>,

    /// Graphics operators in emission order
    #[serde(default)]
    pub operators: Vec<Operator>,
}

impl PageInput {
    /// Create an empty page with the given dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            text_tokens: Vec::new(),
            operators: Vec::new(),
        }
    }

    /// Create an empty US Letter page.
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    /// Append a text token.
    pub fn push_token(&mut self, token: RawTextToken) {
        self.text_tokens.push(token);
    }

    /// Append a graphics operator.
    pub fn push_operator(&mut self, op: Operator) {
        self.operators.push(op);
    }
}

/// A text run as emitted by the decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTextToken {
    /// Rendered string
    pub text: Option<String>,

    /// Text rendering matrix `[a, b, c, d, e, f]`; `e`/`f` are the origin
    pub transform: Option<[f64; 6]>,

    /// Font reference, either a bare id or a resource object
    #[serde(alias = "fontRef", alias = "fontName")]
    pub font: Option<RawFont>,

    /// Advance width of the run, when the decoder knows it
    pub width: Option<f64>,

    /// Fill color, in either 0–1 or 0–255 encoding
    pub color: Option<[f64; 3]>,
}

impl RawTextToken {
    /// Build a token at `(x, y)` with an unscaled/unrotated matrix of `size`.
    pub fn new(text: impl Into<String>, x: f64, y: f64, size: f64, font: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            transform: Some([size, 0.0, 0.0, size, x, y]),
            font: Some(RawFont::Id(font.into())),
            width: None,
            color: None,
        }
    }

    /// Set the advance width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the fill color.
    pub fn with_color(mut self, r: f64, g: f64, b: f64) -> Self {
        self.color = Some([r, g, b]);
        self
    }

    /// Attach a resolved font name to the font reference.
    pub fn with_font_name(mut self, name: impl Into<String>) -> Self {
        let id = self
            .font
            .as_ref()
            .map(|f| f.id().to_string())
            .unwrap_or_default();
        self.font = Some(RawFont::Resource {
            id,
            name: Some(name.into()),
        });
        self
    }
}

/// Font information as a decoder may provide it.
///
/// Some decoders only give the internal reference (`"g_d0_f1"`), others a
/// resource object carrying the embedded font name as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFont {
    /// Bare font reference
    Id(String),
    /// Font resource with optional embedded name
    Resource {
        /// Font reference
        id: String,
        /// Embedded font name (e.g. `ABCDEF+Calibri-Bold`)
        #[serde(default, alias = "fontName", alias = "loadedName")]
        name: Option<String>,
    },
}

impl RawFont {
    /// The reference used to deduplicate fonts.
    pub fn id(&self) -> &str {
        match self {
            RawFont::Id(id) => id,
            RawFont::Resource { id, .. } => id,
        }
    }

    /// The best available name for family inference.
    pub fn display_name(&self) -> &str {
        match self {
            RawFont::Id(id) => id,
            RawFont::Resource { id, name } => name.as_deref().filter(|n| !n.is_empty()).unwrap_or(id),
        }
    }
}

/// Graphics operator codes understood by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperatorCode {
    /// `RG`
    SetStrokeRgb,
    /// `rg`
    SetFillRgb,
    /// `SC`/`SCN`
    SetStrokeColorN,
    /// `sc`/`scn`
    SetFillColorN,
    /// `G`
    SetStrokeGray,
    /// `g`
    SetFillGray,
    /// `w`
    SetLineWidth,
    /// `m`
    MoveTo,
    /// `l`
    LineTo,
    /// `S`
    Stroke,
    /// `f`
    Fill,
    /// `re`
    Rectangle,
    /// Anything else the decoder emits
    #[serde(other)]
    Unknown,
}

/// Which paint a color operator targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintTarget {
    /// Stroke paint
    Stroke,
    /// Fill paint
    Fill,
}

/// A graphics operator with numeric operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    /// Operator code
    #[serde(alias = "opcode")]
    pub op: OperatorCode,

    /// Numeric operands
    #[serde(default)]
    pub args: Vec<f64>,
}

impl Operator {
    /// Create an operator.
    pub fn new(op: OperatorCode, args: Vec<f64>) -> Self {
        Self { op, args }
    }

    /// Decode the color set by this operator, if it is a color operator
    /// with well-formed operands.
    pub fn paint_color(&self) -> Option<(PaintTarget, Rgb)> {
        let target = match self.op {
            OperatorCode::SetStrokeRgb
            | OperatorCode::SetStrokeColorN
            | OperatorCode::SetStrokeGray => PaintTarget::Stroke,
            OperatorCode::SetFillRgb | OperatorCode::SetFillColorN | OperatorCode::SetFillGray => {
                PaintTarget::Fill
            }
            _ => return None,
        };

        let color = match (self.op, self.args.as_slice()) {
            (OperatorCode::SetStrokeGray | OperatorCode::SetFillGray, [level, ..]) => {
                Rgb::from_channels(*level, *level, *level)
            }
            (OperatorCode::SetStrokeRgb | OperatorCode::SetFillRgb, [r, g, b, ..]) => {
                Rgb::from_channels(*r, *g, *b)
            }
            (OperatorCode::SetStrokeColorN | OperatorCode::SetFillColorN, args) => match args {
                [level] => Rgb::from_channels(*level, *level, *level),
                [r, g, b] => Rgb::from_channels(*r, *g, *b),
                [c, m, y, k] => Rgb::from_cmyk(*c, *m, *y, *k),
                _ => None,
            },
            _ => None,
        }?;

        Some((target, color))
    }
}
