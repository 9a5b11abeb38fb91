//! Color value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An RGB color with channels in the 0–1 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
}

impl Rgb {
    /// Create a color from channels that are already in the 0–1 range.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Pure black, the default ink of a PDF graphics state.
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Create a grey level.
    pub fn gray(level: f64) -> Self {
        Self::new(level, level, level)
    }

    /// Build a color from raw channel values of unknown encoding.
    ///
    /// A channel above 1 means the source used the 0–255 scale; all three
    /// channels are then rescaled. Returns `None` for non-finite or negative
    /// input.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Option<Self> {
        let channels = [r, g, b];
        if channels.iter().any(|c| !c.is_finite() || *c < 0.0) {
            return None;
        }

        let scale = if channels.iter().any(|c| *c > 1.0) {
            255.0
        } else {
            1.0
        };

        Some(Self::new(
            (r / scale).min(1.0),
            (g / scale).min(1.0),
            (b / scale).min(1.0),
        ))
    }

    /// Convert CMYK components (0–1) to RGB.
    pub fn from_cmyk(c: f64, m: f64, y: f64, k: f64) -> Option<Self> {
        let components = [c, m, y, k];
        if components.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let [c, m, y, k] = components.map(|v| v.clamp(0.0, 1.0));
        Some(Self::new(
            (1.0 - c) * (1.0 - k),
            (1.0 - m) * (1.0 - k),
            (1.0 - y) * (1.0 - k),
        ))
    }

    fn max_channel(&self) -> f64 {
        self.r.max(self.g).max(self.b)
    }

    fn min_channel(&self) -> f64 {
        self.r.min(self.g).min(self.b)
    }

    /// Brightness (HSV value).
    pub fn brightness(&self) -> f64 {
        self.max_channel()
    }

    /// Saturation (HSV).
    pub fn saturation(&self) -> f64 {
        let max = self.max_channel();
        if max <= 0.0 {
            0.0
        } else {
            (max - self.min_channel()) / max
        }
    }

    /// Difference between the strongest and weakest channel.
    pub fn spread(&self) -> f64 {
        self.max_channel() - self.min_channel()
    }

    /// Convert to a hex color, rounding each channel to 8 bits.
    pub fn to_hex(&self) -> HexColor {
        let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        HexColor::from_bytes(to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }
}

/// A `#rrggbb` color string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Build from 8-bit channels.
    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{:02x}{:02x}{:02x}", r, g, b))
    }

    /// Parse a `#rrggbb` (or `rrggbb`) string. Case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        let digits = value.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(format!("#{}", digits.to_ascii_lowercase())))
    }

    /// Black (`#000000`).
    pub fn black() -> Self {
        Self::from_bytes(0, 0, 0)
    }

    /// The hex string including the leading `#`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert back to 0–1 channels.
    pub fn to_rgb(&self) -> Rgb {
        let channel = |i: usize| {
            u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0) as f64 / 255.0
        };
        Rgb::new(channel(1), channel(3), channel(5))
    }

    /// True when all three channels are equal (black, white and pure greys).
    pub fn is_achromatic(&self) -> bool {
        let hex = &self.0[1..];
        hex[0..2] == hex[2..4] && hex[2..4] == hex[4..6]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value).ok_or_else(|| format!("invalid hex color: {}", value))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}
