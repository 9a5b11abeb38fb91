//! Vector graphics recovered from the operator stream.

use serde::{Deserialize, Serialize};

use super::HexColor;

/// A point in page space (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A painted shape, used for border and separator detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GraphicElement {
    /// A stroked path
    #[serde(rename_all = "camelCase")]
    Path {
        /// Path vertices in page space
        points: Vec<Point>,
        /// Stroke color at paint time
        stroke_color: HexColor,
        /// Line width at paint time
        line_width: f64,
    },

    /// A filled path
    #[serde(rename_all = "camelCase")]
    Fill {
        /// Path vertices in page space
        points: Vec<Point>,
        /// Fill color at paint time
        fill_color: HexColor,
    },

    /// A rectangle from the dedicated rectangle operator
    #[serde(rename_all = "camelCase")]
    Rectangle {
        /// Left edge in page space
        x: f64,
        /// Bottom edge in page space
        y: f64,
        /// Width
        width: f64,
        /// Height
        height: f64,
        /// Stroke color at emission time
        stroke_color: HexColor,
        /// Fill color at emission time
        fill_color: HexColor,
        /// Line width at emission time
        line_width: f64,
    },
}

impl GraphicElement {
    /// Check whether this element looks like a horizontal rule: a flat stroked
    /// path, or a rectangle far wider than it is tall.
    pub fn is_horizontal_rule(&self) -> bool {
        match self {
            GraphicElement::Path { points, .. } => {
                let (Some(first), Some(last)) = (points.first(), points.last()) else {
                    return false;
                };
                (first.y - last.y).abs() < 1.0 && (last.x - first.x).abs() > 20.0
            }
            GraphicElement::Rectangle { width, height, .. } => {
                height.abs() <= 3.0 && width.abs() > 20.0
            }
            GraphicElement::Fill { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_rule_detection() {
        let rule = GraphicElement::Path {
            points: vec![Point::new(72.0, 700.0), Point::new(540.0, 700.0)],
            stroke_color: HexColor::black(),
            line_width: 0.5,
        };
        assert!(rule.is_horizontal_rule());

        let bar = GraphicElement::Rectangle {
            x: 72.0,
            y: 650.0,
            width: 468.0,
            height: 1.0,
            stroke_color: HexColor::black(),
            fill_color: HexColor::black(),
            line_width: 1.0,
        };
        assert!(bar.is_horizontal_rule());

        let vertical = GraphicElement::Path {
            points: vec![Point::new(300.0, 100.0), Point::new(300.0, 700.0)],
            stroke_color: HexColor::black(),
            line_width: 1.0,
        };
        assert!(!vertical.is_horizontal_rule());
    }

    #[test]
    fn test_element_is_tagged() {
        let fill = GraphicElement::Fill {
            points: vec![Point::new(0.0, 0.0)],
            fill_color: HexColor::black(),
        };
        let json = serde_json::to_string(&fill).unwrap();
        assert!(json.contains("\"type\":\"fill\""));
        assert!(json.contains("\"fillColor\":\"#000000\""));
    }
}
