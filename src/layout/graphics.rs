//! Graphics extraction.
//!
//! Replays a page's operator stream to recover stroked paths, filled shapes
//! and rectangles. The running paint state is a plain value threaded through
//! a fold; each operator produces the next state and at most one element.

use std::mem;

use crate::model::{GraphicElement, Operator, OperatorCode, PaintTarget, Point, Rgb};

/// Paint state between operators.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsState {
    /// Points appended since the last paint operator
    pub current_path: Vec<Point>,
    /// Current stroke color
    pub stroke_color: Rgb,
    /// Current fill color
    pub fill_color: Rgb,
    /// Current line width
    pub line_width: f64,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            current_path: Vec::new(),
            stroke_color: Rgb::black(),
            fill_color: Rgb::black(),
            line_width: 1.0,
        }
    }
}

impl GraphicsState {
    /// Apply one operator.
    ///
    /// Operators with missing or non-finite operands leave the state as it
    /// was. Painting always clears the current path, but only paths with at
    /// least two points become elements.
    pub fn step(mut self, op: &Operator) -> (Self, Option<GraphicElement>) {
        let mut emitted = None;

        match op.op {
            OperatorCode::SetStrokeRgb
            | OperatorCode::SetFillRgb
            | OperatorCode::SetStrokeColorN
            | OperatorCode::SetFillColorN
            | OperatorCode::SetStrokeGray
            | OperatorCode::SetFillGray => match op.paint_color() {
                Some((PaintTarget::Stroke, color)) => self.stroke_color = color,
                Some((PaintTarget::Fill, color)) => self.fill_color = color,
                None => log::debug!("Skipping color operator with bad operands: {:?}", op),
            },
            OperatorCode::SetLineWidth => match op.args.first() {
                Some(&width) if width.is_finite() && width >= 0.0 => self.line_width = width,
                _ => log::debug!("Skipping line width operator with bad operands: {:?}", op),
            },
            OperatorCode::MoveTo | OperatorCode::LineTo => match point_operand(&op.args) {
                Some(point) => self.current_path.push(point),
                None => log::debug!("Skipping path operator with bad operands: {:?}", op),
            },
            OperatorCode::Stroke => {
                let points = mem::take(&mut self.current_path);
                if points.len() >= 2 {
                    emitted = Some(GraphicElement::Path {
                        points,
                        stroke_color: self.stroke_color.to_hex(),
                        line_width: self.line_width,
                    });
                }
            }
            OperatorCode::Fill => {
                let points = mem::take(&mut self.current_path);
                if points.len() >= 2 {
                    emitted = Some(GraphicElement::Fill {
                        points,
                        fill_color: self.fill_color.to_hex(),
                    });
                }
            }
            OperatorCode::Rectangle => match op.args.as_slice() {
                [x, y, width, height, ..]
                    if [x, y, width, height].iter().all(|v| v.is_finite()) =>
                {
                    emitted = Some(GraphicElement::Rectangle {
                        x: *x,
                        y: *y,
                        width: *width,
                        height: *height,
                        stroke_color: self.stroke_color.to_hex(),
                        fill_color: self.fill_color.to_hex(),
                        line_width: self.line_width,
                    });
                }
                _ => log::debug!("Skipping rectangle with bad operands: {:?}", op),
            },
            OperatorCode::Unknown => {}
        }

        (self, emitted)
    }
}

fn point_operand(args: &[f64]) -> Option<Point> {
    match args {
        [x, y, ..] if x.is_finite() && y.is_finite() => Some(Point::new(*x, *y)),
        _ => None,
    }
}

/// Extract the painted elements of one page's operator stream.
pub fn extract_graphics(operators: &[Operator]) -> Vec<GraphicElement> {
    let (_, elements) = operators.iter().fold(
        (GraphicsState::default(), Vec::new()),
        |(state, mut elements), op| {
            let (state, emitted) = state.step(op);
            elements.extend(emitted);
            (state, elements)
        },
    );
    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HexColor;

    fn op(code: OperatorCode, args: &[f64]) -> Operator {
        Operator::new(code, args.to_vec())
    }

    #[test]
    fn test_stroked_rule() {
        let elements = extract_graphics(&[
            op(OperatorCode::SetStrokeRgb, &[0.3, 0.5, 0.3]),
            op(OperatorCode::SetLineWidth, &[0.75]),
            op(OperatorCode::MoveTo, &[72.0, 690.0]),
            op(OperatorCode::LineTo, &[540.0, 690.0]),
            op(OperatorCode::Stroke, &[]),
        ]);

        assert_eq!(
            elements,
            vec![GraphicElement::Path {
                points: vec![Point::new(72.0, 690.0), Point::new(540.0, 690.0)],
                stroke_color: HexColor::parse("#4d804d").unwrap(),
                line_width: 0.75,
            }]
        );
        assert!(elements[0].is_horizontal_rule());
    }

    #[test]
    fn test_fill_uses_fill_color() {
        let elements = extract_graphics(&[
            op(OperatorCode::SetFillGray, &[0.5]),
            op(OperatorCode::SetStrokeRgb, &[1.0, 0.0, 0.0]),
            op(OperatorCode::MoveTo, &[0.0, 0.0]),
            op(OperatorCode::LineTo, &[10.0, 0.0]),
            op(OperatorCode::LineTo, &[10.0, 10.0]),
            op(OperatorCode::Fill, &[]),
        ]);

        match &elements[..] {
            [GraphicElement::Fill { points, fill_color }] => {
                assert_eq!(points.len(), 3);
                assert_eq!(fill_color.as_str(), "#808080");
            }
            other => panic!("unexpected elements: {:?}", other),
        }
    }

    #[test]
    fn test_rectangle_emitted_directly() {
        let elements = extract_graphics(&[
            op(OperatorCode::SetFillColorN, &[0.0, 0.0, 0.0, 1.0]),
            op(OperatorCode::Rectangle, &[72.0, 650.0, 468.0, 1.0]),
        ]);

        match &elements[..] {
            [GraphicElement::Rectangle {
                width,
                fill_color,
                stroke_color,
                line_width,
                ..
            }] => {
                assert_eq!(*width, 468.0);
                assert_eq!(fill_color, &HexColor::black());
                assert_eq!(stroke_color, &HexColor::black());
                assert_eq!(*line_width, 1.0);
            }
            other => panic!("unexpected elements: {:?}", other),
        }
    }

    #[test]
    fn test_single_point_path_is_dropped_and_cleared() {
        let elements = extract_graphics(&[
            op(OperatorCode::MoveTo, &[5.0, 5.0]),
            op(OperatorCode::Stroke, &[]),
            op(OperatorCode::LineTo, &[6.0, 6.0]),
            op(OperatorCode::Stroke, &[]),
        ]);
        assert!(elements.is_empty());
    }

    #[test]
    fn test_malformed_operators_keep_state() {
        let state = GraphicsState::default();
        let (state, _) = state.step(&op(OperatorCode::SetStrokeRgb, &[0.2, 0.4, 0.6]));
        let before = state.clone();

        let (state, _) = state.step(&op(OperatorCode::SetStrokeRgb, &[0.9]));
        let (state, _) = state.step(&op(OperatorCode::SetLineWidth, &[f64::NAN]));
        let (state, _) = state.step(&op(OperatorCode::MoveTo, &[1.0]));
        let (state, emitted) = state.step(&op(OperatorCode::Rectangle, &[1.0, 2.0]));
        let (state, _) = state.step(&op(OperatorCode::Unknown, &[1.0, 2.0, 3.0]));

        assert!(emitted.is_none());
        assert_eq!(state, before);
    }
}
