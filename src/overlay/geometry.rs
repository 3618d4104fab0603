//! Face sketch geometry — maps a frame size and an expression to the shapes
//! the overlay strokes.

use super::surface::{Ellipse, PathShape, Point};
use crate::emotion::FacialExpression;

/// Face width as a share of the frame width.
const FACE_WIDTH_RATIO: f32 = 0.4;
/// Face height as a share of the frame height.
const FACE_HEIGHT_RATIO: f32 = 0.6;

/// Shapes for one frame, in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceSketch {
    pub outline: Ellipse,
    pub left_eye: Ellipse,
    pub right_eye: Ellipse,
    pub left_brow: PathShape,
    pub right_brow: PathShape,
    pub mouth: PathShape,
}

impl FaceSketch {
    pub fn compute(width: f32, height: f32, expression: FacialExpression) -> Self {
        let cx = width / 2.0;
        let cy = height / 2.0;
        let face_w = width * FACE_WIDTH_RATIO;
        let face_h = height * FACE_HEIGHT_RATIO;

        let outline = Ellipse {
            center: Point::new(cx, cy),
            radius_x: face_w / 2.0,
            radius_y: face_h / 2.0,
        };

        // Eyes
        let eye_y = cy - face_h * 0.1;
        let eye_offset = face_w * 0.25;
        let eye = |x: f32| Ellipse {
            center: Point::new(x, eye_y),
            radius_x: face_w * 0.08,
            radius_y: face_h * 0.05,
        };
        let left_eye = eye(cx - eye_offset);
        let right_eye = eye(cx + eye_offset);

        // Mouth
        let mouth_y = cy + face_h * 0.2;
        let mouth_left = Point::new(cx - face_w * 0.2, mouth_y);
        let mouth_right = Point::new(cx + face_w * 0.2, mouth_y);
        let mouth = match expression {
            FacialExpression::Smile => PathShape::new()
                .move_to(mouth_left)
                .quad_to(Point::new(cx, mouth_y - face_h * 0.1), mouth_right),
            FacialExpression::Frown => PathShape::new()
                .move_to(mouth_left)
                .quad_to(Point::new(cx, mouth_y + face_h * 0.1), mouth_right),
            _ => PathShape::segment(mouth_left, mouth_right),
        };

        // Eyebrows: vertical offsets of the outer and inner ends from the brow line
        let brow_y = eye_y - face_h * 0.08;
        let (outer_dy, inner_dy) = match expression {
            FacialExpression::EyebrowRaise => (-face_h * 0.03, -face_h * 0.05),
            FacialExpression::Squint => (0.0, -face_h * 0.02),
            _ => (0.0, 0.0),
        };
        let half_brow = face_w * 0.1;
        let left_brow = PathShape::segment(
            Point::new(cx - eye_offset - half_brow, brow_y + outer_dy),
            Point::new(cx - eye_offset + half_brow, brow_y + inner_dy),
        );
        let right_brow = PathShape::segment(
            Point::new(cx + eye_offset - half_brow, brow_y + inner_dy),
            Point::new(cx + eye_offset + half_brow, brow_y + outer_dy),
        );

        Self {
            outline,
            left_eye,
            right_eye,
            left_brow,
            right_brow,
            mouth,
        }
    }
}
