//! Drawing surface seam: the handful of 2D primitives the overlay needs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// `#00ff00`, the overlay's landmark colour.
pub const LANDMARK_GREEN: Rgba = Rgba::rgb(0, 255, 0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub line_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub color: Rgba,
    pub font: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned ellipse given by centre and radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub center: Point,
    pub radius_x: f32,
    pub radius_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, to: Point },
}

/// Open polyline/curve made of move, line and quadratic segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    pub segments: Vec<PathSegment>,
}

impl PathShape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: Point) -> Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Point) -> Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    pub fn quad_to(mut self, control: Point, to: Point) -> Self {
        self.segments.push(PathSegment::QuadTo { control, to });
        self
    }

    pub fn segment(from: Point, to: Point) -> Self {
        Self::new().move_to(from).line_to(to)
    }
}

/// A 2D target the renderer paints on. Setting the size resets its contents.
pub trait DrawingSurface {
    fn set_size(&mut self, width: u32, height: u32);
    fn size(&self) -> (u32, u32);
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn stroke_ellipse(&mut self, ellipse: &Ellipse, style: &StrokeStyle);
    fn stroke_path(&mut self, path: &PathShape, style: &StrokeStyle);
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);

    /// Clear the whole surface.
    fn clear(&mut self) {
        let (w, h) = self.size();
        self.clear_rect(0.0, 0.0, w as f32, h as f32);
    }
}
