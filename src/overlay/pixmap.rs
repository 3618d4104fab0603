//! Raster surface backed by a tiny-skia pixmap, exportable as PNG.
//!
//! tiny-skia does no text shaping, so labels are kept alongside the pixels
//! and exposed through [`PixmapSurface::labels`].

use super::surface::{
    DrawingSurface, Ellipse, PathSegment, PathShape, Point, Rgba, StrokeStyle, TextStyle,
};
use crate::error::{MirrorError, Result};
use std::io::Cursor;
use std::path::Path;
use tiny_skia::{BlendMode, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub at: Point,
}

#[derive(Default)]
pub struct PixmapSurface {
    pixmap: Option<Pixmap>,
    width: u32,
    height: u32,
    labels: Vec<TextRun>,
}

impl PixmapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[TextRun] {
        &self.labels
    }

    /// Straight-alpha RGBA at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let pixel = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Rgba {
            r: pixel.red(),
            g: pixel.green(),
            b: pixel.blue(),
            a: pixel.alpha(),
        })
    }

    /// Count of pixels with any coverage.
    pub fn painted_pixels(&self) -> usize {
        self.pixmap
            .as_ref()
            .map(|p| p.pixels().iter().filter(|px| px.alpha() > 0).count())
            .unwrap_or(0)
    }

    pub fn to_image(&self) -> Result<image::RgbaImage> {
        let pixmap = self
            .pixmap
            .as_ref()
            .ok_or_else(|| MirrorError::Config("surface has no size yet".into()))?;
        let mut raw = Vec::with_capacity(pixmap.pixels().len() * 4);
        for px in pixmap.pixels() {
            let c = px.demultiply();
            raw.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        image::RgbaImage::from_raw(self.width, self.height, raw)
            .ok_or_else(|| MirrorError::Config("pixel buffer size mismatch".into()))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let img = self.to_image()?;
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img).write_to(&mut buf, image::ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.encode_png()?)?;
        Ok(())
    }

    fn paint(color: Rgba) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        paint
    }

    fn stroke_for(style: &StrokeStyle) -> Stroke {
        Stroke {
            width: style.line_width.max(0.1),
            ..Stroke::default()
        }
    }
}

impl DrawingSurface for PixmapSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixmap = Pixmap::new(width, height);
        self.labels.clear();
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        if x <= 0.0 && y <= 0.0 && x + width >= self.width as f32 && y + height >= self.height as f32
        {
            pixmap.fill(tiny_skia::Color::TRANSPARENT);
            self.labels.clear();
            return;
        }
        if let Some(rect) = Rect::from_xywh(x, y, width, height) {
            let mut paint = Paint::default();
            paint.blend_mode = BlendMode::Clear;
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    fn stroke_ellipse(&mut self, ellipse: &Ellipse, style: &StrokeStyle) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let bounds = Rect::from_xywh(
            ellipse.center.x - ellipse.radius_x,
            ellipse.center.y - ellipse.radius_y,
            ellipse.radius_x * 2.0,
            ellipse.radius_y * 2.0,
        );
        if let Some(path) = bounds.and_then(PathBuilder::from_oval) {
            pixmap.stroke_path(
                &path,
                &Self::paint(style.color),
                &Self::stroke_for(style),
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke_path(&mut self, shape: &PathShape, style: &StrokeStyle) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let mut pb = PathBuilder::new();
        for segment in &shape.segments {
            match *segment {
                PathSegment::MoveTo(p) => pb.move_to(p.x, p.y),
                PathSegment::LineTo(p) => pb.line_to(p.x, p.y),
                PathSegment::QuadTo { control, to } => {
                    pb.quad_to(control.x, control.y, to.x, to.y)
                }
            }
        }
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(
                &path,
                &Self::paint(style.color),
                &Self::stroke_for(style),
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_text(&mut self, text: &str, at: Point, _style: &TextStyle) {
        if self.pixmap.is_some() {
            self.labels.push(TextRun {
                text: text.to_string(),
                at,
            });
        }
    }
}
