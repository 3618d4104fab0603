//! Expression Renderer — paints the face sketch and a debug label for one frame.

use super::geometry::FaceSketch;
use super::surface::{DrawingSurface, Point, Rgba, StrokeStyle, TextStyle, LANDMARK_GREEN};
use crate::camera::VideoFrameInfo;
use crate::emotion::FacialExpression;

/// Where the "Detected: ..." label is drawn.
pub const LABEL_POSITION: Point = Point::new(10.0, 30.0);

#[derive(Debug, Clone)]
pub struct ExpressionRenderer {
    stroke: StrokeStyle,
    label: TextStyle,
}

impl Default for ExpressionRenderer {
    fn default() -> Self {
        Self::new(LANDMARK_GREEN)
    }
}

impl ExpressionRenderer {
    pub fn new(color: Rgba) -> Self {
        Self {
            stroke: StrokeStyle {
                color,
                line_width: 2.0,
            },
            label: TextStyle {
                color,
                font: "16px sans-serif".to_string(),
            },
        }
    }

    pub fn label_for(expression: FacialExpression) -> String {
        format!("Detected: {}", expression)
    }

    /// Resize the surface to the frame, clear it, and draw the face unless the
    /// video is paused or ended. Returns whether a face was drawn.
    pub fn render(
        &self,
        surface: &mut dyn DrawingSurface,
        frame: VideoFrameInfo,
        expression: FacialExpression,
    ) -> bool {
        surface.set_size(frame.width, frame.height);
        surface.clear_rect(0.0, 0.0, frame.width as f32, frame.height as f32);

        if frame.paused || frame.ended {
            return false;
        }

        let sketch = FaceSketch::compute(frame.width as f32, frame.height as f32, expression);
        surface.stroke_ellipse(&sketch.outline, &self.stroke);
        surface.stroke_ellipse(&sketch.left_eye, &self.stroke);
        surface.stroke_ellipse(&sketch.right_eye, &self.stroke);
        surface.stroke_path(&sketch.mouth, &self.stroke);
        surface.stroke_path(&sketch.left_brow, &self.stroke);
        surface.stroke_path(&sketch.right_brow, &self.stroke);
        surface.fill_text(&Self::label_for(expression), LABEL_POSITION, &self.label);

        tracing::trace!(
            width = frame.width,
            height = frame.height,
            expression = %expression,
            "overlay drawn"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::display_list::{DisplayList, DrawCommand};
    use crate::overlay::pixmap::PixmapSurface;
    use crate::overlay::surface::PathSegment;

    fn live(width: u32, height: u32) -> VideoFrameInfo {
        VideoFrameInfo {
            width,
            height,
            paused: false,
            ended: false,
        }
    }

    fn has_curve(list: &DisplayList) -> bool {
        list.commands().iter().any(|c| match c {
            DrawCommand::StrokePath { path, .. } => path
                .segments
                .iter()
                .any(|s| matches!(s, PathSegment::QuadTo { .. })),
            _ => false,
        })
    }

    #[test]
    fn clears_before_drawing() {
        let renderer = ExpressionRenderer::default();
        let mut list = DisplayList::new();
        assert!(renderer.render(&mut list, live(640, 480), FacialExpression::Smile));

        let commands = list.commands();
        assert!(matches!(
            commands[0],
            DrawCommand::ClearRect { x, y, width, height }
                if x == 0.0 && y == 0.0 && width == 640.0 && height == 480.0
        ));
        let ellipses = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeEllipse { .. }))
            .count();
        let paths = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePath { .. }))
            .count();
        assert_eq!(ellipses, 3);
        assert_eq!(paths, 3);
        assert_eq!(list.labels(), vec!["Detected: smile"]);
    }

    #[test]
    fn frown_replaces_smile_entirely() {
        let renderer = ExpressionRenderer::default();
        let mut list = DisplayList::new();
        renderer.render(&mut list, live(640, 480), FacialExpression::Smile);
        let smile_mouth = FaceSketch::compute(640.0, 480.0, FacialExpression::Smile).mouth;

        renderer.render(&mut list, live(640, 480), FacialExpression::Frown);
        let mouths: Vec<&DrawCommand> = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePath { path, .. } if *path == smile_mouth))
            .collect();
        assert!(mouths.is_empty(), "smile mouth survived the frown render");
        assert_eq!(list.labels(), vec!["Detected: frown"]);
        assert!(has_curve(&list));
    }

    #[test]
    fn paused_or_ended_video_leaves_surface_blank() {
        let renderer = ExpressionRenderer::default();
        let mut list = DisplayList::new();
        renderer.render(&mut list, live(320, 240), FacialExpression::Smile);

        let paused = VideoFrameInfo {
            paused: true,
            ..live(320, 240)
        };
        assert!(!renderer.render(&mut list, paused, FacialExpression::Smile));
        assert!(list.is_blank());

        let ended = VideoFrameInfo {
            ended: true,
            ..live(320, 240)
        };
        assert!(!renderer.render(&mut list, ended, FacialExpression::Frown));
        assert!(list.is_blank());
    }

    #[test]
    fn surface_follows_frame_size() {
        let renderer = ExpressionRenderer::default();
        let mut list = DisplayList::new();
        renderer.render(&mut list, live(0, 0), FacialExpression::Neutral);
        assert_eq!(list.size(), (0, 0));
        renderer.render(&mut list, live(1280, 720), FacialExpression::Neutral);
        assert_eq!(list.size(), (1280, 720));
    }

    #[test]
    fn raster_frames_do_not_accumulate() {
        let renderer = ExpressionRenderer::default();
        let mut surface = PixmapSurface::new();
        renderer.render(&mut surface, live(320, 240), FacialExpression::Frown);
        let frown_only = surface.painted_pixels();

        renderer.render(&mut surface, live(320, 240), FacialExpression::Smile);
        renderer.render(&mut surface, live(320, 240), FacialExpression::Frown);
        assert_eq!(surface.painted_pixels(), frown_only);
        assert_eq!(surface.labels().len(), 1);
        assert_eq!(surface.labels()[0].text, "Detected: frown");
    }
}
