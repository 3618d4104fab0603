//! Recording surface — keeps the draw commands that are currently visible.

use super::surface::{DrawingSurface, Ellipse, PathShape, Point, StrokeStyle, TextStyle};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DrawCommand {
    ClearRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    StrokeEllipse {
        ellipse: Ellipse,
        style: StrokeStyle,
    },
    StrokePath {
        path: PathShape,
        style: StrokeStyle,
    },
    FillText {
        text: String,
        at: Point,
        style: TextStyle,
    },
}

/// A clear covering the whole surface drops every earlier command, so
/// `commands()` is exactly what a viewer would see.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayList {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    #[serde(skip)]
    resets: u64,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of times the contents were wiped by a resize or full clear.
    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// True when nothing but clears is visible.
    pub fn is_blank(&self) -> bool {
        self.commands
            .iter()
            .all(|c| matches!(c, DrawCommand::ClearRect { .. }))
    }

    /// Text of every visible label.
    pub fn labels(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn covers_surface(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
        x <= 0.0 && y <= 0.0 && x + width >= self.width as f32 && y + height >= self.height as f32
    }
}

impl DrawingSurface for DisplayList {
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
        self.resets += 1;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if self.covers_surface(x, y, width, height) {
            self.commands.clear();
            self.resets += 1;
        }
        self.commands.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_ellipse(&mut self, ellipse: &Ellipse, style: &StrokeStyle) {
        self.commands.push(DrawCommand::StrokeEllipse {
            ellipse: *ellipse,
            style: *style,
        });
    }

    fn stroke_path(&mut self, path: &PathShape, style: &StrokeStyle) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            style: *style,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
    }
}
