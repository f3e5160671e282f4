//! # Immediate-Mode Draw Surface
//!
//! [`DrawList`] is the subset of an immediate-mode draw list the overlay
//! needs. Path calls build a polyline that the next stroke or fill
//! consumes (and clears).
//!
//! [`CommandBuffer`] records every call as a [`DrawCommand`]. Hosts can
//! replay it into their own backend; tests assert on it.

use radar_shared::{Rgba, Vec2};

/// Immediate-mode drawing surface supplied by the host each frame.
pub trait DrawList {
    /// Filled circle.
    fn add_circle_filled(&mut self, center: Vec2, radius: f32, color: Rgba, segments: usize);

    /// Text with its top-left corner at `pos`.
    fn add_text(&mut self, pos: Vec2, color: Rgba, text: &str);

    /// Size of `text` in the current font.
    fn calc_text_size(&self, text: &str) -> Vec2;

    /// Appends a point to the current path.
    fn path_line_to(&mut self, point: Vec2);

    /// Appends `segments + 1` points along an arc. Angle `0` is `+x`,
    /// angles grow clockwise on screen (`+y` is down).
    fn path_arc_to(&mut self, center: Vec2, radius: f32, a_min: f32, a_max: f32, segments: usize);

    /// Strokes the current path, then clears it.
    fn path_stroke(&mut self, color: Rgba, closed: bool, thickness: f32);

    /// Fills the current path as a convex polygon, then clears it.
    fn path_fill_convex(&mut self, color: Rgba);

    /// Discards the current path.
    fn path_clear(&mut self);
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum DrawCommand {
    CircleFilled { center: Vec2, radius: f32, color: Rgba, segments: usize },
    Text { pos: Vec2, color: Rgba, text: String },
    Polyline { points: Vec<Vec2>, color: Rgba, closed: bool, thickness: f32 },
    ConvexFill { points: Vec<Vec2>, color: Rgba },
}

/// Recording draw list with a fixed-advance text metric.
#[derive(Clone, Debug)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
    path: Vec<Vec2>,
    glyph: Vec2,
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBuffer {
    /// Buffer with a 7x13 pixel glyph cell.
    #[must_use]
    pub fn new() -> Self {
        Self::with_glyph_size(Vec2::new(7.0, 13.0))
    }

    /// Buffer with a custom glyph cell.
    #[must_use]
    pub fn with_glyph_size(glyph: Vec2) -> Self {
        Self { commands: Vec::with_capacity(256), path: Vec::with_capacity(256), glyph }
    }

    /// Recorded commands, in order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drops recorded commands and any open path. Keeps capacity.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.path.clear();
    }

    /// Texts drawn, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of commands matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }

    /// Points of the path not yet stroked or filled.
    #[must_use]
    pub fn open_path(&self) -> &[Vec2] {
        &self.path
    }
}

impl DrawList for CommandBuffer {
    fn add_circle_filled(&mut self, center: Vec2, radius: f32, color: Rgba, segments: usize) {
        self.commands.push(DrawCommand::CircleFilled { center, radius, color, segments });
    }

    fn add_text(&mut self, pos: Vec2, color: Rgba, text: &str) {
        self.commands.push(DrawCommand::Text { pos, color, text: text.to_owned() });
    }

    fn calc_text_size(&self, text: &str) -> Vec2 {
        #[allow(clippy::cast_precision_loss)]
        let columns = text.chars().count() as f32;
        Vec2::new(columns * self.glyph.x, self.glyph.y)
    }

    fn path_line_to(&mut self, point: Vec2) {
        self.path.push(point);
    }

    fn path_arc_to(&mut self, center: Vec2, radius: f32, a_min: f32, a_max: f32, segments: usize) {
        if segments == 0 {
            return;
        }
        #[allow(clippy::cast_precision_loss)]
        let step = (a_max - a_min) / segments as f32;
        self.path.extend((0..=segments).map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let (sin, cos) = (a_min + step * i as f32).sin_cos();
            Vec2::new(center.x + cos * radius, center.y + sin * radius)
        }));
    }

    fn path_stroke(&mut self, color: Rgba, closed: bool, thickness: f32) {
        let points = std::mem::take(&mut self.path);
        if points.len() >= 2 {
            self.commands.push(DrawCommand::Polyline { points, color, closed, thickness });
        }
    }

    fn path_fill_convex(&mut self, color: Rgba) {
        let points = std::mem::take(&mut self.path);
        if points.len() >= 3 {
            self.commands.push(DrawCommand::ConvexFill { points, color });
        }
    }

    fn path_clear(&mut self) {
        self.path.clear();
    }
}
