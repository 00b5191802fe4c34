//! Draw-command recording.
//!
//! Widgets never talk to the GPU directly. During `draw` they push primitives
//! into a [`Renderer`], which records them together with the active clip
//! rectangle and layer. The presenter replays the recorded list on the GPU,
//! and tests inspect it directly.

use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::layout::{Bounds, Size};

/// RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Which pass a command is drawn in. Overlay commands are drawn after every
/// base command, so popups sit above sibling widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Base,
    Overlay,
}

/// A recorded drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        bounds: Bounds,
        color: Color,
        clip: Option<Bounds>,
    },
    Triangle {
        points: [(f32, f32); 3],
        color: Color,
        clip: Option<Bounds>,
    },
    Text {
        content: String,
        /// Top-left of the text's line box
        position: (f32, f32),
        size: f32,
        color: Color,
        clip: Option<Bounds>,
    },
}

impl DrawCommand {
    pub fn clip(&self) -> Option<Bounds> {
        match self {
            DrawCommand::FillRect { clip, .. }
            | DrawCommand::Triangle { clip, .. }
            | DrawCommand::Text { clip, .. } => *clip,
        }
    }
}

/// Records draw commands for one frame.
pub struct Renderer {
    viewport: Size,
    now: Instant,
    base: Vec<DrawCommand>,
    overlay: Vec<DrawCommand>,
    layer: Layer,
    clip_stack: Vec<Bounds>,
}

impl Renderer {
    /// Start recording a frame of the given viewport size at time `now`.
    pub fn new(viewport: Size, now: Instant) -> Self {
        Self {
            viewport,
            now,
            base: Vec::new(),
            overlay: Vec::new(),
            layer: Layer::Base,
            clip_stack: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Timestamp of the frame, used by widgets to sample animations.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Clip rectangle currently in effect.
    pub fn current_clip(&self) -> Option<Bounds> {
        self.clip_stack.last().copied()
    }

    /// Restrict subsequent commands to `bounds` (intersected with the active clip).
    pub fn push_clip(&mut self, bounds: Bounds) {
        let clip = match self.current_clip() {
            Some(outer) => outer.intersect(&bounds),
            None => bounds,
        };
        self.clip_stack.push(clip);
    }

    pub fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            log::warn!("pop_clip called with an empty clip stack");
        }
    }

    /// Route subsequent commands to the overlay layer.
    pub fn begin_overlay(&mut self) {
        self.layer = Layer::Overlay;
    }

    pub fn end_overlay(&mut self) {
        self.layer = Layer::Base;
    }

    fn push(&mut self, command: DrawCommand) {
        match self.layer {
            Layer::Base => self.base.push(command),
            Layer::Overlay => self.overlay.push(command),
        }
    }

    /// Draw a filled rectangle.
    pub fn fill_rect(&mut self, bounds: Bounds, color: Color) {
        let clip = self.current_clip();
        self.push(DrawCommand::FillRect {
            bounds,
            color,
            clip,
        });
    }

    /// Draw a filled triangle.
    pub fn fill_triangle(&mut self, points: [(f32, f32); 3], color: Color) {
        let clip = self.current_clip();
        self.push(DrawCommand::Triangle {
            points,
            color,
            clip,
        });
    }

    /// Draw a single line of text with its line box starting at (x, y).
    pub fn text(&mut self, content: &str, x: f32, y: f32, size: f32, color: Color) {
        let clip = self.current_clip();
        self.push(DrawCommand::Text {
            content: content.to_string(),
            position: (x, y),
            size,
            color,
            clip,
        });
    }

    /// Recorded commands in paint order (base layer, then overlay).
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.base.iter().chain(self.overlay.iter())
    }

    /// Recorded commands of one layer.
    pub fn layer_commands(&self, layer: Layer) -> &[DrawCommand] {
        match layer {
            Layer::Base => &self.base,
            Layer::Overlay => &self.overlay,
        }
    }

    /// Text commands in paint order, convenient for assertions.
    pub fn texts(&self) -> Vec<&str> {
        self.commands()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> Renderer {
        Renderer::new(Size::new(800.0, 600.0), Instant::now())
    }

    #[test]
    fn test_nested_clips_intersect() {
        let mut r = renderer();
        r.push_clip(Bounds::new(0.0, 0.0, 100.0, 100.0));
        r.push_clip(Bounds::new(50.0, 50.0, 100.0, 100.0));
        r.fill_rect(Bounds::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        r.pop_clip();
        r.fill_rect(Bounds::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        r.pop_clip();
        r.fill_rect(Bounds::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);

        let clips: Vec<_> = r.commands().map(|c| c.clip()).collect();
        assert_eq!(
            clips,
            vec![
                Some(Bounds::new(50.0, 50.0, 50.0, 50.0)),
                Some(Bounds::new(0.0, 0.0, 100.0, 100.0)),
                None,
            ]
        );
    }

    #[test]
    fn test_overlay_commands_paint_last() {
        let mut r = renderer();
        r.begin_overlay();
        r.text("popup", 0.0, 0.0, 14.0, Color::WHITE);
        r.end_overlay();
        r.text("base", 0.0, 0.0, 14.0, Color::WHITE);

        assert_eq!(r.texts(), vec!["base", "popup"]);
        assert_eq!(r.layer_commands(Layer::Overlay).len(), 1);
    }

    #[test]
    fn test_with_alpha() {
        let c = Color::WHITE.with_alpha(0.05);
        assert_eq!(c, Color::rgba(1.0, 1.0, 1.0, 0.05));
    }
}
