//! Text widget

use crate::constants::{char_width, line_height, DEFAULT_FONT_SIZE};
use crate::layout::{Bounds, Length, Size};
use crate::renderer::{Color, Renderer};
use crate::theme::current_theme;
use crate::widget::Widget;

/// A single line of static text
pub struct Text {
    content: String,
    size: f32,
    color: Color,
    width: Length,
}

impl Text {
    /// Create a new text widget
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            size: DEFAULT_FONT_SIZE,
            color: current_theme().text_primary,
            width: Length::Shrink,
        }
    }

    /// Set the font size
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set the text color
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the width
    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    /// Approximate text dimensions; the presenter shapes the real glyphs
    fn measure(&self) -> Size {
        Size::new(
            self.content.chars().count() as f32 * char_width(self.size),
            line_height(self.size),
        )
    }
}

impl<M> Widget<M> for Text {
    fn layout(&mut self, available: Size) -> Size {
        let content_size = self.measure();
        Size::new(
            self.width.resolve(available.width, content_size.width),
            content_size.height,
        )
    }

    fn draw(&self, renderer: &mut Renderer, bounds: Bounds) {
        renderer.text(&self.content, bounds.x, bounds.y, self.size, self.color);
    }
}

/// Create a text widget
pub fn text(content: impl Into<String>) -> Text {
    Text::new(content)
}
