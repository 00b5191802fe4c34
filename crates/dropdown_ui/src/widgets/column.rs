//! Column layout widget

use crate::constants::DEFAULT_SPACING;
use crate::element::Element;
use crate::event::Event;
use crate::layout::{Alignment, Bounds, Length, Padding, Size};
use crate::renderer::Renderer;
use crate::widget::{EventResult, Widget};

use super::container_helpers;

/// A vertical column layout widget
pub struct Column<M> {
    children: Vec<Element<M>>,
    spacing: f32,
    padding: Padding,
    width: Length,
    height: Length,
    align_x: Alignment,
    /// Cached child bounds from layout, relative to the column
    child_bounds: Vec<Bounds>,
}

impl<M> Column<M> {
    /// Create a new column with the given children
    pub fn new(children: Vec<Element<M>>) -> Self {
        Self {
            children,
            spacing: DEFAULT_SPACING,
            padding: Padding::ZERO,
            width: Length::Shrink,
            height: Length::Shrink,
            align_x: Alignment::Start,
            child_bounds: Vec::new(),
        }
    }

    /// Set spacing between children
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set padding around the column
    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Set the width
    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    /// Set the height
    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    /// Set horizontal alignment of children
    pub fn align_x(mut self, align: Alignment) -> Self {
        self.align_x = align;
        self
    }
}

impl<M: 'static> Widget<M> for Column<M> {
    fn has_active_overlay(&self) -> bool {
        self.children.iter().any(|c| c.has_active_overlay())
    }

    fn capture_bounds(&self, layout_bounds: Bounds) -> Option<Bounds> {
        // Find any child with active overlay and get its capture bounds
        for (child, child_bounds) in self.children.iter().zip(self.child_bounds.iter()) {
            if child.has_active_overlay() {
                let absolute_bounds =
                    container_helpers::translate_bounds(*child_bounds, layout_bounds);
                if let Some(child_capture) = child.capture_bounds(absolute_bounds) {
                    return Some(layout_bounds.union(&child_capture));
                }
            }
        }
        None
    }

    fn layout(&mut self, available: Size) -> Size {
        log::trace!("Column layout: available={:?}", available);

        let inner_available = Size::new(
            (available.width - self.padding.horizontal()).max(0.0),
            (available.height - self.padding.vertical()).max(0.0),
        );

        // First pass: measure children
        let mut content_height = 0.0;
        let mut max_width: f32 = 0.0;
        for child in self.children.iter_mut() {
            let child_size = child.layout(inner_available);
            max_width = max_width.max(child_size.width);
            content_height += child_size.height;
        }
        if !self.children.is_empty() {
            content_height += self.spacing * (self.children.len() - 1) as f32;
        }

        let width = self
            .width
            .resolve(available.width, max_width + self.padding.horizontal());
        let inner_width = (width - self.padding.horizontal()).max(0.0);

        // Second pass: position children
        self.child_bounds.clear();
        let mut y = self.padding.top;
        for child in self.children.iter() {
            let child_size = child.cached_size();
            let x_offset = self.align_x.align(inner_width, child_size.width);
            self.child_bounds.push(Bounds::new(
                self.padding.left + x_offset,
                y,
                child_size.width,
                child_size.height,
            ));
            y += child_size.height + self.spacing;
        }

        Size::new(
            width,
            self.height
                .resolve(available.height, content_height + self.padding.vertical()),
        )
    }

    fn draw(&self, renderer: &mut Renderer, bounds: Bounds) {
        container_helpers::draw_children(&self.children, &self.child_bounds, renderer, bounds);
    }

    fn on_event(&mut self, event: &Event, bounds: Bounds) -> EventResult<M> {
        container_helpers::dispatch_event_to_children(
            &mut self.children,
            &self.child_bounds,
            event,
            bounds,
        )
    }

    fn children(&self) -> &[Element<M>] {
        &self.children
    }
}

/// Create a column from a list of elements
pub fn column<M>(children: Vec<Element<M>>) -> Column<M> {
    Column::new(children)
}
