//! Widget trait and related types

use crate::element::Element;
use crate::event::Event;
use crate::layout::{Bounds, Size};
use crate::renderer::Renderer;

/// Messages produced while handling a single event.
///
/// Most widgets emit zero or one message; a widget that changes its own state
/// and notifies its caller in the same gesture emits both, and the runtime
/// applies them to `Application::update` in order before the next view.
pub struct EventResult<M> {
    messages: Vec<M>,
}

impl<M> EventResult<M> {
    /// No message; the event was ignored.
    pub fn none() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Append a message if one was produced.
    pub fn push(&mut self, message: Option<M>) {
        if let Some(message) = message {
            self.messages.push(message);
        }
    }

    /// Append every message of `other` after this result's messages.
    pub fn merge(&mut self, other: EventResult<M>) {
        self.messages.extend(other.messages);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<M> {
        self.messages
    }
}

impl<M> Default for EventResult<M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<M> From<Option<M>> for EventResult<M> {
    fn from(message: Option<M>) -> Self {
        let mut result = Self::none();
        result.push(message);
        result
    }
}

/// The core widget trait that all UI elements implement
pub trait Widget<M> {
    /// Calculate the size this widget wants given available space
    fn layout(&mut self, available: Size) -> Size;

    /// Draw the widget to the renderer
    fn draw(&self, renderer: &mut Renderer, bounds: Bounds);

    /// Handle an event, optionally producing messages
    fn on_event(&mut self, event: &Event, bounds: Bounds) -> EventResult<M> {
        let _ = (event, bounds);
        EventResult::none()
    }

    /// Whether the widget currently draws or accepts input outside its layout bounds
    fn has_active_overlay(&self) -> bool {
        false
    }

    /// Area that should receive events, which may exceed the layout bounds while
    /// an overlay is active (e.g. an expanded list)
    fn capture_bounds(&self, layout_bounds: Bounds) -> Option<Bounds> {
        let _ = layout_bounds;
        None
    }

    /// Get children for traversal (default: no children)
    fn children(&self) -> &[Element<M>] {
        &[]
    }
}
