//! Input events delivered to widgets.

/// Events that widgets can respond to.
///
/// Positions are in logical pixels relative to the window's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Mouse button pressed (touch start maps here as `MouseButton::Left`).
    MousePress {
        button: MouseButton,
        position: (f32, f32),
    },
    /// Mouse button released.
    MouseRelease {
        button: MouseButton,
        position: (f32, f32),
    },
    /// Cursor moved.
    MouseMove { position: (f32, f32) },
    /// Cursor left the window.
    CursorLeft,
}

impl Event {
    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Event::MousePress { position, .. }
            | Event::MouseRelease { position, .. }
            | Event::MouseMove { position } => Some(*position),
            Event::CursorLeft => None,
        }
    }

    /// Convenience constructor for a primary-button press, i.e. a tap.
    pub fn tap(x: f32, y: f32) -> Self {
        Event::MousePress {
            button: MouseButton::Left,
            position: (x, y),
        }
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}
