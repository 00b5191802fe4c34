//! Centralized theme system for dropdown_ui
//!
//! Provides the dark palette used by the host and the default colors every
//! widget falls back to.

use std::sync::OnceLock;

use crate::renderer::Color;
use dropdown_gpu::ClearColor;

/// A complete color theme for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Main application background
    pub background: Color,

    /// Primary text color (high contrast)
    pub text_primary: Color,

    /// Secondary text color (captions)
    pub text_secondary: Color,

    /// Fill behind the selected row of a list
    pub list_active: Color,

    /// Fill behind the whole row stack of a list
    pub list_inactive: Color,

    /// Chevron/disclosure indicator
    pub indicator: Color,
}

impl Theme {
    /// Create the default dark theme
    pub fn dark() -> Self {
        Self {
            background: Color::rgb(0.09, 0.09, 0.11),
            text_primary: Color::rgb(0.95, 0.95, 0.97),
            text_secondary: Color::rgb(0.58, 0.58, 0.65),
            // Primary at 10% and white at 5%, the translucent tints of a dark palette
            list_active: Color::rgb(0.95, 0.95, 0.97).with_alpha(0.1),
            list_inactive: Color::WHITE.with_alpha(0.05),
            indicator: Color::rgb(0.95, 0.95, 0.97),
        }
    }

    /// Clear color matching the background.
    pub fn clear_color(&self) -> ClearColor {
        ClearColor::new(
            self.background.r as f64,
            self.background.g as f64,
            self.background.b as f64,
            self.background.a as f64,
        )
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Global theme singleton for convenience
/// Widgets can use this to get default colors without requiring theme to be passed
static CURRENT_THEME: OnceLock<Theme> = OnceLock::new();

/// Set the global theme (can only be called once)
///
/// Returns `Err` with the provided theme if a theme has already been set.
pub fn set_theme(theme: Theme) -> Result<(), Theme> {
    CURRENT_THEME.set(theme)
}

/// Get the current global theme (or dark theme if not set)
pub fn current_theme() -> &'static Theme {
    CURRENT_THEME.get_or_init(Theme::dark)
}
