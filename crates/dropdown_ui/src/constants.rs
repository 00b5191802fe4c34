//! Centralized constants for dropdown_ui
//!
//! All magic numbers and repeated constants are defined here for consistency
//! and easy maintenance.

use std::time::Duration;

// =============================================================================
// Typography
// =============================================================================

/// Default font size used for captions and labels
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Row label font size of the selectable list (a "title" size)
pub const LIST_FONT_SIZE: f32 = 20.0;

/// Approximate character width as a ratio of font size
/// Used for text measurement approximation
pub const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Line height as a ratio of font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Approximate width of a line of text
#[inline]
pub fn char_width(font_size: f32) -> f32 {
    font_size * CHAR_WIDTH_FACTOR
}

/// Height of a single line of text
#[inline]
pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR
}

// =============================================================================
// Layout & Spacing
// =============================================================================

/// Default spacing between children in Column
pub const DEFAULT_SPACING: f32 = 8.0;

/// Standard horizontal padding
pub const PADDING_STANDARD: f32 = 16.0;

// =============================================================================
// Selectable List
// =============================================================================

/// Height of every row
pub const ROW_HEIGHT: f32 = 55.0;

/// Default width of the list
pub const LIST_DEFAULT_WIDTH: f32 = 130.0;

/// Horizontal padding between a row's edge and its label
pub const LIST_TEXT_PADDING_X: f32 = PADDING_STANDARD;

/// Distance between the chevron and the trailing edge
pub const CHEVRON_TRAILING_PADDING: f32 = 10.0;

/// Width of one chevron arrow
pub const CHEVRON_WIDTH: f32 = 10.0;

/// Height of one chevron arrow
pub const CHEVRON_HEIGHT: f32 = 5.0;

/// Vertical gap between the up and down arrows
pub const CHEVRON_GAP: f32 = 3.0;

/// Delay between collapsing and writing the selection in non-dynamic mode.
/// Writing it earlier reorders the rows while the collapse is still visible.
pub const COMMIT_DELAY: Duration = Duration::from_millis(250);

// =============================================================================
// Animation
// =============================================================================

/// Spring response (seconds for one undamped oscillation)
pub const SPRING_RESPONSE: f32 = 0.6;

/// Spring damping fraction (1.0 = critically damped)
pub const SPRING_DAMPING_FRACTION: f32 = 0.7;

/// Remaining amplitude below which a spring is considered settled
pub const SPRING_SETTLE_THRESHOLD: f32 = 0.001;
