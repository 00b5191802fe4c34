//! Host application constants

use dropdown_ui::constants::LIST_DEFAULT_WIDTH;

/// Window title
pub const WINDOW_TITLE: &str = "DropDown";

/// Initial window size
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (400, 600);

/// Smallest usable window
pub const MIN_WINDOW_SIZE: (u32, u32) = (240, 360);

/// Space above the content column
pub const TOP_PADDING: f32 = 48.0;

/// Space between the caption, the list and the selection line
pub const CONTENT_SPACING: f32 = 16.0;

/// Caption font size
pub const TITLE_FONT_SIZE: f32 = 16.0;

/// Options offered when the config does not name any
pub const DEFAULT_OPTIONS: [&str; 4] = ["Easy", "Normal", "Hard", "Expert"];

/// Initial selection
pub const DEFAULT_SELECTION: &str = "Easy";

/// List width
pub const DEFAULT_LIST_WIDTH: f32 = LIST_DEFAULT_WIDTH;

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "DROPDOWN_CONFIG";

/// Directory under the platform config dir
pub const CONFIG_DIR_NAME: &str = "dropdown";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.json";
