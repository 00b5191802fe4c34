//! dropdown_ui - A small retained-message UI toolkit built on wgpu
//!
//! Applications describe their UI as a tree of widgets rebuilt from state
//! after every message. Widgets record draw commands into a [`Renderer`],
//! which the runtime replays on the GPU.

mod animation;
mod application;
mod callback;
mod color_pipeline;
pub mod constants;
mod context;
mod element;
mod error;
mod event;
mod layout;
#[macro_use]
mod macros;
mod presenter;
mod renderer;
mod state;
pub mod theme;
mod widget;
mod widgets;

pub use animation::Spring;
pub use application::{run, Application, Settings};
pub use callback::Callback;
pub use context::{Context, SelectableListBuilder};
pub use element::Element;
pub use error::{Result, UiError};
pub use event::{Event, MouseButton};
pub use layout::{Alignment, Bounds, Length, Padding, Size};
pub use renderer::{Color, DrawCommand, Layer, Renderer};
pub use state::{
    ordered_rows, selection_index, ListMetrics, ListProps, PendingCommit, SelectableListState,
    TapOutcome,
};
pub use theme::Theme;
pub use widget::{EventResult, Widget};

// Re-export widgets
pub use widgets::{column, selectable_list, text, Column, SelectableList, Text};

// Re-export dropdown_gpu types that users need
pub use dropdown_gpu::{ClearColor, GpuConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::application::{Application, Settings};
    pub use crate::context::Context;
    pub use crate::element::Element;
    pub use crate::event::{Event, MouseButton};
    pub use crate::layout::{Alignment, Bounds, Length, Padding, Size};
    pub use crate::renderer::Color;
    pub use crate::state::SelectableListState;
    pub use crate::widgets::{column, selectable_list, text};
    pub use crate::{ClearColor, Spring};
}
