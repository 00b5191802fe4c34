// Widget implementations

mod column;
mod container_helpers;
mod selectable_list;
mod text;

pub use column::{column, Column};
pub use selectable_list::{selectable_list, SelectableList};
pub use text::{text, Text};
