//! Application messages

use dropdown_ui::SelectableListState;

/// Messages handled by [`crate::DropdownApp::update`].
#[derive(Debug, Clone)]
pub enum Message {
    /// The list committed a selection
    Select(String),
    /// The list's expand/collapse state changed
    ListChanged(SelectableListState),
}
