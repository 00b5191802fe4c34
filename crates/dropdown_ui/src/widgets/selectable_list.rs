//! Selectable list widget.
//!
//! A vertical stack of text rows that collapses to the current selection.
//! Tapping the selection expands the list; tapping any row while expanded
//! collapses it and selects that row. Expansion and collapse are animated by
//! moving the row stack and a clipping window (the mask) over it.
//!
//! In dynamic mode rows keep their original order and the stack slides so the
//! selected row sits in the window. Otherwise the selection is pinned as the
//! first row and the write is delayed until the collapse has mostly played
//! out, so the reorder is not visible.

use std::time::Duration;

use web_time::Instant;

use crate::animation::Spring;
use crate::builder_field;
use crate::callback::Callback;
use crate::constants::{
    line_height, CHEVRON_GAP, CHEVRON_HEIGHT, CHEVRON_TRAILING_PADDING, CHEVRON_WIDTH,
    COMMIT_DELAY, LIST_DEFAULT_WIDTH, LIST_FONT_SIZE, LIST_TEXT_PADDING_X, ROW_HEIGHT,
};
use crate::event::{Event, MouseButton};
use crate::layout::{Bounds, Size};
use crate::renderer::{Color, Renderer};
use crate::state::{ordered_rows, ListMetrics, ListProps, SelectableListState, TapOutcome};
use crate::theme::current_theme;
use crate::widget::{EventResult, Widget};

/// A dropdown-style list of selectable text rows.
pub struct SelectableList<M> {
    options: Vec<String>,
    selection: String,
    state: SelectableListState,
    dynamic: bool,
    width: f32,
    row_height: f32,
    font_size: f32,
    active: Color,
    inactive: Color,
    text_color: Color,
    indicator_color: Color,
    spring: Spring,
    commit_delay: Duration,
    on_select: Callback<String, M>,
    on_change: Callback<SelectableListState, M>,
}

impl<M> SelectableList<M> {
    /// Create a list over `options` showing `selection`.
    pub fn new(options: Vec<String>, selection: impl Into<String>) -> Self {
        let theme = current_theme();
        Self {
            options,
            selection: selection.into(),
            state: SelectableListState::new(),
            dynamic: true,
            width: LIST_DEFAULT_WIDTH,
            row_height: ROW_HEIGHT,
            font_size: LIST_FONT_SIZE,
            active: theme.list_active,
            inactive: theme.list_inactive,
            text_color: theme.text_primary,
            indicator_color: theme.indicator,
            spring: Spring::interactive(),
            commit_delay: COMMIT_DELAY,
            on_select: Callback::none(),
            on_change: Callback::none(),
        }
    }

    builder_field!(dynamic, bool);
    builder_field!(width, f32);
    builder_field!(row_height, f32);
    builder_field!(font_size, f32);
    builder_field!(active_fill, active, Color);
    builder_field!(inactive_fill, inactive, Color);
    builder_field!(text_color, Color);
    builder_field!(indicator_color, Color);
    builder_field!(spring, Spring);
    builder_field!(commit_delay, Duration);

    /// Use the state owned by the application.
    pub fn state(mut self, state: &SelectableListState) -> Self {
        self.state = state.clone();
        self
    }

    /// Called with the tapped label when a selection is made. The caller is
    /// expected to store it as the new selection.
    pub fn on_select<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> M + 'static,
    {
        self.on_select = Callback::new(f);
        self
    }

    /// Called with the updated state whenever a tap changes it.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(SelectableListState) -> M + 'static,
    {
        self.on_change = Callback::new(f);
        self
    }

    fn props(&self) -> ListProps<'_> {
        ListProps {
            options: &self.options,
            selection: &self.selection,
            dynamic: self.dynamic,
            row_height: self.row_height,
            spring: self.spring,
            commit_delay: self.commit_delay,
        }
    }

    /// Absolute window rectangle for the given metrics.
    fn mask_bounds(&self, bounds: Bounds, metrics: &ListMetrics) -> Bounds {
        Bounds::new(
            bounds.x,
            bounds.y + metrics.mask_offset,
            bounds.width,
            metrics.mask_height,
        )
    }

    /// Label of the row under `(x, y)`, if that row is inside the resting window.
    fn row_at(&self, bounds: Bounds, x: f32, y: f32) -> Option<String> {
        if self.options.is_empty() {
            return None;
        }

        let target = self.props().target(self.state.is_expanded());
        if !self.mask_bounds(bounds, &target).contains(x, y) {
            return None;
        }

        let stack_top = bounds.y + target.content_offset;
        let row = ((y - stack_top) / self.row_height).floor();
        if row < 0.0 {
            return None;
        }

        ordered_rows(&self.options, &self.selection, self.dynamic)
            .get(row as usize)
            .map(|label| label.to_string())
    }

    /// The chevron stays on the widget's own row while the stack moves.
    fn draw_chevron(&self, renderer: &mut Renderer, bounds: Bounds) {
        let cx = bounds.right() - CHEVRON_TRAILING_PADDING - CHEVRON_WIDTH / 2.0;
        let cy = bounds.y + self.row_height / 2.0;
        let half_width = CHEVRON_WIDTH / 2.0;
        let half_gap = CHEVRON_GAP / 2.0;

        renderer.fill_triangle(
            [
                (cx - half_width, cy - half_gap),
                (cx + half_width, cy - half_gap),
                (cx, cy - half_gap - CHEVRON_HEIGHT),
            ],
            self.indicator_color,
        );
        renderer.fill_triangle(
            [
                (cx - half_width, cy + half_gap),
                (cx + half_width, cy + half_gap),
                (cx, cy + half_gap + CHEVRON_HEIGHT),
            ],
            self.indicator_color,
        );
    }
}

impl<M: 'static> Widget<M> for SelectableList<M> {
    fn layout(&mut self, available: Size) -> Size {
        // Only the collapsed row takes up space; the expanded stack is an overlay
        Size::new(self.width.min(available.width), self.row_height)
    }

    fn draw(&self, renderer: &mut Renderer, bounds: Bounds) {
        let props = self.props();
        let metrics = self.state.displayed_metrics(&props, renderer.now());
        let rows = ordered_rows(&self.options, &self.selection, self.dynamic);
        let mask = self.mask_bounds(bounds, &metrics);
        let stack_top = bounds.y + metrics.content_offset;

        log::trace!(
            "SelectableList draw: bounds={:?}, metrics={:?}",
            bounds,
            metrics
        );

        renderer.begin_overlay();
        renderer.push_clip(mask);

        renderer.fill_rect(
            Bounds::new(
                bounds.x,
                stack_top,
                bounds.width,
                rows.len() as f32 * self.row_height,
            ),
            self.inactive,
        );

        let text_offset = (self.row_height - line_height(self.font_size)) / 2.0;
        for (i, label) in rows.iter().enumerate() {
            let row_y = stack_top + i as f32 * self.row_height;
            if *label == self.selection {
                renderer.fill_rect(
                    Bounds::new(bounds.x, row_y, bounds.width, self.row_height),
                    self.active,
                );
            }
            renderer.text(
                label,
                bounds.x + LIST_TEXT_PADDING_X,
                row_y + text_offset,
                self.font_size,
                self.text_color,
            );
        }

        renderer.pop_clip();
        self.draw_chevron(renderer, bounds);
        renderer.end_overlay();
    }

    fn on_event(&mut self, event: &Event, bounds: Bounds) -> EventResult<M> {
        let Event::MousePress {
            button: MouseButton::Left,
            position: (x, y),
        } = *event
        else {
            return EventResult::none();
        };

        let Some(label) = self.row_at(bounds, x, y) else {
            return EventResult::none();
        };

        // `props` borrows self, so the state is taken out for the tap
        let mut state = std::mem::take(&mut self.state);
        let outcome = state.tap(&label, &self.props(), Instant::now());
        self.state = state;

        let mut result = EventResult::none();
        match outcome {
            TapOutcome::Ignored => return result,
            TapOutcome::Committed(label) => {
                result.push(self.on_select.call(label));
            }
            TapOutcome::Expanded | TapOutcome::CommitScheduled(_) => {}
        }
        result.push(self.on_change.call(self.state.clone()));
        result
    }

    fn has_active_overlay(&self) -> bool {
        self.state.is_expanded()
    }

    fn capture_bounds(&self, layout_bounds: Bounds) -> Option<Bounds> {
        if !self.state.is_expanded() {
            return None;
        }
        let target = self.props().target(true);
        Some(layout_bounds.union(&self.mask_bounds(layout_bounds, &target)))
    }
}

/// Create a selectable list over `options` showing `selection`.
pub fn selectable_list<M>(options: Vec<String>, selection: impl Into<String>) -> SelectableList<M> {
    SelectableList::new(options, selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, Layer};

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Select(String),
        Change(SelectableListState),
    }

    const BOUNDS: Bounds = Bounds {
        x: 100.0,
        y: 50.0,
        width: LIST_DEFAULT_WIDTH,
        height: ROW_HEIGHT,
    };

    fn levels() -> Vec<String> {
        ["Easy", "Normal", "Hard", "Expert"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn list(selection: &str, state: &SelectableListState) -> SelectableList<Msg> {
        selectable_list(levels(), selection)
            .state(state)
            .on_select(Msg::Select)
            .on_change(Msg::Change)
    }

    /// Row centre for a row index counted from the widget top.
    fn row_center(row: f32) -> (f32, f32) {
        (BOUNDS.x + 20.0, BOUNDS.y + row * ROW_HEIGHT + ROW_HEIGHT / 2.0)
    }

    fn tap(widget: &mut SelectableList<Msg>, row: f32) -> Vec<Msg> {
        let (x, y) = row_center(row);
        widget.on_event(&Event::tap(x, y), BOUNDS).into_messages()
    }

    fn changed_state(messages: &[Msg]) -> SelectableListState {
        messages
            .iter()
            .find_map(|m| match m {
                Msg::Change(state) => Some(state.clone()),
                _ => None,
            })
            .expect("no state change emitted")
    }

    fn expanded(selection: &str, dynamic: bool) -> SelectableListState {
        let mut widget = list(selection, &SelectableListState::new()).dynamic(dynamic);
        changed_state(&tap(&mut widget, 0.0))
    }

    fn settled_frame(widget: &SelectableList<Msg>) -> Renderer {
        let mut renderer = Renderer::new(
            Size::new(800.0, 600.0),
            Instant::now() + Duration::from_secs(5),
        );
        widget.draw(&mut renderer, BOUNDS);
        renderer
    }

    #[test]
    fn test_layout_is_one_row() {
        let mut widget = list("Easy", &SelectableListState::new());
        assert_eq!(
            widget.layout(Size::new(800.0, 600.0)),
            Size::new(LIST_DEFAULT_WIDTH, ROW_HEIGHT)
        );
    }

    #[test]
    fn test_tap_selection_expands() {
        let mut widget = list("Easy", &SelectableListState::new());
        let messages = tap(&mut widget, 0.0);

        assert_eq!(messages.len(), 1);
        assert!(changed_state(&messages).is_expanded());
        assert!(widget.has_active_overlay());
    }

    #[test]
    fn test_collapsed_tap_outside_window_is_ignored() {
        let mut widget = list("Easy", &SelectableListState::new());
        // The row below the window is not hit-testable while collapsed
        assert!(tap(&mut widget, 1.0).is_empty());
        assert!(!widget.has_active_overlay());
    }

    #[test]
    fn test_right_click_is_ignored() {
        let mut widget = list("Easy", &SelectableListState::new());
        let (x, y) = row_center(0.0);
        let event = Event::MousePress {
            button: MouseButton::Right,
            position: (x, y),
        };
        assert!(widget.on_event(&event, BOUNDS).is_empty());
    }

    #[test]
    fn test_dynamic_select_emits_selection_and_collapse_together() {
        let state = expanded("Easy", true);
        let mut widget = list("Easy", &state);

        let messages = tap(&mut widget, 1.0);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Msg::Select("Normal".to_string()));
        assert!(!changed_state(&messages).is_expanded());
    }

    #[test]
    fn test_dynamic_expanded_rows_sit_around_selection() {
        // With "Hard" selected the expanded window starts two rows above the widget
        let state = expanded("Hard", true);
        let mut widget = list("Hard", &state);

        let messages = tap(&mut widget, -2.0);

        assert_eq!(messages[0], Msg::Select("Easy".to_string()));
    }

    #[test]
    fn test_static_select_defers_write() {
        let state = expanded("Easy", false);
        let mut widget = list("Easy", &state).dynamic(false);

        let messages = tap(&mut widget, 3.0);

        assert_eq!(messages.len(), 1);
        let mut state = changed_state(&messages);
        assert!(!state.is_expanded());
        assert_eq!(
            state.pending_commit().map(|p| p.label.as_str()),
            Some("Expert")
        );
        assert_eq!(state.poll_commit(Instant::now()), None);
        assert_eq!(
            state.poll_commit(Instant::now() + COMMIT_DELAY),
            Some("Expert".to_string())
        );
    }

    #[test]
    fn test_capture_bounds_cover_expanded_window() {
        let state = expanded("Hard", true);
        let widget = list("Hard", &state);

        let capture = widget.capture_bounds(BOUNDS).expect("expanded list captures");
        assert_eq!(capture.y, BOUNDS.y - 2.0 * ROW_HEIGHT);
        assert_eq!(capture.height, 4.0 * ROW_HEIGHT);
        assert!(list("Hard", &SelectableListState::new())
            .capture_bounds(BOUNDS)
            .is_none());
    }

    #[test]
    fn test_static_rows_draw_selection_first() {
        let widget = list("Hard", &SelectableListState::new()).dynamic(false);
        let renderer = settled_frame(&widget);

        assert_eq!(renderer.texts(), vec!["Hard", "Easy", "Normal", "Expert"]);
    }

    #[test]
    fn test_draws_in_overlay_clipped_to_window() {
        let widget = list("Hard", &SelectableListState::new());
        let renderer = settled_frame(&widget);

        assert!(renderer.layer_commands(Layer::Base).is_empty());

        let window = Bounds::new(BOUNDS.x, BOUNDS.y, BOUNDS.width, ROW_HEIGHT);
        for command in renderer.commands() {
            match command {
                DrawCommand::Triangle { clip, .. } => assert_eq!(*clip, None),
                other => assert_eq!(other.clip(), Some(window)),
            }
        }
    }

    #[test]
    fn test_dynamic_stack_is_offset_by_selection() {
        let widget = list("Hard", &SelectableListState::new());
        let renderer = settled_frame(&widget);

        let hard_y = renderer.commands().find_map(|c| match c {
            DrawCommand::Text {
                content, position, ..
            } if content == "Hard" => Some(position.1),
            _ => None,
        });
        let text_offset = (ROW_HEIGHT - line_height(LIST_FONT_SIZE)) / 2.0;
        assert_eq!(hard_y, Some(BOUNDS.y + text_offset));
    }

    #[test]
    fn test_active_fill_behind_selected_row_only() {
        let active = Color::rgba(1.0, 0.0, 0.0, 0.5);
        let widget = list("Normal", &SelectableListState::new()).active_fill(active);
        let renderer = settled_frame(&widget);

        let active_rows: Vec<Bounds> = renderer
            .commands()
            .filter_map(|c| match c {
                DrawCommand::FillRect { bounds, color, .. } if *color == active => Some(*bounds),
                _ => None,
            })
            .collect();
        assert_eq!(
            active_rows,
            vec![Bounds::new(BOUNDS.x, BOUNDS.y, BOUNDS.width, ROW_HEIGHT)]
        );
    }

    #[test]
    fn test_chevron_drawn_for_empty_list() {
        let widget: SelectableList<Msg> = selectable_list(Vec::new(), "");
        let renderer = settled_frame(&widget);

        let triangles = renderer
            .commands()
            .filter(|c| matches!(c, DrawCommand::Triangle { .. }))
            .count();
        assert_eq!(triangles, 2);
    }

    #[test]
    fn test_chevron_stays_on_widget_row() {
        let state = expanded("Hard", true);
        let widget = list("Hard", &state);
        let renderer = settled_frame(&widget);

        let points: Vec<(f32, f32)> = renderer
            .commands()
            .filter_map(|c| match c {
                DrawCommand::Triangle { points, .. } => Some(*points),
                _ => None,
            })
            .flatten()
            .collect();
        assert_eq!(points.len(), 6);
        for (_, y) in points {
            assert!(y >= BOUNDS.y && y <= BOUNDS.y + ROW_HEIGHT, "chevron point at y = {y}");
        }
    }

    #[test]
    fn test_empty_list_ignores_taps() {
        let mut widget: SelectableList<Msg> = selectable_list(Vec::new(), "")
            .dynamic(false)
            .on_change(Msg::Change);
        assert!(tap(&mut widget, 0.0).is_empty());
    }
}
