//! Widget state types for stateful widgets
//!
//! Widgets are rebuilt from the application's state on every view, so anything
//! that must survive between frames lives here, owned by the application and
//! updated through the widget's `on_change` messages.

use std::time::Duration;

use web_time::Instant;

use crate::animation::Spring;
use crate::constants::{COMMIT_DELAY, ROW_HEIGHT};

/// Index of `selection` in `options`, falling back to the first row when the
/// selection is not one of the options.
pub fn selection_index(options: &[String], selection: &str) -> usize {
    options
        .iter()
        .position(|option| option == selection)
        .unwrap_or(0)
}

/// Labels in the order their rows are stacked.
///
/// Dynamic lists keep the original order. Static lists pin the selection to
/// the top and follow it with every other option in original order.
pub fn ordered_rows<'a>(options: &'a [String], selection: &'a str, dynamic: bool) -> Vec<&'a str> {
    if dynamic {
        return options.iter().map(String::as_str).collect();
    }

    std::iter::once(selection)
        .chain(
            options
                .iter()
                .map(String::as_str)
                .filter(|option| *option != selection),
        )
        .collect()
}

/// Vertical geometry of a list relative to its top edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ListMetrics {
    /// Translation applied to the whole row stack
    pub content_offset: f32,
    /// Top of the visible window
    pub mask_offset: f32,
    /// Height of the visible window
    pub mask_height: f32,
}

impl ListMetrics {
    /// Resting geometry for the given list configuration.
    pub fn target(
        option_count: usize,
        index: usize,
        expanded: bool,
        dynamic: bool,
        row_height: f32,
    ) -> Self {
        let selected_offset = -(index as f32) * row_height;

        Self {
            content_offset: if dynamic { selected_offset } else { 0.0 },
            mask_offset: if dynamic && expanded {
                selected_offset
            } else {
                0.0
            },
            mask_height: if expanded {
                option_count as f32 * row_height
            } else {
                row_height
            },
        }
    }

    fn interpolate(from: &ListMetrics, to: &ListMetrics, spring: &Spring, elapsed: Duration) -> Self {
        Self {
            content_offset: spring.interpolate(from.content_offset, to.content_offset, elapsed),
            mask_offset: spring.interpolate(from.mask_offset, to.mask_offset, elapsed),
            mask_height: spring.interpolate(from.mask_height, to.mask_height, elapsed),
        }
    }
}

/// Everything the list state machine needs to know about the list it drives.
#[derive(Debug, Clone, Copy)]
pub struct ListProps<'a> {
    pub options: &'a [String],
    pub selection: &'a str,
    pub dynamic: bool,
    pub row_height: f32,
    pub spring: Spring,
    pub commit_delay: Duration,
}

impl<'a> ListProps<'a> {
    pub fn new(options: &'a [String], selection: &'a str) -> Self {
        Self {
            options,
            selection,
            dynamic: true,
            row_height: ROW_HEIGHT,
            spring: Spring::interactive(),
            commit_delay: COMMIT_DELAY,
        }
    }

    pub fn dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    pub fn selected_index(&self) -> usize {
        selection_index(self.options, self.selection)
    }

    pub fn target(&self, expanded: bool) -> ListMetrics {
        ListMetrics::target(
            self.options.len(),
            self.selected_index(),
            expanded,
            self.dynamic,
            self.row_height,
        )
    }
}

/// A selection write scheduled for later.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCommit {
    pub label: String,
    pub due: Instant,
}

/// The geometry on screen when the last state change happened.
#[derive(Debug, Clone, PartialEq)]
struct Transition {
    from: ListMetrics,
    started: Instant,
    spring: Spring,
}

impl Transition {
    fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    fn is_running(&self, now: Instant) -> bool {
        !self.spring.is_settled(self.elapsed(now))
    }
}

/// What a tap on a row did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// Collapsed and the tapped row was not the selection
    Ignored,
    /// The list opened
    Expanded,
    /// The list closed and the label must be written now
    Committed(String),
    /// The list closed and the label will be written by `poll_commit`
    CommitScheduled(String),
}

/// State for a selectable list.
///
/// A fresh state is collapsed; mounting a list with `SelectableListState::new()`
/// is what resets it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectableListState {
    expanded: bool,
    pending: Option<PendingCommit>,
    transition: Option<Transition>,
}

impl SelectableListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn pending_commit(&self) -> Option<&PendingCommit> {
        self.pending.as_ref()
    }

    /// Apply a tap on the row labelled `label`.
    pub fn tap(&mut self, label: &str, props: &ListProps<'_>, now: Instant) -> TapOutcome {
        let displayed = self.displayed_metrics(props, now);

        if self.expanded {
            self.expanded = false;
            self.start_transition(displayed, props.spring, now);

            if props.dynamic {
                log::debug!("List collapsed, committing '{}'", label);
                return TapOutcome::Committed(label.to_string());
            }

            let commit = PendingCommit {
                label: label.to_string(),
                due: now + props.commit_delay,
            };
            if let Some(replaced) = self.pending.replace(commit) {
                log::debug!("Pending commit '{}' replaced before it fired", replaced.label);
            }
            log::debug!(
                "List collapsed, '{}' commits in {:?}",
                label,
                props.commit_delay
            );
            return TapOutcome::CommitScheduled(label.to_string());
        }

        if label == props.selection {
            self.expanded = true;
            self.start_transition(displayed, props.spring, now);
            log::debug!("List expanded from '{}'", label);
            TapOutcome::Expanded
        } else {
            TapOutcome::Ignored
        }
    }

    /// Take the pending commit once it is due.
    pub fn poll_commit(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref().is_some_and(|p| p.due <= now) {
            self.pending.take().map(|p| p.label)
        } else {
            None
        }
    }

    /// Drop the pending commit, if any.
    pub fn cancel_pending(&mut self) -> Option<PendingCommit> {
        self.pending.take()
    }

    /// Whether an expand/collapse animation is still moving.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition.as_ref().is_some_and(|t| t.is_running(now))
    }

    /// Whether the runtime must keep producing frames for this list.
    pub fn needs_tick(&self, now: Instant) -> bool {
        self.pending.is_some() || self.is_animating(now)
    }

    /// Geometry to draw at `now`, animating from the last change toward the
    /// resting geometry of the current props.
    pub fn displayed_metrics(&self, props: &ListProps<'_>, now: Instant) -> ListMetrics {
        let target = props.target(self.expanded);

        match &self.transition {
            Some(t) if t.is_running(now) => {
                ListMetrics::interpolate(&t.from, &target, &t.spring, t.elapsed(now))
            }
            _ => target,
        }
    }

    fn start_transition(&mut self, from: ListMetrics, spring: Spring, now: Instant) {
        self.transition = Some(Transition {
            from,
            started: now,
            spring,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels() -> Vec<String> {
        ["Easy", "Normal", "Hard", "Expert"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_new_state_is_collapsed() {
        let state = SelectableListState::new();
        let options = levels();
        let props = ListProps::new(&options, "Easy");

        assert!(!state.is_expanded());
        assert!(state.pending_commit().is_none());
        assert_eq!(
            state.displayed_metrics(&props, Instant::now()).mask_height,
            ROW_HEIGHT
        );
    }

    #[test]
    fn test_selection_index_falls_back_to_first() {
        let options = levels();
        assert_eq!(selection_index(&options, "Hard"), 2);
        assert_eq!(selection_index(&options, "Impossible"), 0);
        assert_eq!(selection_index(&[], "Easy"), 0);
    }

    #[test]
    fn test_static_rows_pin_selection_first() {
        let options = levels();
        assert_eq!(
            ordered_rows(&options, "Hard", false),
            vec!["Hard", "Easy", "Normal", "Expert"]
        );
        assert_eq!(
            ordered_rows(&options, "Hard", true),
            vec!["Easy", "Normal", "Hard", "Expert"]
        );
    }

    #[test]
    fn test_dynamic_offsets_follow_selection() {
        let collapsed = ListMetrics::target(4, 2, false, true, ROW_HEIGHT);
        assert_eq!(collapsed.content_offset, -2.0 * ROW_HEIGHT);
        assert_eq!(collapsed.mask_offset, 0.0);
        assert_eq!(collapsed.mask_height, ROW_HEIGHT);

        let expanded = ListMetrics::target(4, 2, true, true, ROW_HEIGHT);
        assert_eq!(expanded.content_offset, -2.0 * ROW_HEIGHT);
        assert_eq!(expanded.mask_offset, -2.0 * ROW_HEIGHT);
        assert_eq!(expanded.mask_height, 4.0 * ROW_HEIGHT);
    }

    #[test]
    fn test_static_lists_never_offset() {
        let expanded = ListMetrics::target(4, 3, true, false, ROW_HEIGHT);
        assert_eq!(expanded.content_offset, 0.0);
        assert_eq!(expanded.mask_offset, 0.0);
        assert_eq!(expanded.mask_height, 4.0 * ROW_HEIGHT);
    }

    #[test]
    fn test_unknown_selection_offsets_like_first_row() {
        let options = levels();
        let props = ListProps::new(&options, "Impossible");
        assert_eq!(props.target(true), ListMetrics::target(4, 0, true, true, ROW_HEIGHT));
        assert_eq!(props.target(true).content_offset, 0.0);
    }

    #[test]
    fn test_collapsed_tap_on_other_row_is_ignored() {
        let options = levels();
        let props = ListProps::new(&options, "Easy");
        let mut state = SelectableListState::new();

        let outcome = state.tap("Hard", &props, Instant::now());

        assert_eq!(outcome, TapOutcome::Ignored);
        assert_eq!(state, SelectableListState::new());
    }

    #[test]
    fn test_tap_on_selection_expands() {
        let options = levels();
        let props = ListProps::new(&options, "Easy");
        let mut state = SelectableListState::new();

        assert_eq!(state.tap("Easy", &props, Instant::now()), TapOutcome::Expanded);
        assert!(state.is_expanded());
    }

    #[test]
    fn test_dynamic_commit_is_immediate() {
        let options = levels();
        let props = ListProps::new(&options, "Easy");
        let mut state = SelectableListState::new();
        let now = Instant::now();

        state.tap("Easy", &props, now);
        let outcome = state.tap("Normal", &props, now + Duration::from_millis(800));

        assert_eq!(outcome, TapOutcome::Committed("Normal".to_string()));
        assert!(!state.is_expanded());
        assert!(state.pending_commit().is_none());
    }

    #[test]
    fn test_static_commit_waits_for_delay() {
        let options = levels();
        let props = ListProps::new(&options, "Easy").dynamic(false);
        let mut state = SelectableListState::new();
        let now = Instant::now();

        state.tap("Easy", &props, now);
        let tapped_at = now + Duration::from_secs(1);
        let outcome = state.tap("Expert", &props, tapped_at);

        assert_eq!(outcome, TapOutcome::CommitScheduled("Expert".to_string()));
        assert!(!state.is_expanded());
        assert_eq!(state.poll_commit(tapped_at), None);
        assert_eq!(state.poll_commit(tapped_at + Duration::from_millis(249)), None);
        assert_eq!(
            state.poll_commit(tapped_at + COMMIT_DELAY),
            Some("Expert".to_string())
        );
        // Applied exactly once
        assert_eq!(state.poll_commit(tapped_at + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_newer_commit_replaces_pending_one() {
        let options = levels();
        let props = ListProps::new(&options, "Easy").dynamic(false);
        let mut state = SelectableListState::new();
        let now = Instant::now();

        state.tap("Easy", &props, now);
        state.tap("Hard", &props, now);
        // Reopen from the still-unchanged selection before the write fires
        let later = now + Duration::from_millis(100);
        state.tap("Easy", &props, later);
        state.tap("Expert", &props, later);

        assert_eq!(state.poll_commit(now + COMMIT_DELAY), None);
        assert_eq!(
            state.poll_commit(later + COMMIT_DELAY),
            Some("Expert".to_string())
        );
        assert!(state.pending_commit().is_none());
    }

    #[test]
    fn test_cancel_pending() {
        let options = levels();
        let props = ListProps::new(&options, "Easy").dynamic(false);
        let mut state = SelectableListState::new();
        let now = Instant::now();

        state.tap("Easy", &props, now);
        state.tap("Normal", &props, now);
        let cancelled = state.cancel_pending();

        assert_eq!(cancelled.map(|p| p.label), Some("Normal".to_string()));
        assert_eq!(state.poll_commit(now + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_transition_animates_then_rests() {
        let options = levels();
        let props = ListProps::new(&options, "Hard");
        let mut state = SelectableListState::new();
        let now = Instant::now();

        state.tap("Hard", &props, now);
        assert!(state.is_animating(now));
        assert!(state.needs_tick(now));

        let start = state.displayed_metrics(&props, now);
        assert_eq!(start.mask_height, ROW_HEIGHT);

        let mid = state.displayed_metrics(&props, now + Duration::from_millis(100));
        assert!(mid.mask_height > ROW_HEIGHT);
        assert!(mid.mask_offset < 0.0);

        let settled_at = now + Duration::from_secs(2);
        assert!(!state.is_animating(settled_at));
        assert!(!state.needs_tick(settled_at));
        assert_eq!(state.displayed_metrics(&props, settled_at), props.target(true));
    }
}
