//! Main application

use std::time::Duration;

use dropdown_ui::constants::DEFAULT_FONT_SIZE;
use dropdown_ui::prelude::*;
use dropdown_ui::theme::current_theme;
use web_time::Instant;

use crate::config::AppConfig;
use crate::constants::{CONTENT_SPACING, TITLE_FONT_SIZE, TOP_PADDING, WINDOW_TITLE};
use crate::message::Message;

/// Hosts one selectable list and owns its selection.
pub struct DropdownApp {
    options: Vec<String>,
    selection: String,
    list: SelectableListState,
    dynamic: bool,
    width: f32,
    spring: Spring,
    commit_delay: Duration,
}

impl DropdownApp {
    pub fn from_config(config: &AppConfig) -> Self {
        log::info!(
            "Starting with {} options, selection '{}', dynamic={}",
            config.options.len(),
            config.selection,
            config.dynamic
        );
        Self {
            options: config.options.clone(),
            selection: config.selection.clone(),
            list: SelectableListState::new(),
            dynamic: config.dynamic,
            width: config.width,
            spring: config.spring,
            commit_delay: config.commit_delay(),
        }
    }

    pub fn selection(&self) -> &str {
        &self.selection
    }
}

impl Default for DropdownApp {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl Application for DropdownApp {
    type Message = Message;

    fn title(&self) -> String {
        WINDOW_TITLE.to_string()
    }

    fn update(&mut self, message: Message) {
        match message {
            Message::Select(label) => {
                log::debug!("Selection '{}' -> '{}'", self.selection, label);
                self.selection = label;
            }
            Message::ListChanged(state) => self.list = state,
        }
    }

    fn view(&self) -> Element<Message> {
        let theme = current_theme();
        let mut ctx = Context::new();

        ctx.text_styled(WINDOW_TITLE, TITLE_FONT_SIZE, theme.text_secondary);
        ctx.selectable_list(self.options.clone(), self.selection.clone())
            .state(&self.list)
            .dynamic(self.dynamic)
            .width(self.width)
            .spring(self.spring)
            .commit_delay(self.commit_delay)
            .on_select(Message::Select)
            .on_change(Message::ListChanged)
            .build();
        ctx.text_styled(
            format!("Selected: {}", self.selection),
            DEFAULT_FONT_SIZE,
            theme.text_secondary,
        );

        Element::new(
            column(ctx.take())
                .width(Length::Fill)
                .align_x(Alignment::Center)
                .spacing(CONTENT_SPACING)
                .padding(Padding::new(TOP_PADDING, 0.0, 0.0, 0.0)),
        )
    }

    fn tick(&mut self, now: Instant) -> bool {
        if let Some(label) = self.list.poll_commit(now) {
            log::debug!("Deferred selection '{}' applied", label);
            self.selection = label;
        }
        self.list.needs_tick(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropdown_ui::constants::{line_height, ROW_HEIGHT};
    use dropdown_ui::{DrawCommand, Renderer};

    const VIEWPORT: Size = Size {
        width: 400.0,
        height: 600.0,
    };

    /// Centre of a list row, counted from the collapsed row.
    fn row_center(app: &DropdownApp, row: f32) -> (f32, f32) {
        let list_top = TOP_PADDING + line_height(TITLE_FONT_SIZE) + CONTENT_SPACING;
        let list_left = (VIEWPORT.width - app.width) / 2.0;
        (
            list_left + 10.0,
            list_top + row * ROW_HEIGHT + ROW_HEIGHT / 2.0,
        )
    }

    /// Route a tap through a fresh view, like the runtime does.
    fn tap(app: &mut DropdownApp, row: f32) {
        let (x, y) = row_center(app, row);
        let messages = {
            let mut root = app.view();
            root.layout(VIEWPORT);
            root.on_event(&Event::tap(x, y), Bounds::from_size(VIEWPORT))
                .into_messages()
        };
        for message in messages {
            app.update(message);
        }
    }

    fn dynamic_app() -> DropdownApp {
        let mut config = AppConfig::new();
        config.dynamic = true;
        DropdownApp::from_config(&config)
    }

    #[test]
    fn test_starts_collapsed_on_easy() {
        let app = DropdownApp::default();
        assert_eq!(app.selection(), "Easy");
        assert!(!app.list.is_expanded());
        assert!(!app.dynamic);
    }

    #[test]
    fn test_dynamic_select_applies_immediately() {
        let mut app = dynamic_app();

        tap(&mut app, 0.0);
        assert!(app.list.is_expanded());

        tap(&mut app, 1.0);
        assert_eq!(app.selection(), "Normal");
        assert!(!app.list.is_expanded());
    }

    #[test]
    fn test_static_select_applies_after_delay() {
        let mut app = DropdownApp::default();

        tap(&mut app, 0.0);
        tap(&mut app, 3.0);

        assert!(!app.list.is_expanded());
        assert_eq!(app.selection(), "Easy");

        let now = Instant::now();
        assert!(app.tick(now));
        assert_eq!(app.selection(), "Easy");

        app.tick(now + app.commit_delay);
        assert_eq!(app.selection(), "Expert");
    }

    #[test]
    fn test_tick_stops_when_idle() {
        let mut app = DropdownApp::default();
        assert!(!app.tick(Instant::now()));

        tap(&mut app, 0.0);
        assert!(app.tick(Instant::now()));
        assert!(!app.tick(Instant::now() + Duration::from_secs(5)));
    }

    #[test]
    fn test_view_shows_selection_line() {
        let app = DropdownApp::default();
        let mut root = app.view();
        root.layout(VIEWPORT);
        let mut frame = Renderer::new(VIEWPORT, Instant::now());
        root.draw(&mut frame, Bounds::from_size(VIEWPORT));

        assert!(frame.texts().contains(&"Selected: Easy"));
    }

    #[test]
    fn test_list_is_centered() {
        let app = DropdownApp::default();
        let mut root = app.view();
        root.layout(VIEWPORT);
        let mut frame = Renderer::new(VIEWPORT, Instant::now());
        root.draw(&mut frame, Bounds::from_size(VIEWPORT));

        let clip = frame
            .commands()
            .find_map(|c| match c {
                DrawCommand::FillRect { clip: Some(clip), .. } => Some(*clip),
                _ => None,
            })
            .expect("list draws clipped rows");
        assert_eq!(clip.x, (VIEWPORT.width - app.width) / 2.0);
        assert_eq!(clip.width, app.width);
    }
}
