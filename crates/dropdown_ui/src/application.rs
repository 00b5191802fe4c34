use std::sync::Arc;

use web_time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use dropdown_gpu::{ClearColor, GpuConfig, GpuContext};

use crate::element::Element;
use crate::error::{Result, UiError};
use crate::event::{Event, MouseButton};
use crate::layout::{Bounds, Size};
use crate::presenter::Presenter;
use crate::renderer::Renderer;
use crate::theme::current_theme;

/// Core application trait that defines the lifecycle of a dropdown_ui application.
///
/// Inspired by the Elm Architecture: applications maintain state, respond to
/// messages, and produce a view that is rebuilt after every change.
pub trait Application: Sized {
    /// Messages represent events that can update the application state.
    type Message: 'static;

    /// Return the window title for the application.
    fn title(&self) -> String;

    /// Update the application state in response to a message.
    fn update(&mut self, message: Self::Message);

    /// Produce the view tree for the current application state.
    fn view(&self) -> Element<Self::Message>;

    /// Advance time-driven state (timers, animations) to `now`.
    ///
    /// Called before every frame. Return `true` while more frames are needed;
    /// the runtime then keeps redrawing instead of waiting for input.
    fn tick(&mut self, now: Instant) -> bool {
        let _ = now;
        false
    }
}

/// Settings for running an application.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Window title (overridden by `Application::title` when empty)
    pub window_title: Option<String>,

    /// Initial window size in logical pixels
    pub window_size: (u32, u32),

    /// Smallest allowed window size
    pub min_window_size: Option<(u32, u32)>,

    /// Whether the window should be resizable
    pub resizable: bool,

    /// Log level for the built-in logger (`RUST_LOG` still applies on top)
    pub log_level: log::LevelFilter,

    /// Background color, defaults to the theme background
    pub clear_color: ClearColor,

    /// GPU configuration
    pub gpu: GpuConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_title: None,
            window_size: (800, 600),
            min_window_size: None,
            resizable: true,
            log_level: log::LevelFilter::Info,
            clear_color: current_theme().clear_color(),
            gpu: GpuConfig::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.window_title = Some(title.into());
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn min_size(mut self, width: u32, height: u32) -> Self {
        self.min_window_size = Some((width, height));
        self
    }

    pub fn log_level(mut self, level: log::LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    pub fn clear_color(mut self, color: ClearColor) -> Self {
        self.clear_color = color;
        self
    }

    pub fn gpu_config(mut self, config: GpuConfig) -> Self {
        self.gpu = config;
        self
    }

    fn window_attributes(&self, title: String) -> WindowAttributes {
        let (width, height) = self.window_size;
        let mut attrs = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(self.resizable);
        if let Some((min_width, min_height)) = self.min_window_size {
            attrs = attrs.with_min_inner_size(LogicalSize::new(min_width, min_height));
        }
        attrs
    }
}

/// Run an application with the given settings.
///
/// Creates a window, initializes the GPU context, and runs the event loop.
/// Returns when the window is closed.
pub fn run<A: Application + 'static>(app: A, settings: Settings) -> Result<()> {
    init_logging(settings.log_level);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut runner = Runner::new(app, settings);
    event_loop.run_app(&mut runner)?;

    match runner.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn init_logging(level: log::LevelFilter) {
    let result = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Window and GPU resources, created once the event loop resumes.
struct Surface {
    window: Arc<Window>,
    gpu: GpuContext,
    presenter: Presenter,
}

/// The application runtime state.
struct Runner<A: Application> {
    app: A,
    settings: Settings,
    surface: Option<Surface>,
    /// Last cursor position in logical pixels
    cursor: (f32, f32),
    /// Whether the last tick asked for more frames
    animating: bool,
    error: Option<UiError>,
}

impl<A: Application> Runner<A> {
    fn new(app: A, settings: Settings) -> Self {
        Self {
            app,
            settings,
            surface: None,
            cursor: (0.0, 0.0),
            animating: false,
            error: None,
        }
    }

    fn create_surface(&self, event_loop: &ActiveEventLoop) -> Result<Surface> {
        let title = self
            .settings
            .window_title
            .clone()
            .unwrap_or_else(|| self.app.title());
        let window = Arc::new(event_loop.create_window(self.settings.window_attributes(title))?);

        let gpu = pollster::block_on(GpuContext::with_config(
            Arc::clone(&window),
            self.settings.gpu.clone(),
        ))?;
        let presenter = Presenter::new(&gpu);

        Ok(Surface {
            window,
            gpu,
            presenter,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: UiError) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn logical_size(&self) -> Size {
        match &self.surface {
            Some(surface) => {
                let size: LogicalSize<f32> = surface
                    .window
                    .inner_size()
                    .to_logical(surface.window.scale_factor());
                Size::new(size.width, size.height)
            }
            None => Size::ZERO,
        }
    }

    fn to_logical(&self, position: PhysicalPosition<f64>) -> (f32, f32) {
        let scale = self
            .surface
            .as_ref()
            .map_or(1.0, |s| s.window.scale_factor());
        let logical = position.to_logical::<f32>(scale);
        (logical.x, logical.y)
    }

    fn request_redraw(&self) {
        if let Some(surface) = &self.surface {
            surface.window.request_redraw();
        }
    }

    /// Send an event through a freshly built view and apply the messages.
    fn dispatch(&mut self, event: Event) {
        let viewport = self.logical_size();
        let messages = {
            let mut root = self.app.view();
            root.layout(viewport);
            root.on_event(&event, Bounds::from_size(viewport))
                .into_messages()
        };

        if messages.is_empty() {
            return;
        }
        log::trace!("{} message(s) from {:?}", messages.len(), event);
        for message in messages {
            self.app.update(message);
        }
        self.request_redraw();
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        self.animating = self.app.tick(now);

        let viewport = self.logical_size();
        let mut frame = Renderer::new(viewport, now);
        {
            let mut root = self.app.view();
            root.layout(viewport);
            root.draw(&mut frame, Bounds::from_size(viewport));
        }

        let clear = self.settings.clear_color;
        let Some(surface) = &mut self.surface else {
            return;
        };
        let scale = surface.window.scale_factor() as f32;

        match surface
            .presenter
            .present(&surface.gpu, &frame, scale, clear)
        {
            Ok(()) => {}
            Err(UiError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("Surface lost, reconfiguring");
                surface.gpu.reconfigure();
                surface.window.request_redraw();
            }
            Err(err @ UiError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                self.fail(event_loop, err);
            }
            Err(err) => log::error!("Render error: {}", err),
        }
    }
}

impl<A: Application> ApplicationHandler for Runner<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        match self.create_surface(event_loop) {
            Ok(surface) => {
                log::info!(
                    "Window created: {}x{} (scale {})",
                    surface.gpu.width(),
                    surface.gpu.height(),
                    surface.window.scale_factor()
                );
                surface.window.request_redraw();
                self.surface = Some(surface);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(surface) = &mut self.surface {
                    surface.gpu.resize(size.width, size.height);
                    surface.window.request_redraw();
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => self.request_redraw(),
            WindowEvent::RedrawRequested => self.render(event_loop),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = self.to_logical(position);
                self.dispatch(Event::MouseMove {
                    position: self.cursor,
                });
            }
            WindowEvent::CursorLeft { .. } => self.dispatch(Event::CursorLeft),
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    winit::event::MouseButton::Left => MouseButton::Left,
                    winit::event::MouseButton::Right => MouseButton::Right,
                    winit::event::MouseButton::Middle => MouseButton::Middle,
                    winit::event::MouseButton::Other(n) => MouseButton::Other(n),
                    _ => return,
                };
                let position = self.cursor;
                self.dispatch(match state {
                    ElementState::Pressed => Event::MousePress { button, position },
                    ElementState::Released => Event::MouseRelease { button, position },
                });
            }
            WindowEvent::Touch(touch) => {
                let position = self.to_logical(touch.location);
                match touch.phase {
                    TouchPhase::Started => self.dispatch(Event::MousePress {
                        button: MouseButton::Left,
                        position,
                    }),
                    TouchPhase::Ended => self.dispatch(Event::MouseRelease {
                        button: MouseButton::Left,
                        position,
                    }),
                    TouchPhase::Moved => self.dispatch(Event::MouseMove { position }),
                    TouchPhase::Cancelled => self.dispatch(Event::CursorLeft),
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.animating {
            event_loop.set_control_flow(ControlFlow::Poll);
            self.request_redraw();
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_builder() {
        let settings = Settings::new()
            .title("DropDown")
            .size(400, 500)
            .min_size(200, 300)
            .log_level(log::LevelFilter::Debug)
            .gpu_config(GpuConfig::power_saving());

        assert_eq!(settings.window_title.as_deref(), Some("DropDown"));
        assert_eq!(settings.window_size, (400, 500));
        assert_eq!(settings.min_window_size, Some((200, 300)));
        assert!(settings.resizable);
        assert_eq!(settings.log_level, log::LevelFilter::Debug);
        assert_eq!(settings.gpu.power_preference, wgpu::PowerPreference::LowPower);
    }

    #[test]
    fn test_default_clear_color_follows_theme() {
        let settings = Settings::default();
        let background = current_theme().background;
        assert!((settings.clear_color.r - background.r as f64).abs() < 1e-6);
    }
}
