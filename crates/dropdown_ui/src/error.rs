use dropdown_gpu::GpuError;
use thiserror::Error;

/// Errors raised while running an application.
#[derive(Debug, Error)]
pub enum UiError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create window: {0}")]
    WindowCreation(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    Gpu(#[from] GpuError),

    #[error("Failed to acquire surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("Failed to prepare text: {0}")]
    TextPrepare(#[from] glyphon::PrepareError),

    #[error("Failed to render text: {0}")]
    TextRender(#[from] glyphon::RenderError),
}

pub type Result<T> = std::result::Result<T, UiError>;
