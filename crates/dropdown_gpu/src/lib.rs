//! dropdown_gpu - wgpu device, queue and surface management for dropdown_ui.

pub mod config;
pub mod context;
pub mod error;

pub use config::{ClearColor, GpuConfig};
pub use context::GpuContext;
pub use error::{GpuError, Result};
