//! DropDown - a selectable list demo on dropdown_ui
//!
//! Hosts a single selectable list on a dark screen and shows the caller-owned
//! selection below it.

mod app;
pub mod config;
pub mod constants;
mod message;

pub use app::DropdownApp;
pub use config::{AppConfig, ConfigError, LogLevel};
pub use message::Message;
