//! Callback abstraction for widget event handlers
//!
//! Widgets report what happened by turning a value into an application message.
//! Instead of writing `Option<Box<dyn Fn(T) -> M>>` in every widget, they hold a
//! `Callback<T, M>`.
//!
//! # Examples
//!
//! ```ignore
//! use dropdown_ui::Callback;
//!
//! struct Picker<M> {
//!     on_select: Callback<String, M>,
//! }
//!
//! impl<M> Picker<M> {
//!     fn on_select<F>(mut self, f: F) -> Self
//!     where
//!         F: Fn(String) -> M + 'static,
//!     {
//!         self.on_select = Callback::new(f);
//!         self
//!     }
//! }
//! ```

use std::fmt;

/// An optional event handler producing a message of type `M` from a `T`.
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns `None` when no handler is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}
