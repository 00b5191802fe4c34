//! Macros for reducing boilerplate in widget implementations.

/// Generates a builder-style setter method for a field.
///
/// # Usage
///
/// ```ignore
/// // When method name matches field name:
/// builder_field!(width, f32);
/// // Generates: pub fn width(mut self, value: f32) -> Self { self.width = value; self }
///
/// // When method name differs from field name:
/// builder_field!(active_fill, active, Color);
/// ```
#[macro_export]
macro_rules! builder_field {
    // Method name matches field name
    ($name:ident, $type:ty) => {
        pub fn $name(mut self, value: $type) -> Self {
            self.$name = value;
            self
        }
    };
    // Method name differs from field name
    ($method:ident, $field:ident, $type:ty) => {
        pub fn $method(mut self, value: $type) -> Self {
            self.$field = value;
            self
        }
    };
}
