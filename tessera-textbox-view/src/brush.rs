//! Foreground brushes.
//!
//! The Foreground value itself lives in the host property system; the view
//! only needs the brush shape and its default.

use crate::Color;

/// A paint source for text and cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    /// A single color.
    Solid(Color),
    /// A linear gradient, described by `(offset, color)` stops.
    LinearGradient(Vec<(f32, Color)>),
}

impl Brush {
    /// Returns the color of a solid brush.
    pub fn solid_color(&self) -> Option<Color> {
        match self {
            Brush::Solid(color) => Some(*color),
            Brush::LinearGradient(_) => None,
        }
    }
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

/// Foreground used until the host sets one: solid black.
pub const DEFAULT_FOREGROUND: Brush = Brush::Solid(Color::BLACK);

/// Payload of a property change callback.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChanged<T> {
    /// Value before the change.
    pub old_value: T,
    /// Value after the change.
    pub new_value: T,
}
