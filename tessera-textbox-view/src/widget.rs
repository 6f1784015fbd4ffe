//! The native text widget seam.
//!
//! [`NativeTextWidget`] is everything the view needs from the host
//! toolkit's editable text widget. The native widget owns its text buffer and
//! drives the view through callbacks; the `default_*` methods run the
//! toolkit's own handling that an override would normally reach with a
//! `super` call.
//!
//! All methods are called on the UI thread. Implementations may call back
//! into the view synchronously (writing text raises a change notification
//! before `set_text` returns), so they must not hold borrows across those
//! calls.

use crate::{Color, MeasureSpec, MeasuredSize, Px};

/// A text change notification raised by the native widget.
///
/// Only used as a trigger; the view always re-reads the full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    /// The text after the change.
    pub text: String,
    /// Offset of the changed range.
    pub start: i32,
    /// Length of the replaced range.
    pub length_before: i32,
    /// Length of the replacement.
    pub length_after: i32,
}

impl TextChange {
    /// A change that replaced all of `previous` with `text`.
    pub fn replace_all(previous: &str, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            length_after: utf16_len(&text),
            text,
            start: 0,
            length_before: utf16_len(previous),
        }
    }
}

/// Length of `text` in UTF-16 code units, the unit of native text offsets.
///
/// Saturates at `i32::MAX`.
pub fn utf16_len(text: &str) -> i32 {
    i32::try_from(text.encode_utf16().count()).unwrap_or(i32::MAX)
}

/// Horizontal padding of the native widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HorizontalPadding {
    /// Left padding.
    pub left: Px,
    /// Right padding.
    pub right: Px,
}

/// Editable native text widget wrapped by a [`TextBoxView`](crate::TextBoxView).
pub trait NativeTextWidget {
    /// Returns the displayed text, or `None` if the buffer can not be read.
    fn text(&self) -> Option<String>;

    /// Replaces the displayed text. Raises a change notification and moves
    /// the caret, even if the text is unchanged.
    fn set_text(&self, text: &str);

    /// Runs the toolkit's own text-changed handling.
    fn default_on_text_changed(&self, change: &TextChange);

    /// Whether the widget is attached and loaded in the visual tree.
    fn is_loaded(&self) -> bool;

    /// Whether a text selection is active.
    ///
    /// Only valid while [`is_loaded`](Self::is_loaded) is true; the native side
    /// fails otherwise.
    fn has_selection(&self) -> bool;

    /// Runs the toolkit's own layout invalidation.
    fn default_request_layout(&self);

    /// Runs the toolkit's own measurement pass.
    fn default_measure(&self, width: MeasureSpec, height: MeasureSpec);

    /// Returns the dimensions recorded by the last measurement pass.
    fn measured_size(&self) -> MeasuredSize;

    /// Overrides the dimensions recorded by the measurement pass.
    fn set_measured_size(&self, size: MeasuredSize);

    /// Returns the horizontal padding.
    fn padding(&self) -> HorizontalPadding;

    /// Sets the text color.
    fn set_text_color(&self, color: Color);

    /// Restricts the widget to a single line of text.
    fn set_single_line(&self, single_line: bool);

    /// Sets a solid background color.
    fn set_background_color(&self, color: Color);

    /// Sets the padding on all four sides.
    fn set_padding(&self, left: Px, top: Px, right: Px, bottom: Px);

    /// Makes the widget size itself to its content in both directions.
    fn set_wrap_content(&self);
}
