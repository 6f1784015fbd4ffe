//! Cursor tint through the native widget's private fields.
//!
//! The host toolkit offers no public way to color the text cursor, so the
//! tint replaces the cursor drawable stored inside the widget's editor
//! object. Where that drawable lives depends on the platform version (see
//! [`CursorLayout`]). The field handles are discovered once per process and
//! cached in a [`CursorFieldCache`]; if discovery fails, tinting becomes a
//! no-op for the rest of the process.
//!
//! Failures never reach the caller. [`set_cursor_color`] logs them and leaves
//! the native cursor as it was.

mod cache;
mod layout;
mod reflect;

use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

use crate::Color;

pub use cache::{CursorFieldCache, CursorFieldHandles, ResolvedFields};
pub use layout::{
    CURSOR_DRAWABLE_RES_FIELD, CursorLayout, EDITOR_FIELD, SINGLE_CURSOR_DRAWABLE_FIELD,
    SPLIT_CURSOR_DRAWABLE_FIELD,
};
pub use reflect::{ProbeScope, TintMode, WidgetReflection};

/// Platform API level of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SdkVersion(pub u32);

impl SdkVersion {
    /// First version with a separate editor object.
    pub const JELLY_BEAN: SdkVersion = SdkVersion(16);
    /// First version with `View.isAttachedToWindow`.
    pub const KITKAT: SdkVersion = SdkVersion(19);
    /// First version with a single cursor drawable.
    pub const P: SdkVersion = SdkVersion(28);
}

impl SdkVersion {
    /// Whether views can be asked directly if they are attached to a window.
    ///
    /// Older versions only expose the window token, which is null while
    /// detached.
    pub fn has_attached_query(self) -> bool {
        self >= Self::KITKAT
    }
}

impl fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API {}", self.0)
    }
}

/// Errors raised while discovering or applying the cursor tint.
#[derive(Debug, Error)]
pub enum CursorTintError {
    /// The platform version has no known cursor storage.
    #[error("cursor drawable storage is unknown on {0}")]
    UnsupportedPlatform(SdkVersion),
    /// Discovery already failed in this process.
    #[error("cursor field discovery failed earlier in this process")]
    Unavailable,
    /// A private field does not exist.
    #[error("field `{0}` not found")]
    MissingField(&'static str),
    /// A private field holds a value of an unexpected type.
    #[error("field `{0}` has an incompatible type")]
    IncompatibleField(&'static str),
    /// A value required by the tint was null.
    #[error("{0} was null")]
    NullValue(&'static str),
    /// The host runtime rejected a call.
    #[error("native call failed: {0}")]
    Native(String),
}

/// Tints the cursor of `widget` with `color`.
///
/// Runs field discovery on first use. Errors are logged and otherwise
/// ignored.
pub fn set_cursor_color<R: WidgetReflection>(widget: &R, color: Color) {
    match try_set_cursor_color(widget, color) {
        Ok(()) => {}
        Err(CursorTintError::Unavailable) => {
            debug!("Skipping cursor tint: field discovery failed earlier");
        }
        Err(err) => {
            warn!("Failed to change the cursor color. Some devices don't support this: {err}");
        }
    }
}

/// Tints the cursor of `widget` with `color`, returning any failure.
pub fn try_set_cursor_color<R: WidgetReflection>(
    widget: &R,
    color: Color,
) -> Result<(), CursorTintError> {
    let (layout, handles) = widget.field_cache().resolve(|| {
        let layout = CursorLayout::for_sdk(widget.sdk_version());
        debug!(?layout, sdk = %widget.sdk_version(), "Discovering cursor fields");
        let handles = layout.locate(widget)?;
        Ok((layout, handles))
    })?;
    layout.apply(widget, &handles, color)
}
