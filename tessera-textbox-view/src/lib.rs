//! Native text box view bridge for Tessera.
//!
//! Wraps the host platform's editable text widget and keeps its displayed
//! text in sync with a logical text input control, without feedback loops.
//! On top of the sync it works around native quirks that have no public API:
//! tinting the text cursor, keeping an empty field wide enough to show the
//! caret, and preserving an active selection across layout requests.
//!
//! # Pieces
//!
//! - [`TextBoxView`] drives everything from the native widget's callbacks.
//! - [`NativeTextWidget`] is the seam to the host widget.
//! - [`TextInputOwner`] is the logical control that validates input.
//! - [`cursor`] holds the version-gated cursor tint.
//!
//! On Android the [`android`] module provides a JNI backend for both seams.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod brush;
pub mod color;
pub mod cursor;
pub mod dp;
pub mod logging;
pub mod measure;
pub mod owner;
pub mod px;
pub mod sync;
pub mod text_box_view;
pub mod widget;

#[cfg(target_os = "android")]
pub mod android;

pub use brush::{Brush, DEFAULT_FOREGROUND, PropertyChanged};
pub use color::Color;
pub use cursor::{CursorFieldCache, CursorLayout, CursorTintError, SdkVersion, WidgetReflection};
pub use dp::Dp;
pub use measure::{MeasureMode, MeasureSpec, MeasuredSize};
pub use owner::{TextInputOwner, downgrade_owner};
pub use px::Px;
pub use sync::{SyncGuard, SyncState};
pub use text_box_view::{TextBoxView, TextBoxViewArgs};
pub use widget::{HorizontalPadding, NativeTextWidget, TextChange, utf16_len};
