//! Android backend for the text box view.
//!
//! ## Usage
//!
//! The Java peer `com.tessera.textbox.TextBoxView` extends `EditText`,
//! calls `nativeInit` from its constructor and forwards `onTextChanged`,
//! `requestLayout` and `onMeasure` to the exported functions in [`bridge`].

pub mod bridge;
pub mod jni;

pub use self::bridge::{JniTextBoxView, view_from_handle};
pub use self::jni::{AndroidJniError, JniTextView, map_jni_error};
