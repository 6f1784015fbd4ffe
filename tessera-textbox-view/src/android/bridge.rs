//! JNI entry points for the Java `TextBoxView` peer.
//!
//! The peer stores the handle returned by `nativeInit` in a `long` field and
//! passes it back on every callback. A zero handle means the native side is
//! not constructed yet; such callbacks are dropped, except that the Java
//! override still runs the default handling for layout and measurement.

use jni::{
    JNIEnv,
    objects::{JObject, JString},
    sys::{jint, jlong},
};
use tracing::warn;

use crate::{
    MeasureSpec, TextBoxView, TextBoxViewArgs, TextChange, android::jni::JniTextView,
    logging::init_tracing,
};

/// A text box view backed by a Java peer.
pub type JniTextBoxView = TextBoxView<JniTextView>;

/// Resolves a handle returned by `nativeInit`.
///
/// # Safety
///
/// `handle` must be zero or a value returned by `nativeInit` that has not
/// been passed to `nativeRelease`, and the view must only be used on the UI
/// thread.
pub unsafe fn view_from_handle<'a>(handle: jlong) -> Option<&'a JniTextBoxView> {
    let ptr = handle as *const JniTextBoxView;
    unsafe { ptr.as_ref() }
}

#[unsafe(no_mangle)]
extern "system" fn Java_com_tessera_textbox_TextBoxView_nativeInit<'local>(
    mut env: JNIEnv<'local>,
    this: JObject<'local>,
) -> jlong {
    init_tracing();
    match JniTextView::new(&mut env, &this) {
        Ok(widget) => {
            let view = Box::new(TextBoxView::new(widget, TextBoxViewArgs::default()));
            view.initialize();
            Box::into_raw(view) as jlong
        }
        Err(err) => {
            warn!("Failed to create native text box view: {err}");
            0
        }
    }
}

#[unsafe(no_mangle)]
extern "system" fn Java_com_tessera_textbox_TextBoxView_nativeRelease<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    handle: jlong,
) {
    if handle != 0 {
        drop(unsafe { Box::from_raw(handle as *mut JniTextBoxView) });
    }
}

#[unsafe(no_mangle)]
extern "system" fn Java_com_tessera_textbox_TextBoxView_nativeOnTextChanged<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    handle: jlong,
    text: JString<'local>,
    start: jint,
    length_before: jint,
    length_after: jint,
) {
    let Some(view) = (unsafe { view_from_handle(handle) }) else {
        return;
    };
    let text = if text.is_null() {
        String::new()
    } else {
        match env.get_string(&text) {
            Ok(text) => text.into(),
            Err(err) => {
                warn!("Failed to read changed text: {err}");
                return;
            }
        }
    };
    view.on_native_text_changed(&TextChange {
        text,
        start,
        length_before,
        length_after,
    });
}

#[unsafe(no_mangle)]
extern "system" fn Java_com_tessera_textbox_TextBoxView_nativeRequestLayout<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    handle: jlong,
) {
    if let Some(view) = unsafe { view_from_handle(handle) } {
        view.request_layout();
    }
}

#[unsafe(no_mangle)]
extern "system" fn Java_com_tessera_textbox_TextBoxView_nativeOnMeasure<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    handle: jlong,
    width_spec: jint,
    height_spec: jint,
) {
    let width = MeasureSpec(width_spec);
    let height = MeasureSpec(height_spec);
    match unsafe { view_from_handle(handle) } {
        Some(view) => view.on_measure(width, height),
        None => {
            warn!("onMeasure reached an unconstructed text box view");
        }
    }
}
