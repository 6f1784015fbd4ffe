//! JNI backend for the native `EditText` peer.
//!
//! [`JniTextView`] drives a Java `TextBoxView extends EditText` instance.
//! Default handlers are reached with non-virtual calls on `EditText`, which is
//! what a `super` call in the Java override would do. The cursor fields are
//! reached through `java.lang.reflect.Field` with `setAccessible(true)`.

use std::{fmt, sync::OnceLock};

use jni::{
    JNIEnv, JavaVM,
    errors::Error as JniError,
    objects::{GlobalRef, JObject, JString, JValue, JValueOwned},
};
use tracing::warn;

use crate::{
    Color, CursorFieldCache, CursorTintError, MeasureSpec, MeasuredSize, NativeTextWidget, Px,
    SdkVersion, TextChange, WidgetReflection,
    cursor::{ProbeScope, TintMode},
    widget::HorizontalPadding,
};

const EDIT_TEXT_CLASS: &str = "android/widget/EditText";
const TEXT_VIEW_CLASS: &str = "android/widget/TextView";
const CONTEXT_CTOR: &str = "(Landroid/content/Context;)V";
const FIELD_GET: &str = "(Ljava/lang/Object;)Ljava/lang/Object;";

/// Errors returned by JNI calls.
#[derive(Debug)]
pub enum AndroidJniError {
    /// A JNI call failed.
    Jni(JniError),
    /// A Java method returned null for a non-nullable value.
    NullReturn(&'static str),
    /// No Android context is registered for this process.
    MissingContext,
}

impl fmt::Display for AndroidJniError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jni(err) => write!(f, "JNI error: {err}"),
            Self::NullReturn(name) => write!(f, "Java returned null for {name}"),
            Self::MissingContext => write!(f, "no Android context available"),
        }
    }
}

impl std::error::Error for AndroidJniError {}

impl From<JniError> for AndroidJniError {
    fn from(err: JniError) -> Self {
        Self::Jni(err)
    }
}

impl From<AndroidJniError> for CursorTintError {
    fn from(err: AndroidJniError) -> Self {
        match err {
            AndroidJniError::NullReturn(name) => CursorTintError::NullValue(name),
            other => CursorTintError::Native(other.to_string()),
        }
    }
}

/// Clears a pending Java exception so later JNI calls stay valid.
pub fn map_jni_error(env: &mut JNIEnv<'_>, err: JniError) -> AndroidJniError {
    if matches!(err, JniError::JavaException) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
    AndroidJniError::Jni(err)
}

fn call<'local>(
    env: &mut JNIEnv<'local>,
    target: &JObject<'_>,
    name: &str,
    sig: &str,
    args: &[JValue<'_, '_>],
) -> Result<JValueOwned<'local>, AndroidJniError> {
    env.call_method(target, name, sig, args)
        .map_err(|err| map_jni_error(env, err))
}

fn call_super<'local>(
    env: &mut JNIEnv<'local>,
    target: &JObject<'_>,
    name: &str,
    sig: &str,
    args: &[JValue<'_, '_>],
) -> Result<JValueOwned<'local>, AndroidJniError> {
    env.call_nonvirtual_method(target, EDIT_TEXT_CLASS, name, sig, args)
        .map_err(|err| map_jni_error(env, err))
}

fn non_null<'local>(
    value: JValueOwned<'local>,
    name: &'static str,
) -> Result<JObject<'local>, AndroidJniError> {
    let object = value.l()?;
    if object.is_null() {
        return Err(AndroidJniError::NullReturn(name));
    }
    Ok(object)
}

fn field_cache() -> &'static CursorFieldCache<GlobalRef> {
    static CACHE: OnceLock<CursorFieldCache<GlobalRef>> = OnceLock::new();
    CACHE.get_or_init(CursorFieldCache::new)
}

/// Handle to a Java `EditText` peer.
pub struct JniTextView {
    vm: JavaVM,
    view: GlobalRef,
    sdk: SdkVersion,
}

impl JniTextView {
    /// Wraps the Java peer `view`.
    pub fn new(env: &mut JNIEnv<'_>, view: &JObject<'_>) -> Result<Self, AndroidJniError> {
        let vm = env.get_java_vm()?;
        let view = env
            .new_global_ref(view)
            .map_err(|err| map_jni_error(env, err))?;
        let sdk = env
            .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
            .and_then(|value| value.i())
            .map_err(|err| map_jni_error(env, err))?;
        Ok(Self {
            vm,
            view,
            sdk: SdkVersion(sdk.max(0) as u32),
        })
    }

    /// Wraps the Java peer `view`, using the process context from
    /// `ndk-context`.
    pub fn from_process_context(view: &JObject<'_>) -> Result<Self, AndroidJniError> {
        let context = ndk_context::android_context();
        if context.vm().is_null() {
            return Err(AndroidJniError::MissingContext);
        }
        let vm = unsafe { JavaVM::from_raw(context.vm().cast()) }?;
        let mut env = vm.attach_current_thread()?;
        Self::new(&mut env, view)
    }

    fn with_env<R>(
        &self,
        f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'static>) -> Result<R, AndroidJniError>,
    ) -> Result<R, AndroidJniError> {
        let mut env = self.vm.attach_current_thread()?;
        let view = self.view.as_obj();
        env.with_local_frame(16, |env| f(env, view))
    }

    fn run(
        &self,
        what: &'static str,
        f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'static>) -> Result<(), AndroidJniError>,
    ) {
        if let Err(err) = self.with_env(f) {
            warn!("EditText {what} failed: {err}");
        }
    }

    fn query<R: Default>(
        &self,
        what: &'static str,
        f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'static>) -> Result<R, AndroidJniError>,
    ) -> R {
        self.with_env(f).unwrap_or_else(|err| {
            warn!("EditText {what} failed: {err}");
            R::default()
        })
    }

    fn int_getter(&self, name: &'static str) -> i32 {
        self.query(name, |env, view| Ok(call(env, view, name, "()I", &[])?.i()?))
    }
}

impl NativeTextWidget for JniTextView {
    fn text(&self) -> Option<String> {
        let read = self.with_env(|env, view| {
            let editable = call(env, view, "getText", "()Landroid/text/Editable;", &[])?.l()?;
            if editable.is_null() {
                return Ok(String::new());
            }
            let text = non_null(
                call(env, &editable, "toString", "()Ljava/lang/String;", &[])?,
                "Editable.toString",
            )?;
            let text = JString::from(text);
            let text: String = env
                .get_string(&text)
                .map_err(|err| map_jni_error(env, err))?
                .into();
            Ok(text)
        });
        match read {
            Ok(text) => Some(text),
            Err(err) => {
                warn!("EditText getText failed: {err}");
                None
            }
        }
    }

    fn set_text(&self, text: &str) {
        self.run("setText", |env, view| {
            let text = env.new_string(text).map_err(|err| map_jni_error(env, err))?;
            call(
                env,
                view,
                "setText",
                "(Ljava/lang/CharSequence;)V",
                &[JValue::Object(&text)],
            )?;
            Ok(())
        });
    }

    fn default_on_text_changed(&self, change: &TextChange) {
        self.run("onTextChanged", |env, view| {
            let text = env
                .new_string(&change.text)
                .map_err(|err| map_jni_error(env, err))?;
            call_super(
                env,
                view,
                "onTextChanged",
                "(Ljava/lang/CharSequence;III)V",
                &[
                    JValue::Object(&text),
                    JValue::Int(change.start),
                    JValue::Int(change.length_before),
                    JValue::Int(change.length_after),
                ],
            )?;
            Ok(())
        });
    }

    fn is_loaded(&self) -> bool {
        if self.sdk.has_attached_query() {
            return self.query("isAttachedToWindow", |env, view| {
                Ok(call(env, view, "isAttachedToWindow", "()Z", &[])?.z()?)
            });
        }
        self.query("getWindowToken", |env, view| {
            let token = call(env, view, "getWindowToken", "()Landroid/os/IBinder;", &[])?.l()?;
            Ok(!token.is_null())
        })
    }

    fn has_selection(&self) -> bool {
        self.query("hasSelection", |env, view| {
            Ok(call(env, view, "hasSelection", "()Z", &[])?.z()?)
        })
    }

    fn default_request_layout(&self) {
        self.run("requestLayout", |env, view| {
            call_super(env, view, "requestLayout", "()V", &[])?;
            Ok(())
        });
    }

    fn default_measure(&self, width: MeasureSpec, height: MeasureSpec) {
        self.run("onMeasure", |env, view| {
            call_super(
                env,
                view,
                "onMeasure",
                "(II)V",
                &[JValue::Int(width.raw()), JValue::Int(height.raw())],
            )?;
            Ok(())
        });
    }

    fn measured_size(&self) -> MeasuredSize {
        MeasuredSize::new(
            Px(self.int_getter("getMeasuredWidth")),
            Px(self.int_getter("getMeasuredHeight")),
        )
    }

    fn set_measured_size(&self, size: MeasuredSize) {
        self.run("setMeasuredDimension", |env, view| {
            call(
                env,
                view,
                "setMeasuredDimension",
                "(II)V",
                &[JValue::Int(size.width.raw()), JValue::Int(size.height.raw())],
            )?;
            Ok(())
        });
    }

    fn padding(&self) -> HorizontalPadding {
        HorizontalPadding {
            left: Px(self.int_getter("getPaddingLeft")),
            right: Px(self.int_getter("getPaddingRight")),
        }
    }

    fn set_text_color(&self, color: Color) {
        self.run("setTextColor", |env, view| {
            call(env, view, "setTextColor", "(I)V", &[JValue::Int(color.to_argb())])?;
            Ok(())
        });
    }

    fn set_single_line(&self, single_line: bool) {
        self.run("setSingleLine", |env, view| {
            call(
                env,
                view,
                "setSingleLine",
                "(Z)V",
                &[JValue::Bool(single_line.into())],
            )?;
            Ok(())
        });
    }

    fn set_background_color(&self, color: Color) {
        self.run("setBackgroundColor", |env, view| {
            call(
                env,
                view,
                "setBackgroundColor",
                "(I)V",
                &[JValue::Int(color.to_argb())],
            )?;
            Ok(())
        });
    }

    fn set_padding(&self, left: Px, top: Px, right: Px, bottom: Px) {
        self.run("setPadding", |env, view| {
            call(
                env,
                view,
                "setPadding",
                "(IIII)V",
                &[
                    JValue::Int(left.raw()),
                    JValue::Int(top.raw()),
                    JValue::Int(right.raw()),
                    JValue::Int(bottom.raw()),
                ],
            )?;
            Ok(())
        });
    }

    fn set_wrap_content(&self) {
        const WRAP_CONTENT: i32 = -2;
        self.run("setLayoutParams", |env, view| {
            let params = env
                .new_object(
                    "android/view/ViewGroup$LayoutParams",
                    "(II)V",
                    &[JValue::Int(WRAP_CONTENT), JValue::Int(WRAP_CONTENT)],
                )
                .map_err(|err| map_jni_error(env, err))?;
            call(
                env,
                view,
                "setLayoutParams",
                "(Landroid/view/ViewGroup$LayoutParams;)V",
                &[JValue::Object(&params)],
            )?;
            Ok(())
        });
    }
}

/// Field lookups against throwaway `TextView` and `EditText` instances.
struct JniProbe<'env, 'local> {
    env: &'env mut JNIEnv<'local>,
    text_view: JObject<'local>,
    edit_text: JObject<'local>,
}

impl JniProbe<'_, '_> {
    fn declared_field(
        &mut self,
        owner: &JObject<'_>,
        name: &'static str,
    ) -> Result<GlobalRef, CursorTintError> {
        let env = &mut *self.env;
        let class = non_null(
            call(env, owner, "getClass", "()Ljava/lang/Class;", &[])?,
            "getClass",
        )?;
        let field_name = env
            .new_string(name)
            .map_err(|err| map_jni_error(env, err))?;
        let field = call(
            env,
            &class,
            "getDeclaredField",
            "(Ljava/lang/String;)Ljava/lang/reflect/Field;",
            &[JValue::Object(&field_name)],
        )
        .map_err(|_| CursorTintError::MissingField(name))?;
        let field = non_null(field, name)?;
        call(env, &field, "setAccessible", "(Z)V", &[JValue::Bool(1)])?;
        Ok(env
            .new_global_ref(&field)
            .map_err(|err| map_jni_error(env, err))?)
    }
}

impl ProbeScope for JniProbe<'_, '_> {
    type Field = GlobalRef;

    fn text_view_field(&mut self, name: &'static str) -> Result<GlobalRef, CursorTintError> {
        let text_view = self
            .env
            .new_local_ref(&self.text_view)
            .map_err(AndroidJniError::from)?;
        self.declared_field(&text_view, name)
    }

    fn editor_field(
        &mut self,
        editor: &GlobalRef,
        name: &'static str,
    ) -> Result<GlobalRef, CursorTintError> {
        let env = &mut *self.env;
        let editor_object = call(
            env,
            editor.as_obj(),
            "get",
            FIELD_GET,
            &[JValue::Object(&self.edit_text)],
        )?;
        let editor_object = non_null(editor_object, "editor")?;
        self.declared_field(&editor_object, name)
    }
}

impl WidgetReflection for JniTextView {
    type Field = GlobalRef;
    type Editor = GlobalRef;
    type Drawable = GlobalRef;

    fn sdk_version(&self) -> SdkVersion {
        self.sdk
    }

    fn field_cache(&self) -> &CursorFieldCache<GlobalRef> {
        field_cache()
    }

    fn with_probe<R>(
        &self,
        lookup: impl FnOnce(&mut dyn ProbeScope<Field = GlobalRef>) -> Result<R, CursorTintError>,
    ) -> Result<R, CursorTintError> {
        let mut env = self.vm.attach_current_thread().map_err(AndroidJniError::from)?;
        let view = self.view.as_obj();
        // The local frame releases both probes whatever `lookup` returns.
        let outcome = env.with_local_frame(8, |env| -> Result<_, AndroidJniError> {
            let context = non_null(
                call(env, view, "getContext", "()Landroid/content/Context;", &[])?,
                "getContext",
            )?;
            let text_view = env
                .new_object(TEXT_VIEW_CLASS, CONTEXT_CTOR, &[JValue::Object(&context)])
                .map_err(|err| map_jni_error(env, err))?;
            let edit_text = env
                .new_object(EDIT_TEXT_CLASS, CONTEXT_CTOR, &[JValue::Object(&context)])
                .map_err(|err| map_jni_error(env, err))?;
            let mut probe = JniProbe {
                env,
                text_view,
                edit_text,
            };
            Ok(lookup(&mut probe))
        })?;
        outcome
    }

    fn read_int(&self, field: &GlobalRef) -> Result<i32, CursorTintError> {
        Ok(self.with_env(|env, view| {
            Ok(call(
                env,
                field.as_obj(),
                "getInt",
                "(Ljava/lang/Object;)I",
                &[JValue::Object(view)],
            )?
            .i()?)
        })?)
    }

    fn read_editor(&self, field: &GlobalRef) -> Result<GlobalRef, CursorTintError> {
        Ok(self.with_env(|env, view| {
            let editor = non_null(
                call(env, field.as_obj(), "get", FIELD_GET, &[JValue::Object(view)])?,
                "editor",
            )?;
            Ok(env
                .new_global_ref(&editor)
                .map_err(|err| map_jni_error(env, err))?)
        })?)
    }

    fn fresh_drawable(&self, resource_id: i32) -> Result<GlobalRef, CursorTintError> {
        Ok(self.with_env(|env, view| {
            let context = non_null(
                call(env, view, "getContext", "()Landroid/content/Context;", &[])?,
                "getContext",
            )?;
            let resources = non_null(
                call(
                    env,
                    &context,
                    "getResources",
                    "()Landroid/content/res/Resources;",
                    &[],
                )?,
                "getResources",
            )?;
            let drawable = non_null(
                call(
                    env,
                    &resources,
                    "getDrawable",
                    "(I)Landroid/graphics/drawable/Drawable;",
                    &[JValue::Int(resource_id)],
                )?,
                "cursor drawable",
            )?;
            // Detach from the constant state shared by every inflation of the
            // resource before tinting.
            let drawable = non_null(
                call(
                    env,
                    &drawable,
                    "mutate",
                    "()Landroid/graphics/drawable/Drawable;",
                    &[],
                )?,
                "Drawable.mutate",
            )?;
            Ok(env
                .new_global_ref(&drawable)
                .map_err(|err| map_jni_error(env, err))?)
        })?)
    }

    fn tint(
        &self,
        drawable: &GlobalRef,
        color: Color,
        mode: TintMode,
    ) -> Result<(), CursorTintError> {
        let mode_name = match mode {
            TintMode::SrcIn => "SRC_IN",
        };
        Ok(self.with_env(|env, _view| {
            let mode = non_null(
                env.get_static_field(
                    "android/graphics/PorterDuff$Mode",
                    mode_name,
                    "Landroid/graphics/PorterDuff$Mode;",
                )
                .map_err(|err| map_jni_error(env, err))?,
                "PorterDuff.Mode",
            )?;
            call(
                env,
                drawable.as_obj(),
                "setColorFilter",
                "(ILandroid/graphics/PorterDuff$Mode;)V",
                &[JValue::Int(color.to_argb()), JValue::Object(&mode)],
            )?;
            Ok(())
        })?)
    }

    fn write_drawable(
        &self,
        editor: &GlobalRef,
        field: &GlobalRef,
        drawable: GlobalRef,
    ) -> Result<(), CursorTintError> {
        Ok(self.with_env(|env, _view| {
            call(
                env,
                field.as_obj(),
                "set",
                "(Ljava/lang/Object;Ljava/lang/Object;)V",
                &[
                    JValue::Object(editor.as_obj()),
                    JValue::Object(drawable.as_obj()),
                ],
            )?;
            Ok(())
        })?)
    }

    fn write_drawable_pair(
        &self,
        editor: &GlobalRef,
        field: &GlobalRef,
        drawables: [GlobalRef; 2],
    ) -> Result<(), CursorTintError> {
        Ok(self.with_env(|env, _view| {
            let array = env
                .new_object_array(2, "android/graphics/drawable/Drawable", JObject::null())
                .map_err(|err| map_jni_error(env, err))?;
            for (index, drawable) in drawables.iter().enumerate() {
                env.set_object_array_element(&array, index as i32, drawable.as_obj())
                    .map_err(|err| map_jni_error(env, err))?;
            }
            call(
                env,
                field.as_obj(),
                "set",
                "(Ljava/lang/Object;Ljava/lang/Object;)V",
                &[JValue::Object(editor.as_obj()), JValue::Object(&array)],
            )?;
            Ok(())
        })?)
    }
}
