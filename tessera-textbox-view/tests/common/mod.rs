#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
    sync::Arc,
};

use tessera_textbox_view::{
    Color, CursorFieldCache, CursorTintError, HorizontalPadding, MeasureSpec, MeasuredSize,
    NativeTextWidget, Px, SdkVersion, TextBoxView, TextBoxViewArgs, TextChange,
    WidgetReflection, utf16_len,
    cursor::{ProbeScope, TintMode},
};

pub const CURSOR_RESOURCE: i32 = 0x0108_00a3;

#[derive(Debug, Clone, PartialEq)]
pub struct FakeField(pub &'static str);

#[derive(Debug, Clone, PartialEq)]
pub struct FakeEditor;

#[derive(Debug, Clone, PartialEq)]
pub struct FakeDrawable {
    pub id: u32,
    pub resource_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawableWrite {
    Single {
        field: &'static str,
        drawable: u32,
        resource_id: i32,
    },
    Pair {
        field: &'static str,
        drawables: [u32; 2],
        resource_ids: [i32; 2],
    },
}

#[derive(Debug, Default)]
pub struct ReflectionLog {
    pub probes_opened: usize,
    pub probes_released: usize,
    pub lookups: Vec<&'static str>,
    pub tints: Vec<(u32, Color, TintMode)>,
    pub writes: Vec<DrawableWrite>,
}

/// Scripted reflective runtime.
pub struct FakeReflection {
    pub sdk: SdkVersion,
    pub cache: Arc<CursorFieldCache<FakeField>>,
    pub missing_fields: Vec<&'static str>,
    pub null_editor: bool,
    pub cursor_resource: i32,
    pub log: RefCell<ReflectionLog>,
    next_drawable: Cell<u32>,
}

impl FakeReflection {
    pub fn new(sdk: u32) -> Self {
        Self {
            sdk: SdkVersion(sdk),
            cache: Arc::new(CursorFieldCache::new()),
            missing_fields: Vec::new(),
            null_editor: false,
            cursor_resource: CURSOR_RESOURCE,
            log: RefCell::new(ReflectionLog::default()),
            next_drawable: Cell::new(1),
        }
    }

    pub fn missing(mut self, field: &'static str) -> Self {
        self.missing_fields.push(field);
        self
    }

    pub fn with_null_editor(mut self) -> Self {
        self.null_editor = true;
        self
    }

    pub fn with_cursor_resource(mut self, resource_id: i32) -> Self {
        self.cursor_resource = resource_id;
        self
    }

    pub fn sharing_cache(mut self, cache: Arc<CursorFieldCache<FakeField>>) -> Self {
        self.cache = cache;
        self
    }
}

struct FakeProbe<'a> {
    missing_fields: &'a [&'static str],
    lookups: Vec<&'static str>,
}

impl FakeProbe<'_> {
    fn lookup(&mut self, name: &'static str) -> Result<FakeField, CursorTintError> {
        if self.missing_fields.contains(&name) {
            return Err(CursorTintError::MissingField(name));
        }
        self.lookups.push(name);
        Ok(FakeField(name))
    }
}

impl ProbeScope for FakeProbe<'_> {
    type Field = FakeField;

    fn text_view_field(&mut self, name: &'static str) -> Result<FakeField, CursorTintError> {
        self.lookup(name)
    }

    fn editor_field(
        &mut self,
        editor: &FakeField,
        name: &'static str,
    ) -> Result<FakeField, CursorTintError> {
        if editor.0 != "mEditor" {
            return Err(CursorTintError::IncompatibleField(editor.0));
        }
        self.lookup(name)
    }
}

impl WidgetReflection for FakeReflection {
    type Field = FakeField;
    type Editor = FakeEditor;
    type Drawable = FakeDrawable;

    fn sdk_version(&self) -> SdkVersion {
        self.sdk
    }

    fn field_cache(&self) -> &CursorFieldCache<FakeField> {
        &self.cache
    }

    fn with_probe<R>(
        &self,
        lookup: impl FnOnce(&mut dyn ProbeScope<Field = FakeField>) -> Result<R, CursorTintError>,
    ) -> Result<R, CursorTintError> {
        self.log.borrow_mut().probes_opened += 1;
        let mut probe = FakeProbe {
            missing_fields: &self.missing_fields,
            lookups: Vec::new(),
        };
        let result = lookup(&mut probe);
        let mut log = self.log.borrow_mut();
        log.lookups.extend(probe.lookups);
        log.probes_released += 1;
        result
    }

    fn read_int(&self, field: &FakeField) -> Result<i32, CursorTintError> {
        match field.0 {
            "mCursorDrawableRes" => Ok(self.cursor_resource),
            other => Err(CursorTintError::IncompatibleField(other)),
        }
    }

    fn read_editor(&self, field: &FakeField) -> Result<FakeEditor, CursorTintError> {
        if field.0 != "mEditor" {
            return Err(CursorTintError::IncompatibleField(field.0));
        }
        if self.null_editor {
            return Err(CursorTintError::NullValue("editor"));
        }
        Ok(FakeEditor)
    }

    fn fresh_drawable(&self, resource_id: i32) -> Result<FakeDrawable, CursorTintError> {
        let id = self.next_drawable.get();
        self.next_drawable.set(id + 1);
        Ok(FakeDrawable { id, resource_id })
    }

    fn tint(
        &self,
        drawable: &FakeDrawable,
        color: Color,
        mode: TintMode,
    ) -> Result<(), CursorTintError> {
        self.log.borrow_mut().tints.push((drawable.id, color, mode));
        Ok(())
    }

    fn write_drawable(
        &self,
        _editor: &FakeEditor,
        field: &FakeField,
        drawable: FakeDrawable,
    ) -> Result<(), CursorTintError> {
        self.log.borrow_mut().writes.push(DrawableWrite::Single {
            field: field.0,
            drawable: drawable.id,
            resource_id: drawable.resource_id,
        });
        Ok(())
    }

    fn write_drawable_pair(
        &self,
        _editor: &FakeEditor,
        field: &FakeField,
        drawables: [FakeDrawable; 2],
    ) -> Result<(), CursorTintError> {
        let [first, second] = drawables;
        self.log.borrow_mut().writes.push(DrawableWrite::Pair {
            field: field.0,
            drawables: [first.id, second.id],
            resource_ids: [first.resource_id, second.resource_id],
        });
        Ok(())
    }
}

/// Calls recorded by [`FakeWidget`].
#[derive(Debug, Default, Clone)]
pub struct WidgetLog {
    pub text_writes: Vec<String>,
    pub default_text_changed: usize,
    pub selection_queries: usize,
    pub default_layouts: usize,
    pub default_measures: Vec<(MeasureSpec, MeasureSpec)>,
    pub text_colors: Vec<Color>,
    pub single_line: Option<bool>,
    pub background: Option<Color>,
    pub padding_reset: bool,
    pub wrap_content: bool,
}

/// Native widget that re-enters its view synchronously on every buffer
/// change, the way the native toolkit does.
pub struct FakeWidget {
    pub reflection: FakeReflection,
    view: Weak<TextBoxView<FakeWidget>>,
    text: RefCell<String>,
    pub unreadable: Cell<bool>,
    pub loaded: Cell<bool>,
    pub selection: Cell<bool>,
    pub padding: Cell<HorizontalPadding>,
    pub native_width: Cell<Px>,
    pub native_height: Cell<Px>,
    measured: Cell<MeasuredSize>,
    pub log: RefCell<WidgetLog>,
}

impl FakeWidget {
    fn new(view: Weak<TextBoxView<FakeWidget>>, reflection: FakeReflection) -> Self {
        Self {
            reflection,
            view,
            text: RefCell::new(String::new()),
            unreadable: Cell::new(false),
            loaded: Cell::new(true),
            selection: Cell::new(false),
            padding: Cell::new(HorizontalPadding::default()),
            native_width: Cell::new(Px::ZERO),
            native_height: Cell::new(Px(40)),
            measured: Cell::new(MeasuredSize::default()),
            log: RefCell::new(WidgetLog::default()),
        }
    }

    /// Simulates a keystroke: mutates the buffer and raises a notification.
    pub fn user_types(&self, input: &str) {
        let start = utf16_len(&self.text.borrow());
        let text = {
            let mut text = self.text.borrow_mut();
            text.push_str(input);
            text.clone()
        };
        self.notify(TextChange {
            text,
            start,
            length_before: 0,
            length_after: utf16_len(input),
        });
    }

    /// Raises a notification without changing the buffer.
    pub fn raise_text_changed(&self) {
        let text = self.text.borrow().clone();
        self.notify(TextChange::replace_all(&text, text.as_str()));
    }

    /// The buffer contents, readable or not.
    pub fn buffer(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn text_writes(&self) -> Vec<String> {
        self.log.borrow().text_writes.clone()
    }

    fn notify(&self, change: TextChange) {
        if let Some(view) = self.view.upgrade() {
            view.on_native_text_changed(&change);
        }
    }
}

impl NativeTextWidget for FakeWidget {
    fn text(&self) -> Option<String> {
        if self.unreadable.get() {
            return None;
        }
        Some(self.text.borrow().clone())
    }

    fn set_text(&self, text: &str) {
        let previous = self.text.replace(text.to_string());
        self.log.borrow_mut().text_writes.push(text.to_string());
        self.notify(TextChange::replace_all(&previous, text));
    }

    fn default_on_text_changed(&self, _change: &TextChange) {
        self.log.borrow_mut().default_text_changed += 1;
    }

    fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    fn has_selection(&self) -> bool {
        assert!(self.loaded.get(), "selection queried on an unloaded widget");
        self.log.borrow_mut().selection_queries += 1;
        self.selection.get()
    }

    fn default_request_layout(&self) {
        self.log.borrow_mut().default_layouts += 1;
    }

    fn default_measure(&self, width: MeasureSpec, height: MeasureSpec) {
        self.log.borrow_mut().default_measures.push((width, height));
        self.measured.set(MeasuredSize::new(
            self.native_width.get(),
            self.native_height.get(),
        ));
    }

    fn measured_size(&self) -> MeasuredSize {
        self.measured.get()
    }

    fn set_measured_size(&self, size: MeasuredSize) {
        self.measured.set(size);
    }

    fn padding(&self) -> HorizontalPadding {
        self.padding.get()
    }

    fn set_text_color(&self, color: Color) {
        self.log.borrow_mut().text_colors.push(color);
    }

    fn set_single_line(&self, single_line: bool) {
        self.log.borrow_mut().single_line = Some(single_line);
    }

    fn set_background_color(&self, color: Color) {
        self.log.borrow_mut().background = Some(color);
    }

    fn set_padding(&self, left: Px, top: Px, right: Px, bottom: Px) {
        let zero = [left, top, right, bottom].iter().all(|side| *side == Px::ZERO);
        if zero {
            self.padding.set(HorizontalPadding::default());
        }
        self.log.borrow_mut().padding_reset = zero;
    }

    fn set_wrap_content(&self) {
        self.log.borrow_mut().wrap_content = true;
    }
}

impl WidgetReflection for FakeWidget {
    type Field = FakeField;
    type Editor = FakeEditor;
    type Drawable = FakeDrawable;

    fn sdk_version(&self) -> SdkVersion {
        self.reflection.sdk_version()
    }

    fn field_cache(&self) -> &CursorFieldCache<FakeField> {
        self.reflection.field_cache()
    }

    fn with_probe<R>(
        &self,
        lookup: impl FnOnce(&mut dyn ProbeScope<Field = FakeField>) -> Result<R, CursorTintError>,
    ) -> Result<R, CursorTintError> {
        self.reflection.with_probe(lookup)
    }

    fn read_int(&self, field: &FakeField) -> Result<i32, CursorTintError> {
        self.reflection.read_int(field)
    }

    fn read_editor(&self, field: &FakeField) -> Result<FakeEditor, CursorTintError> {
        self.reflection.read_editor(field)
    }

    fn fresh_drawable(&self, resource_id: i32) -> Result<FakeDrawable, CursorTintError> {
        self.reflection.fresh_drawable(resource_id)
    }

    fn tint(
        &self,
        drawable: &FakeDrawable,
        color: Color,
        mode: TintMode,
    ) -> Result<(), CursorTintError> {
        self.reflection.tint(drawable, color, mode)
    }

    fn write_drawable(
        &self,
        editor: &FakeEditor,
        field: &FakeField,
        drawable: FakeDrawable,
    ) -> Result<(), CursorTintError> {
        self.reflection.write_drawable(editor, field, drawable)
    }

    fn write_drawable_pair(
        &self,
        editor: &FakeEditor,
        field: &FakeField,
        drawables: [FakeDrawable; 2],
    ) -> Result<(), CursorTintError> {
        self.reflection.write_drawable_pair(editor, field, drawables)
    }
}

/// Builds an uninitialized view around a fake widget.
pub fn new_view(reflection: FakeReflection) -> Rc<TextBoxView<FakeWidget>> {
    new_view_with_args(reflection, TextBoxViewArgs::default())
}

/// Builds an uninitialized view with custom arguments.
pub fn new_view_with_args(
    reflection: FakeReflection,
    args: TextBoxViewArgs,
) -> Rc<TextBoxView<FakeWidget>> {
    Rc::new_cyclic(|view| TextBoxView::new(FakeWidget::new(view.clone(), reflection), args))
}

/// Builds an initialized view on a recent platform version.
pub fn initialized_view() -> Rc<TextBoxView<FakeWidget>> {
    let view = new_view(FakeReflection::new(34));
    view.initialize();
    view
}
